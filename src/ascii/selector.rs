//! Nearest-brightness glyph lookup with memoization.

use std::collections::HashMap;

use super::intensity::GlyphIntensityTable;

/// Memo of brightness value to chosen glyph.
///
/// Keys are the exact values looked up, not quantized; flat regions of an
/// image repeat the same value many times. The cache never evicts.
#[derive(Debug, Default, Clone)]
pub struct BestGlyphCache {
    entries: HashMap<u64, char>,
}

impl BestGlyphCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, value: f64) -> Option<char> {
        self.entries.get(&key(value)).copied()
    }

    pub fn insert(&mut self, value: f64, ch: char) {
        self.entries.insert(key(value), ch);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// `0.0` and `-0.0` compare equal, so they share a slot.
fn key(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// Picks the glyph whose calibrated brightness is closest to a target.
///
/// The selector owns both its table and its cache, so cached answers can
/// never leak between tables built from different character sets.
#[derive(Debug, Clone)]
pub struct GlyphSelector {
    table: GlyphIntensityTable,
    cache: BestGlyphCache,
}

impl GlyphSelector {
    pub fn new(table: GlyphIntensityTable) -> Self {
        Self {
            table,
            cache: BestGlyphCache::new(),
        }
    }

    pub fn table(&self) -> &GlyphIntensityTable {
        &self.table
    }

    pub fn cache(&self) -> &BestGlyphCache {
        &self.cache
    }

    /// Drop every memoized answer.
    pub fn reset_cache(&mut self) {
        self.cache.clear();
    }

    /// Glyph closest in brightness to `target`, memoized by `target`.
    pub fn select(&mut self, target: f64) -> char {
        if let Some(ch) = self.cache.lookup(target) {
            return ch;
        }
        let ch = Self::nearest(&self.table, target);
        self.cache.insert(target, ch);
        ch
    }

    /// Uncached lookup. On equal distance the lower code point wins.
    pub fn nearest(table: &GlyphIntensityTable, target: f64) -> char {
        let mut best: Option<(f64, char)> = None;
        // `iter` walks in code point order, so keeping the first strict
        // minimum breaks ties toward the lower code point.
        for (ch, brightness) in table.iter() {
            let distance = (brightness - target).abs();
            match best {
                Some((d, _)) if d <= distance => {}
                _ => best = Some((distance, ch)),
            }
        }
        // A table is never empty; see `GlyphIntensityTable::from_scores`.
        best.map_or(' ', |(_, ch)| ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tone() -> GlyphIntensityTable {
        GlyphIntensityTable::from_scores([(' ', 0.0), ('#', 1.0)]).unwrap()
    }

    #[test]
    fn test_two_tone_threshold() {
        let mut sel = GlyphSelector::new(two_tone());
        assert_eq!(sel.select(0.6), '#');
        assert_eq!(sel.select(0.3), ' ');
        assert_eq!(sel.select(0.0), ' ');
        assert_eq!(sel.select(1.0), '#');
    }

    #[test]
    fn test_tie_goes_to_lower_code_point() {
        // ' ' (U+0020) sorts before '#' (U+0023)
        assert_eq!(GlyphSelector::nearest(&two_tone(), 0.5), ' ');

        let table = GlyphIntensityTable::from_scores([('b', 0.25), ('a', 0.75), ('z', 1.0)]).unwrap();
        assert_eq!(GlyphSelector::nearest(&table, 0.5), 'a');
    }

    #[test]
    fn test_select_populates_cache_once_per_value() {
        let mut sel = GlyphSelector::new(two_tone());
        assert!(sel.cache().is_empty());
        sel.select(0.25);
        sel.select(0.25);
        sel.select(0.75);
        assert_eq!(sel.cache().len(), 2);
        assert_eq!(sel.cache().lookup(0.25), Some(' '));
        assert_eq!(sel.cache().lookup(0.75), Some('#'));
        assert_eq!(sel.cache().lookup(0.5), None);
    }

    #[test]
    fn test_signed_zero_shares_cache_slot() {
        let mut cache = BestGlyphCache::new();
        cache.insert(0.0, 'x');
        assert_eq!(cache.lookup(-0.0), Some('x'));
    }

    #[test]
    fn test_reset_cache() {
        let mut sel = GlyphSelector::new(two_tone());
        sel.select(0.1);
        sel.reset_cache();
        assert!(sel.cache().is_empty());
        assert_eq!(sel.select(0.1), ' ');
    }

    #[test]
    fn test_select_is_deterministic_and_stays_in_table() {
        let table = GlyphIntensityTable::from_scores(
            "abcdefgh".chars().enumerate().map(|(i, c)| (c, (i * i) as f64)),
        )
        .unwrap();
        let mut sel = GlyphSelector::new(table.clone());
        for step in 0..=100 {
            let target = step as f64 / 100.0;
            let first = sel.select(target);
            assert_eq!(sel.select(target), first);
            assert_eq!(GlyphSelector::nearest(&table, target), first);
            assert!(table.contains(first));
        }
    }
}
