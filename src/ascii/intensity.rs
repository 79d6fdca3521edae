//! Glyph brightness calibration.
//!
//! Each candidate character is rendered white-on-black without
//! antialiasing and scored by the fraction of its cell that is lit. The
//! scores are then rescaled so the boldest glyph is exactly 1.0.

use std::collections::BTreeMap;

use super::charset::unique_chars;
use crate::font::{GlyphRasterizer, RenderStyle};

/// Point size used to render calibration glyphs.
pub const DEFAULT_GLYPH_SIZE_PX: f32 = 12.0;

/// Errors for character sets that cannot produce a brightness scale.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntensityError {
    #[error("character set is empty")]
    EmptyCharset,

    #[error("no character in the set leaves any ink (checked {checked} characters)")]
    NoInk { checked: usize },

    #[error("brightness for {ch:?} is not a finite, non-negative number")]
    InvalidScore { ch: char },
}

/// Immutable map from character to normalized brightness in `[0, 1]`.
///
/// Entries are kept in code point order, which is also the tie-break order
/// used when two glyphs are equally close to a target.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphIntensityTable {
    scores: BTreeMap<char, f64>,
}

impl GlyphIntensityTable {
    /// Measure every character of `charset` with `rasterizer`.
    pub fn calibrate(
        rasterizer: &dyn GlyphRasterizer,
        charset: &str,
        size_px: f32,
    ) -> Result<Self, IntensityError> {
        let raw = unique_chars(charset)
            .into_iter()
            .map(|ch| {
                let bitmap = rasterizer.render_glyph(ch, size_px, RenderStyle::CALIBRATION);
                (ch, lit_fraction(&bitmap, RenderStyle::CALIBRATION.foreground))
            })
            .collect::<Vec<_>>();

        let table = Self::from_scores(raw)?;
        log::debug!(
            "Calibrated {} glyphs at {}px (darkest {:?}, brightest {:?})",
            table.len(),
            size_px,
            table.darkest(),
            table.brightest()
        );
        Ok(table)
    }

    /// Build a table from raw `(char, coverage)` pairs, normalizing by the
    /// largest coverage. Later duplicates of a character replace earlier ones.
    pub fn from_scores(
        scores: impl IntoIterator<Item = (char, f64)>,
    ) -> Result<Self, IntensityError> {
        let mut raw = BTreeMap::new();
        for (ch, score) in scores {
            if !score.is_finite() || score < 0.0 {
                return Err(IntensityError::InvalidScore { ch });
            }
            raw.insert(ch, score);
        }
        if raw.is_empty() {
            return Err(IntensityError::EmptyCharset);
        }

        let max = raw.values().copied().fold(0.0f64, f64::max);
        if max <= 0.0 {
            return Err(IntensityError::NoInk { checked: raw.len() });
        }

        let scores = raw
            .into_iter()
            .map(|(ch, score)| (ch, score / max))
            .collect();
        Ok(Self { scores })
    }

    /// Brightness of `ch`, if it is part of the table.
    pub fn get(&self, ch: char) -> Option<f64> {
        self.scores.get(&ch).copied()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.scores.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Entries in code point order.
    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.scores.iter().map(|(&ch, &score)| (ch, score))
    }

    /// Entries ordered from darkest to brightest, code point breaking ties.
    pub fn by_brightness(&self) -> Vec<(char, f64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        entries
    }

    pub fn darkest(&self) -> Option<char> {
        self.by_brightness().first().map(|&(ch, _)| ch)
    }

    pub fn brightest(&self) -> Option<char> {
        self.by_brightness().last().map(|&(ch, _)| ch)
    }
}

/// Fraction of pixels in `bitmap` that exactly match `ink`.
fn lit_fraction(bitmap: &crate::image_source::PixelBuffer, ink: [u8; 3]) -> f64 {
    if bitmap.is_empty() {
        return 0.0;
    }
    let bpp = bitmap.bytes_per_pixel();
    let total = bitmap.width as usize * bitmap.height as usize;
    let lit = bitmap
        .data
        .chunks_exact(bpp)
        .filter(|px| px[..3] == ink)
        .count();
    lit as f64 / total as f64
}
