//! Unit tests for the character-art conversion module.
//!
//! These tests cover the public pipeline from pixels to glyphs:
//! - Glyph calibration
//! - Nearest-brightness selection
//! - Grid fitting
//! - Luminance and fading

use glyph_fade::ascii::*;
use glyph_fade::font::{GlyphRasterizer, RenderStyle};
use glyph_fade::image_source::{PixelBuffer, PixelFormat};
use glyph_fade::renderer::{frame_for, ConsoleRenderer};

/// Lights the first `n` pixels of an 8x8 cell, where `n` is the glyph's
/// position in a fixed ramp.
struct RampRasterizer;

impl GlyphRasterizer for RampRasterizer {
    fn render(&self, text: &str, _size_px: f32, style: RenderStyle) -> PixelBuffer {
        let lit = match text {
            " " => 0,
            "." => 8,
            ":" => 16,
            "+" => 32,
            "#" => 64,
            _ => 24,
        };
        let mut data = Vec::with_capacity(64 * 3);
        for i in 0..64 {
            let color = if i < lit { style.foreground } else { style.background };
            data.extend_from_slice(&color);
        }
        PixelBuffer::from_raw(data, 8, 8, PixelFormat::Rgb).unwrap()
    }
}

fn ramp_selector() -> GlyphSelector {
    let table = GlyphIntensityTable::calibrate(&RampRasterizer, " .:+#", 12.0).unwrap();
    GlyphSelector::new(table)
}

fn gray(width: u32, height: u32, level: u8) -> PixelBuffer {
    PixelBuffer::filled(width, height, PixelFormat::Rgb, &[level, level, level])
}

/// Brightness of every glyph in a frame, summed.
fn frame_brightness(frame: &Frame, table: &GlyphIntensityTable) -> f64 {
    frame.chars.iter().map(|&c| table.get(c).unwrap()).sum()
}

// ==================== Calibration Tests ====================

#[test]
fn test_calibrated_values_are_normalized() {
    let table = GlyphIntensityTable::calibrate(&RampRasterizer, " .:+#", 12.0).unwrap();
    assert_eq!(table.len(), 5);
    assert!(table.iter().all(|(_, v)| (0.0..=1.0).contains(&v)));
    assert_eq!(table.get('#'), Some(1.0));
    assert_eq!(table.get('+'), Some(0.5));
    assert_eq!(table.get(' '), Some(0.0));
}

#[test]
fn test_calibration_order_matches_ink() {
    let table = GlyphIntensityTable::calibrate(&RampRasterizer, "#+:. ", 12.0).unwrap();
    let order: String = table.by_brightness().into_iter().map(|(c, _)| c).collect();
    assert_eq!(order, " .:+#");
}

#[test]
fn test_every_preset_is_nonempty_and_unique() {
    for set in CharSet::ALL {
        let chars = unique_chars(set.chars());
        assert!(!chars.is_empty(), "{} is empty", set.name());
        assert_eq!(chars.len(), set.chars().chars().count(), "{} repeats", set.name());
    }
}

#[test]
fn test_letters_preset_has_blank_and_both_cases() {
    assert!(LETTERS_CHARSET.contains(' '));
    assert!(LETTERS_CHARSET.contains('a'));
    assert!(LETTERS_CHARSET.contains('Z'));
    assert_eq!(CharSet::default(), CharSet::Letters);
}

#[test]
fn test_empty_charset_is_rejected() {
    assert_eq!(
        GlyphIntensityTable::calibrate(&RampRasterizer, "", 12.0),
        Err(IntensityError::EmptyCharset)
    );
}

// ==================== Selection Tests ====================

#[test]
fn test_selection_returns_table_member() {
    let mut sel = ramp_selector();
    for i in 0..=50 {
        let ch = sel.select(i as f64 / 50.0);
        assert!(sel.table().contains(ch));
    }
}

#[test]
fn test_selection_is_nearest() {
    let mut sel = ramp_selector();
    // Table: ' ' 0, '.' 0.125, ':' 0.25, '+' 0.5, '#' 1.0
    assert_eq!(sel.select(0.0), ' ');
    assert_eq!(sel.select(0.1), '.');
    assert_eq!(sel.select(0.3), ':');
    assert_eq!(sel.select(0.6), '+');
    assert_eq!(sel.select(0.9), '#');
}

#[test]
fn test_out_of_range_targets_clamp_to_extremes() {
    let mut sel = ramp_selector();
    assert_eq!(sel.select(-3.0), ' ');
    assert_eq!(sel.select(7.5), '#');
}

#[test]
fn test_cached_answers_match_uncached() {
    let mut sel = ramp_selector();
    let table = sel.table().clone();
    for i in 0..=20 {
        let target = i as f64 / 20.0;
        let first = sel.select(target);
        let again = sel.select(target);
        assert_eq!(first, again);
        assert_eq!(first, GlyphSelector::nearest(&table, target));
    }
    assert_eq!(sel.cache().len(), 21);
}

#[test]
fn test_equidistant_target_picks_lower_code_point() {
    // '+' (U+002B) and ':' (U+003A) both sit 0.125 away from 0.375
    let table = GlyphIntensityTable::from_scores([(':', 0.25), ('+', 0.5), ('#', 1.0)]).unwrap();
    assert_eq!(GlyphSelector::nearest(&table, 0.375), '+');
}

// ==================== Grid Fitting Tests ====================

#[test]
fn test_fit_never_exceeds_grid() {
    let grid = GridSize::DEFAULT;
    for &(w, h) in &[(1, 1), (79, 40), (640, 480), (4000, 10), (10, 4000), (333, 777)] {
        let fit = fit_dimensions(w, h, grid, DEFAULT_CELL_ASPECT);
        assert!(fit.width <= grid.columns, "{w}x{h} too wide: {fit:?}");
        assert!(fit.height <= grid.rows, "{w}x{h} too tall: {fit:?}");
        assert!(fit.scale <= 1.0);
    }
}

#[test]
fn test_fit_degenerate_input_is_empty() {
    let fit = fit_dimensions(0, 100, GridSize::DEFAULT, DEFAULT_CELL_ASPECT);
    assert_eq!((fit.width, fit.height), (0, 0));
}

#[test]
fn test_scale_to_grid_squashes_rows() {
    let img = gray(50, 50, 128);
    let fitted = scale_to_grid(&img, GridSize::DEFAULT, 0.6);
    assert_eq!((fitted.width, fitted.height), (50, 30));
}

#[test]
fn test_scale_to_grid_exact_fit_is_unchanged() {
    let img = gray(10, 5, 77);
    let fitted = scale_to_grid(&img, GridSize::new(10, 5), 1.0);
    assert_eq!(fitted, img);
}

// ==================== Luminance and Fade Tests ====================

#[test]
fn test_luma_weights() {
    assert!((pixel_intensity(&[255, 0, 0], 1.0) - 0.2989).abs() < 1e-9);
    assert!((pixel_intensity(&[0, 255, 0], 1.0) - 0.5870).abs() < 1e-9);
    assert!((pixel_intensity(&[0, 0, 255], 1.0) - 0.1140).abs() < 1e-9);
}

#[test]
fn test_transparent_pixel_is_dark() {
    assert_eq!(pixel_intensity(&[255, 255, 255, 0], 1.0), 0.0);
}

#[test]
fn test_zero_alpha_frame_is_all_darkest_glyph() {
    let mut sel = ramp_selector();
    let frame = frame_for(&gray(6, 3, 255), &mut sel, 0.0);
    assert_eq!(frame.chars.len(), 18);
    assert!(frame.chars.iter().all(|&c| c == ' '));
}

#[test]
fn test_fade_brightens_monotonically() {
    let mut sel = ramp_selector();
    let table = sel.table().clone();
    let img = gray(8, 4, 200);
    let steps = 12;
    let mut previous = -1.0;
    for step in 1..=steps {
        let frame = frame_for(&img, &mut sel, step as f64 / steps as f64);
        let brightness = frame_brightness(&frame, &table);
        assert!(
            brightness >= previous,
            "step {step} got darker: {brightness} < {previous}"
        );
        previous = brightness;
    }
}

// ==================== Renderer Tests ====================

#[test]
fn test_renderer_writes_one_line_per_row() {
    let mut sel = ramp_selector();
    let mut renderer = ConsoleRenderer::new(Vec::new(), GridSize::new(20, 20), 1.0);
    let frame = renderer.render(&gray(7, 3, 255), &mut sel, 1.0).unwrap();
    assert_eq!((frame.width, frame.height), (7, 3));

    let text = String::from_utf8(renderer.into_inner()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["#######"; 3]);
}

#[test]
fn test_renderer_empty_image_writes_nothing() {
    let mut sel = ramp_selector();
    let mut renderer = ConsoleRenderer::new(Vec::new(), GridSize::DEFAULT, 0.6);
    let frame = renderer
        .render(&PixelBuffer::new(0, 0, PixelFormat::Rgb), &mut sel, 1.0)
        .unwrap();
    assert!(frame.is_empty());
    assert!(renderer.get_ref().is_empty());
}
