//! Font rasterization for captions and glyph calibration.
//!
//! The rest of the crate only sees the [`GlyphRasterizer`] trait so that
//! tests can swap in synthetic glyphs. [`FontRasterizer`] is the real
//! implementation, backed by `fontdue`.

mod discovery;
mod error;
mod rasterizer;

pub use discovery::{locate_font, FONT_CANDIDATES};
pub use error::FontError;
pub use rasterizer::FontRasterizer;

use crate::image_source::PixelBuffer;

pub const WHITE: [u8; 3] = [255, 255, 255];
pub const BLACK: [u8; 3] = [0, 0, 0];

/// How text is painted into a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    /// Smooth glyph edges. When off every pixel is either foreground or
    /// background.
    pub antialias: bool,
    pub foreground: [u8; 3],
    pub background: [u8; 3],
}

impl RenderStyle {
    /// Hard-edged white on black, used for brightness calibration.
    pub const CALIBRATION: RenderStyle = RenderStyle {
        antialias: false,
        foreground: WHITE,
        background: BLACK,
    };

    /// Smooth white on black, used for captions.
    pub const CAPTION: RenderStyle = RenderStyle {
        antialias: true,
        foreground: WHITE,
        background: BLACK,
    };
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::CAPTION
    }
}

/// Renders text into RGB pixel buffers.
///
/// Implementations must be deterministic for fixed inputs.
pub trait GlyphRasterizer {
    /// Render a single line of text at `size_px` pixels per em.
    fn render(&self, text: &str, size_px: f32, style: RenderStyle) -> PixelBuffer;

    /// Render one character into a full cell (advance width by line height).
    fn render_glyph(&self, ch: char, size_px: f32, style: RenderStyle) -> PixelBuffer {
        let mut buf = [0u8; 4];
        self.render(ch.encode_utf8(&mut buf), size_px, style)
    }
}
