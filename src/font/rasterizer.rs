//! `fontdue`-backed text rendering.

use std::fs;
use std::path::Path;

use fontdue::{Font, FontSettings};

use super::{FontError, GlyphRasterizer, RenderStyle};
use crate::image_source::{PixelBuffer, PixelFormat};

/// Coverage at or above this value counts as ink when antialiasing is off.
const HARD_EDGE_THRESHOLD: u8 = 128;

/// Renders text with a TrueType/OpenType font.
pub struct FontRasterizer {
    font: Font,
}

impl std::fmt::Debug for FontRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontRasterizer").finish_non_exhaustive()
    }
}

impl FontRasterizer {
    /// Read and parse a font file.
    pub fn open(path: &Path) -> Result<Self, FontError> {
        let bytes = fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(bytes).map_err(|reason| FontError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse a font from memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, String> {
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(str::to_string)?;
        Ok(Self { font })
    }

    /// Ascent and descent (descent is negative) for a pixel size.
    fn vertical_extent(&self, size_px: f32) -> (f32, f32) {
        match self.font.horizontal_line_metrics(size_px) {
            Some(lm) => (lm.ascent, lm.descent),
            None => (size_px, 0.0),
        }
    }

    /// Rasterize `text` into a single coverage plane.
    fn coverage(&self, text: &str, size_px: f32) -> (Vec<u8>, u32, u32) {
        let (ascent, descent) = self.vertical_extent(size_px);
        let height = (ascent - descent).ceil().max(1.0) as u32;

        let chars: Vec<char> = text.chars().filter(|c| !c.is_control()).collect();
        let mut pen_x = 0.0f32;
        let mut placements = Vec::with_capacity(chars.len());
        for (i, &ch) in chars.iter().enumerate() {
            if i > 0 {
                if let Some(kern) = self.font.horizontal_kern(chars[i - 1], ch, size_px) {
                    pen_x += kern;
                }
            }
            placements.push((ch, pen_x));
            pen_x += self.font.metrics(ch, size_px).advance_width;
        }
        let width = pen_x.ceil().max(0.0) as u32;

        let mut plane = vec![0u8; width as usize * height as usize];
        for (ch, x) in placements {
            let (metrics, bitmap) = self.font.rasterize(ch, size_px);
            if metrics.width == 0 || metrics.height == 0 {
                continue;
            }
            let left = (x + metrics.xmin as f32).round() as i64;
            let top = (ascent - metrics.height as f32 - metrics.ymin as f32).round() as i64;
            for gy in 0..metrics.height {
                let py = top + gy as i64;
                if py < 0 || py >= height as i64 {
                    continue;
                }
                for gx in 0..metrics.width {
                    let px = left + gx as i64;
                    if px < 0 || px >= width as i64 {
                        continue;
                    }
                    let src = bitmap[gy * metrics.width + gx];
                    let dst = &mut plane[py as usize * width as usize + px as usize];
                    *dst = (*dst).max(src);
                }
            }
        }
        (plane, width, height)
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn render(&self, text: &str, size_px: f32, style: RenderStyle) -> PixelBuffer {
        let (plane, width, height) = self.coverage(text, size_px);
        let mut data = Vec::with_capacity(plane.len() * 3);
        for cov in plane {
            data.extend_from_slice(&shade(cov, style));
        }
        PixelBuffer {
            data,
            width,
            height,
            format: PixelFormat::Rgb,
        }
    }
}

/// Colour of one pixel given its glyph coverage.
fn shade(coverage: u8, style: RenderStyle) -> [u8; 3] {
    if !style.antialias {
        return if coverage >= HARD_EDGE_THRESHOLD {
            style.foreground
        } else {
            style.background
        };
    }
    let t = coverage as u32;
    let mut out = [0u8; 3];
    for (i, channel) in out.iter_mut().enumerate() {
        let fg = style.foreground[i] as u32;
        let bg = style.background[i] as u32;
        *channel = ((fg * t + bg * (255 - t)) / 255) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{BLACK, WHITE};

    #[test]
    fn test_shade_hard_edges() {
        let style = RenderStyle::CALIBRATION;
        assert_eq!(shade(0, style), BLACK);
        assert_eq!(shade(127, style), BLACK);
        assert_eq!(shade(128, style), WHITE);
        assert_eq!(shade(255, style), WHITE);
    }

    #[test]
    fn test_shade_antialiased_blends() {
        let style = RenderStyle::CAPTION;
        assert_eq!(shade(0, style), BLACK);
        assert_eq!(shade(255, style), WHITE);
        assert_eq!(shade(51, style), [51, 51, 51]);
    }

    #[test]
    fn test_shade_custom_colours() {
        let style = RenderStyle {
            antialias: false,
            foreground: [255, 0, 0],
            background: [0, 0, 255],
        };
        assert_eq!(shade(200, style), [255, 0, 0]);
        assert_eq!(shade(10, style), [0, 0, 255]);
    }

    #[test]
    fn test_garbage_font_bytes_fail_to_parse() {
        assert!(FontRasterizer::from_bytes(vec![0, 1, 2, 3]).is_err());
    }

    #[test]
    fn test_open_missing_file_is_read_error() {
        let err = FontRasterizer::open(Path::new("/nope/missing.ttf")).unwrap_err();
        assert!(matches!(err, FontError::Read { .. }));
    }

    fn system_font() -> Option<FontRasterizer> {
        let path = crate::font::locate_font(None).ok()?;
        FontRasterizer::open(&path).ok()
    }

    fn lit_pixels(buf: &PixelBuffer) -> usize {
        buf.data.chunks_exact(3).filter(|px| *px == WHITE).count()
    }

    #[test]
    fn test_system_font_renders_glyph_cells() {
        let Some(font) = system_font() else {
            println!("SKIP: No system monospace font found");
            return;
        };
        let style = RenderStyle::CALIBRATION;

        let space = font.render_glyph(' ', 12.0, style);
        assert!(!space.is_empty());
        assert_eq!(lit_pixels(&space), 0);

        let w = font.render_glyph('W', 12.0, style);
        assert_eq!((w.width, w.height), (space.width, space.height));
        let lit = lit_pixels(&w);
        assert!(lit > 0);
        assert!(lit < (w.width * w.height) as usize);

        let one = font.render("H", 30.0, RenderStyle::CAPTION);
        let two = font.render("Hi", 30.0, RenderStyle::CAPTION);
        assert!(two.width > one.width);
        assert_eq!(two.height, one.height);
    }

    #[test]
    fn test_system_font_calibrates_letters() {
        let Some(font) = system_font() else {
            println!("SKIP: No system monospace font found");
            return;
        };
        let table = crate::ascii::GlyphIntensityTable::calibrate(
            &font,
            crate::ascii::LETTERS_CHARSET,
            crate::ascii::DEFAULT_GLYPH_SIZE_PX,
        )
        .unwrap();
        assert_eq!(table.darkest(), Some(' '));
        let max = table.iter().map(|(_, v)| v).fold(0.0f64, f64::max);
        assert_eq!(max, 1.0);
    }
}
