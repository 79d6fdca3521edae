//! Writing character frames to the console.

use std::io::{self, Write};

use crate::ascii::{pixel_intensity, scale_to_grid, Frame, GlyphSelector, GridSize};
use crate::image_source::PixelBuffer;
use crate::screen;

/// Convert every pixel of `image` to a glyph, without resampling.
///
/// `alpha` is the global fade factor: 0.0 is fully faded out (black),
/// 1.0 fully visible. Values outside `[0, 1]` are clamped; NaN counts as 0.0.
pub fn frame_for(image: &PixelBuffer, selector: &mut GlyphSelector, alpha: f64) -> Frame {
    if image.is_empty() {
        return Frame::default();
    }
    let alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    let bpp = image.bytes_per_pixel();
    let mut chars = Vec::with_capacity(image.width as usize * image.height as usize);
    for row in image.rows() {
        for pixel in row.chunks_exact(bpp) {
            chars.push(selector.select(pixel_intensity(pixel, alpha)));
        }
    }
    Frame::from_chars(chars, image.width, image.height)
}

/// Draws pictures as character art on an output stream.
#[derive(Debug)]
pub struct ConsoleRenderer<W: Write> {
    out: W,
    grid: GridSize,
    cell_aspect: f64,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W, grid: GridSize, cell_aspect: f64) -> Self {
        Self {
            out,
            grid,
            cell_aspect,
        }
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Fit `image` to the grid, convert it and write it out.
    ///
    /// Each row becomes one line; the stream is flushed once the whole
    /// frame is written.
    pub fn render(
        &mut self,
        image: &PixelBuffer,
        selector: &mut GlyphSelector,
        alpha: f64,
    ) -> io::Result<Frame> {
        let fitted = scale_to_grid(image, self.grid, self.cell_aspect);
        let frame = frame_for(&fitted, selector, alpha);
        self.write_frame(&frame)?;
        Ok(frame)
    }

    /// Write an already converted frame.
    pub fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        let mut line = String::with_capacity(frame.width as usize);
        for row in frame.rows() {
            line.clear();
            line.extend(row.iter());
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    /// Clear the screen. Never fails.
    pub fn clear(&mut self) {
        screen::clear_screen(&mut self.out);
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
