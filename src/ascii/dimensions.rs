//! Fitting images onto the console grid.

use crate::image_source::PixelBuffer;

/// Width of a console character cell relative to its height.
/// Cells are taller than wide, so one pixel per cell needs fewer rows
/// than columns to keep the picture's proportions.
pub const DEFAULT_CELL_ASPECT: f64 = 0.6;

/// Size of the character grid in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub columns: u32,
    pub rows: u32,
}

impl GridSize {
    /// 79 columns by 40 rows, which fits a default console window.
    pub const DEFAULT: GridSize = GridSize {
        columns: 79,
        rows: 40,
    };

    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Result of fitting an image into a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitDimensions {
    /// Output width in pixels (one pixel per column)
    pub width: u32,
    /// Output height in pixels (one pixel per row)
    pub height: u32,
    /// Uniform scale applied to the source, never above 1.0
    pub scale: f64,
}

/// Compute the output size of `width` x `height` pixels on `grid`.
///
/// The scale is the smallest of 1.0 (never enlarge), the width fit and the
/// height fit, where the height fit is divided by `cell_aspect` because
/// each row will be squashed by that factor afterwards. The final height is
/// then multiplied by `cell_aspect`. Both sides are rounded down.
pub fn fit_dimensions(width: u32, height: u32, grid: GridSize, cell_aspect: f64) -> FitDimensions {
    if width == 0 || height == 0 || grid.columns == 0 || grid.rows == 0 || cell_aspect <= 0.0 {
        return FitDimensions {
            width: 0,
            height: 0,
            scale: 0.0,
        };
    }

    let width_fit = grid.columns as f64 / width as f64;
    let height_fit = grid.rows as f64 / height as f64 / cell_aspect;
    let scale = 1.0f64.min(width_fit).min(height_fit);

    FitDimensions {
        width: (width as f64 * scale).floor() as u32,
        height: (height as f64 * scale * cell_aspect).floor() as u32,
        scale,
    }
}

/// Resample `image` so that each pixel maps to one grid cell.
pub fn scale_to_grid(image: &PixelBuffer, grid: GridSize, cell_aspect: f64) -> PixelBuffer {
    let fit = fit_dimensions(image.width, image.height, grid, cell_aspect);
    if fit.width == 0 || fit.height == 0 {
        return PixelBuffer::new(0, 0, image.format);
    }
    if fit.width == image.width && fit.height == image.height {
        return image.clone();
    }

    image.resized(fit.width, fit.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_source::PixelFormat;

    #[test]
    fn test_wide_image_is_width_bound() {
        let fit = fit_dimensions(200, 100, GridSize::new(79, 40), 0.6);
        assert!((fit.scale - 0.395).abs() < 1e-12);
        assert_eq!((fit.width, fit.height), (79, 23));
    }

    #[test]
    fn test_small_image_is_not_enlarged() {
        let fit = fit_dimensions(20, 10, GridSize::DEFAULT, 0.6);
        assert_eq!(fit.scale, 1.0);
        assert_eq!((fit.width, fit.height), (20, 6));
    }

    #[test]
    fn test_tall_image_is_height_bound() {
        // height fit = 40 / 400 / 0.6 = 0.1667, width fit = 79 / 100 = 0.79
        let fit = fit_dimensions(100, 400, GridSize::new(79, 40), 0.6);
        assert!((fit.scale - 40.0 / 400.0 / 0.6).abs() < 1e-12);
        assert_eq!(fit.width, 16);
        // The round trip through the aspect factor can land a hair under 40.
        assert!((39..=40).contains(&fit.height));
    }

    #[test]
    fn test_degenerate_inputs_give_empty_output() {
        assert_eq!(fit_dimensions(0, 10, GridSize::DEFAULT, 0.6).width, 0);
        assert_eq!(fit_dimensions(10, 10, GridSize::new(0, 10), 0.6).height, 0);
        assert_eq!(fit_dimensions(10, 10, GridSize::DEFAULT, 0.0).width, 0);
    }

    #[test]
    fn test_scale_to_grid_keeps_format() {
        let rgb = PixelBuffer::filled(200, 100, PixelFormat::Rgb, &[255, 255, 255]);
        let out = scale_to_grid(&rgb, GridSize::new(79, 40), 0.6);
        assert_eq!(out.format, PixelFormat::Rgb);
        assert_eq!((out.width, out.height), (79, 23));
        assert_eq!(out.data.len(), 79 * 23 * 3);
        assert!(out.data.iter().all(|&v| v == 255));

        let rgba = PixelBuffer::filled(200, 100, PixelFormat::Rgba, &[0, 0, 0, 40]);
        let out = scale_to_grid(&rgba, GridSize::new(79, 40), 0.6);
        assert_eq!(out.format, PixelFormat::Rgba);
        assert_eq!(out.pixel(10, 10), &[0, 0, 0, 40]);
    }

    #[test]
    fn test_scale_to_grid_tiny_image_is_empty() {
        let img = PixelBuffer::filled(4, 1, PixelFormat::Rgb, &[9, 9, 9]);
        // 1 * 1.0 * 0.6 rounds down to zero rows
        let out = scale_to_grid(&img, GridSize::DEFAULT, 0.6);
        assert!(out.is_empty());
    }
}
