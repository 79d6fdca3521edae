//! Pixel buffers and image decoding.
//!
//! Everything the renderer consumes is a [`PixelBuffer`]: decoded images
//! from disk as well as captions rasterized by the font module.

use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageBuffer, Rgb, Rgba};

/// Channel layout of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// RGB format (3 bytes per pixel)
    Rgb,
    /// RGBA format (4 bytes per pixel), straight alpha
    Rgba,
}

impl PixelFormat {
    /// Number of bytes used by one pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// A read-only grid of pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    /// Raw pixel data, row-major
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Channel layout of `data`
    pub format: PixelFormat,
}

impl PixelBuffer {
    /// Create an all-black (and, for RGBA, fully opaque) buffer.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        let len = width as usize * height as usize * format.bytes_per_pixel();
        let mut data = vec![0; len];
        if format == PixelFormat::Rgba {
            for px in data.chunks_exact_mut(4) {
                px[3] = 255;
            }
        }
        Self {
            data,
            width,
            height,
            format,
        }
    }

    /// Wrap raw pixel data. Returns `None` when the length does not match
    /// the dimensions.
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Option<Self> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if data.len() != expected {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Fill every pixel with one colour. `color` must have as many channels
    /// as the buffer's format.
    pub fn filled(width: u32, height: u32, format: PixelFormat, color: &[u8]) -> Self {
        assert_eq!(color.len(), format.bytes_per_pixel(), "channel count mismatch");
        let data = color
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * color.len())
            .collect();
        Self {
            data,
            width,
            height,
            format,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    pub fn has_alpha(&self) -> bool {
        self.format == PixelFormat::Rgba
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Channels of the pixel at `(x, y)`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let bpp = self.bytes_per_pixel();
        let start = (y as usize * self.width as usize + x as usize) * bpp;
        &self.data[start..start + bpp]
    }

    /// Iterate over rows, top to bottom. Each row is a slice of
    /// `width * bytes_per_pixel` bytes.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let stride = (self.width as usize * self.bytes_per_pixel()).max(1);
        self.data.chunks_exact(stride).take(self.height as usize)
    }

    /// Resample to `width` x `height` with a bilinear filter, keeping the
    /// channel layout.
    pub(crate) fn resized(&self, width: u32, height: u32) -> PixelBuffer {
        let (w, h) = (self.width, self.height);
        let resampled = match self.format {
            PixelFormat::Rgb => ImageBuffer::<Rgb<u8>, _>::from_raw(w, h, self.data.as_slice())
                .map(|src| imageops::resize(&src, width, height, FilterType::Triangle).into_raw()),
            PixelFormat::Rgba => ImageBuffer::<Rgba<u8>, _>::from_raw(w, h, self.data.as_slice())
                .map(|src| imageops::resize(&src, width, height, FilterType::Triangle).into_raw()),
        };
        match resampled {
            Some(data) => PixelBuffer {
                data,
                width,
                height,
                format: self.format,
            },
            // Only reachable when `data` was edited to a length that no
            // longer matches the dimensions.
            None => PixelBuffer::new(width, height, self.format),
        }
    }

    /// Build from a decoded image, keeping an alpha channel only when the
    /// source has one.
    pub(crate) fn from_dynamic(image: DynamicImage) -> Self {
        if image.color().has_alpha() {
            let rgba = image.into_rgba8();
            let (width, height) = rgba.dimensions();
            Self {
                data: rgba.into_raw(),
                width,
                height,
                format: PixelFormat::Rgba,
            }
        } else {
            let rgb = image.into_rgb8();
            let (width, height) = rgb.dimensions();
            Self {
                data: rgb.into_raw(),
                width,
                height,
                format: PixelFormat::Rgb,
            }
        }
    }
}

/// Errors that can occur when loading an image.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    #[error("image '{}' not found", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read image '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Source of decoded images.
pub trait ImageLoader {
    /// Load and decode the image at `path`.
    fn load(&self, path: &Path) -> Result<PixelBuffer, ImageLoadError>;
}

/// Loads images from the filesystem using the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileImageLoader;

impl ImageLoader for FileImageLoader {
    fn load(&self, path: &Path) -> Result<PixelBuffer, ImageLoadError> {
        if !path.exists() {
            return Err(ImageLoadError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let image = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(source) => ImageLoadError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => ImageLoadError::Decode {
                path: path.to_path_buf(),
                source,
            },
        })?;
        Ok(PixelBuffer::from_dynamic(image))
    }
}
