//! Top-level error type for the binary.

use std::path::PathBuf;

use crate::animation::AnimationError;
use crate::ascii::IntensityError;
use crate::config::ConfigError;
use crate::font::FontError;
use crate::image_source::ImageLoadError;

/// Anything that ends the program with a failure status.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error("glyph calibration failed: {0}")]
    Calibration(#[from] IntensityError),

    #[error(transparent)]
    Image(#[from] ImageLoadError),

    #[error(transparent)]
    Animation(#[from] AnimationError),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config file already exists: {}", path.display())]
    ConfigExists { path: PathBuf },
}
