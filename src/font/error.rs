//! Font error types

use std::path::PathBuf;

/// Errors raised while locating or loading a font. All of them are fatal:
/// nothing can be rendered without a working font.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("font file '{}' does not exist", path.display())]
    Missing { path: PathBuf },

    #[error("failed to read font '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font '{}': {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error(
        "no monospace font found (searched {} locations). Pass one with --font <PATH>",
        searched.len()
    )]
    NotFound { searched: Vec<PathBuf> },
}
