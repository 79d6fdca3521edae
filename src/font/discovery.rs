//! Locating a usable monospace font on the host.

use std::path::{Path, PathBuf};

use super::FontError;

/// Well-known monospace font locations, probed in order.
pub const FONT_CANDIDATES: &[&str] = &[
    // Linux
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeMono.ttf",
    // macOS
    "/System/Library/Fonts/Supplemental/Courier New.ttf",
    "/Library/Fonts/Courier New.ttf",
    // Windows
    "C:\\Windows\\Fonts\\cour.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
];

/// Resolve the font to use.
///
/// An explicit path must exist. Without one, the first existing entry of
/// [`FONT_CANDIDATES`] is used.
pub fn locate_font(explicit: Option<&Path>) -> Result<PathBuf, FontError> {
    locate_font_in(explicit, FONT_CANDIDATES.iter().map(PathBuf::from))
}

fn locate_font_in(
    explicit: Option<&Path>,
    candidates: impl IntoIterator<Item = PathBuf>,
) -> Result<PathBuf, FontError> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(FontError::Missing {
                path: path.to_path_buf(),
            })
        };
    }

    let mut searched = Vec::new();
    for candidate in candidates {
        if candidate.is_file() {
            log::debug!("Using font {}", candidate.display());
            return Ok(candidate);
        }
        searched.push(candidate);
    }
    Err(FontError::NotFound { searched })
}
