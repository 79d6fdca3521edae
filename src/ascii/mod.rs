//! Character-art conversion.
//!
//! The pipeline from pixels to text:
//!
//! 1. **Calibration** - measure how much ink each glyph of a font leaves
//!    ([`GlyphIntensityTable`])
//! 2. **Fitting** - resample a picture onto the console grid, correcting
//!    for tall character cells ([`scale_to_grid`])
//! 3. **Luminance** - weighted RGB sum, scaled by pixel and fade alpha
//!    ([`pixel_intensity`])
//! 4. **Selection** - pick the glyph of closest brightness
//!    ([`GlyphSelector`])

mod charset;
mod dimensions;
mod frame;
mod intensity;
mod luminance;
mod selector;

pub use charset::{
    unique_chars, CharSet, BLOCKS_CHARSET, LETTERS_CHARSET, MINIMAL_CHARSET, STANDARD_CHARSET,
};
pub use dimensions::{fit_dimensions, scale_to_grid, FitDimensions, GridSize, DEFAULT_CELL_ASPECT};
pub use frame::Frame;
pub use intensity::{GlyphIntensityTable, IntensityError, DEFAULT_GLYPH_SIZE_PX};
pub use luminance::{pixel_intensity, LUMA_WEIGHTS};
pub use selector::{BestGlyphCache, GlyphSelector};
