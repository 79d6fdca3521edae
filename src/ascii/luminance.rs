//! Pixel colour to intensity conversion.

/// Luma weights applied to red, green and blue.
pub const LUMA_WEIGHTS: [f64; 3] = [0.2989, 0.5870, 0.1140];

/// Intensity of one pixel in `[0, 1]`.
///
/// `pixel` holds RGB or RGBA channels. The weighted luma is scaled by the
/// pixel's own alpha when present, then by the global `alpha` fade factor,
/// which models drawing over a black background.
#[inline]
pub fn pixel_intensity(pixel: &[u8], alpha: f64) -> f64 {
    let r = pixel[0] as f64;
    let g = pixel[1] as f64;
    let b = pixel[2] as f64;
    let mut intensity =
        (LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b) / 255.0;
    if let Some(&a) = pixel.get(3) {
        intensity *= a as f64 / 255.0;
    }
    intensity * alpha
}
