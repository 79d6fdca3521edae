//! Character grid produced for one animation step.

/// A rendered grid of characters.
///
/// Frames are built, written out and dropped; nothing keeps them around.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// Character data (row-major order)
    pub chars: Vec<char>,
    /// Width in characters
    pub width: u32,
    /// Height in characters
    pub height: u32,
}

impl Frame {
    /// Create a blank frame of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            chars: vec![' '; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Wrap a row-major character vector.
    ///
    /// # Panics
    /// Panics if `chars.len()` is not `width * height`.
    pub fn from_chars(chars: Vec<char>, width: u32, height: u32) -> Self {
        assert_eq!(
            chars.len(),
            width as usize * height as usize,
            "frame data does not match {width}x{height}"
        );
        Self {
            chars,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Rows of the frame, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.chars
            .chunks(self.width.max(1) as usize)
            .take(if self.width == 0 { 0 } else { self.height as usize })
    }

    /// Each row as a `String`.
    pub fn lines(&self) -> Vec<String> {
        self.rows().map(|row| row.iter().collect()).collect()
    }

    /// The frame as text, rows joined by newlines.
    pub fn to_string_display(&self) -> String {
        self.lines().join("\n")
    }
}
