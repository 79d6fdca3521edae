//! Character sets used for brightness calibration.

/// Upper and lower case letters, a few symbols and a space. Wide tonal
/// range with a plain-text look; the default palette.
pub const LETTERS_CHARSET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ -=!#¤%&+*";

/// Classic ASCII density ramp.
pub const STANDARD_CHARSET: &str = " .:-=+*#%@";

/// Unicode shade blocks. Needs a font that covers U+2591..U+2593.
pub const BLOCKS_CHARSET: &str = " ░▒▓█";

/// Minimal set for a clean, low-noise look.
pub const MINIMAL_CHARSET: &str = " .:#";

/// Named calibration palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    #[default]
    Letters,
    Standard,
    Blocks,
    Minimal,
}

impl CharSet {
    pub const ALL: [CharSet; 4] = [
        CharSet::Letters,
        CharSet::Standard,
        CharSet::Blocks,
        CharSet::Minimal,
    ];

    /// The characters of this palette.
    pub fn chars(&self) -> &'static str {
        match self {
            CharSet::Letters => LETTERS_CHARSET,
            CharSet::Standard => STANDARD_CHARSET,
            CharSet::Blocks => BLOCKS_CHARSET,
            CharSet::Minimal => MINIMAL_CHARSET,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharSet::Letters => "letters",
            CharSet::Standard => "standard",
            CharSet::Blocks => "blocks",
            CharSet::Minimal => "minimal",
        }
    }

    /// Look a palette up by its [`name`](Self::name), case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// Distinct characters of `s`, in order of first appearance.
pub fn unique_chars(s: &str) -> Vec<char> {
    let mut seen = Vec::new();
    for ch in s.chars() {
        if !seen.contains(&ch) {
            seen.push(ch);
        }
    }
    seen
}
