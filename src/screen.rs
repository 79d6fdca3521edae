//! Console screen control.

use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};

/// Escape sequence emitted by `Clear(ClearType::All)`.
pub const CLEAR_ALL_SEQUENCE: &str = "\x1b[2J";

/// Clear the screen and home the cursor.
///
/// Best-effort: a console that cannot be cleared just keeps scrolling, so
/// failures are logged and otherwise ignored.
pub fn clear_screen<W: Write>(out: &mut W) {
    let result = queue!(out, Clear(ClearType::All), MoveTo(0, 0)).and_then(|()| out.flush());
    if let Err(e) = result {
        log::trace!("Failed to clear screen: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_screen_writes_clear_sequence() {
        let mut out = Vec::new();
        clear_screen(&mut out);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(CLEAR_ALL_SEQUENCE));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_clear_screen_ignores_errors() {
        clear_screen(&mut BrokenPipe);
    }
}
