//! Ctrl+C handling.
//!
//! The handler only raises a flag. The animation polls it between frames
//! and fade steps through [`InterruptFlag`].

use std::sync::atomic::{AtomicBool, Ordering};

use crate::animation::CancelCheck;

/// Exit status used after an interrupt (128 + SIGINT).
pub const INTERRUPT_EXIT_CODE: i32 = 130;

/// Raised by the handler, read at animation checkpoints.
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Whether an interrupt has arrived since startup.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Route Ctrl+C to the interrupt flag. Call once, before playback.
pub fn install_interrupt_handler() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        INTERRUPTED.store(true, Ordering::SeqCst);
    })
}

/// [`CancelCheck`] backed by the Ctrl+C flag.
#[derive(Debug, Default, Clone, Copy)]
pub struct InterruptFlag;

impl CancelCheck for InterruptFlag {
    fn is_cancelled(&self) -> bool {
        interrupted()
    }
}
