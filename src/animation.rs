//! Caption and picture sequencing.
//!
//! Captions fade in over a fixed number of steps; pictures are shown once
//! at full strength and held for a while. The screen is cleared before
//! every step. Cancellation is polled at fixed checkpoints and reported to
//! the caller instead of ending the process.

use std::io::Write;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ascii::GlyphSelector;
use crate::font::{GlyphRasterizer, RenderStyle};
use crate::image_source::ImageLoader;
use crate::renderer::ConsoleRenderer;

/// Polled at every checkpoint; `true` stops the animation.
pub trait CancelCheck {
    fn is_cancelled(&self) -> bool;
}

impl<F: Fn() -> bool> CancelCheck for F {
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// A [`CancelCheck`] that never fires.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverCancel;

impl CancelCheck for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Blocks between animation steps.
pub trait Pacer {
    fn pause(&mut self, duration: Duration);
}

/// Sleeps the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Timing and sizing of the animation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSettings {
    /// Number of opacity levels a caption passes through
    pub fade_steps: u32,
    /// Total time of one caption fade
    pub fade_duration: Duration,
    /// Wait before a caption's screen is cleared
    pub caption_lead_in: Duration,
    /// Wait on the cleared screen before the fade starts
    pub caption_settle: Duration,
    /// How long a picture stays up
    pub image_dwell: Duration,
    /// Largest caption font size in pixels
    pub caption_max_size: u32,
    /// Caption size is this divided by the caption's character count,
    /// so longer captions get smaller type
    pub caption_size_budget: u32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            fade_steps: 12,
            fade_duration: Duration::from_secs(4),
            caption_lead_in: Duration::from_millis(300),
            caption_settle: Duration::from_millis(100),
            image_dwell: Duration::from_secs(4),
            caption_max_size: 30,
            caption_size_budget: 200,
        }
    }
}

impl AnimationSettings {
    /// Pause after each fade step.
    pub fn step_pause(&self) -> Duration {
        self.fade_duration / self.fade_steps.max(1)
    }

    /// Font size for a caption, or `None` for an empty caption.
    pub fn caption_size(&self, text: &str) -> Option<u32> {
        let len = text.chars().count() as u32;
        if len == 0 {
            return None;
        }
        Some(self.caption_max_size.min(self.caption_size_budget / len).max(1))
    }
}

/// What to show, in order: every caption, then every picture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub captions: Vec<String>,
    pub images: Vec<PathBuf>,
}

/// Summary of a run that reached the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    pub captions_shown: usize,
    pub images_shown: usize,
    /// Pictures that could not be loaded
    pub skipped_images: Vec<PathBuf>,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(PlaybackReport),
    Cancelled,
}

/// Errors that stop the animation.
#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    #[error("failed to write frame: {0}")]
    Output(#[from] std::io::Error),
}

/// Plays a [`Program`] onto a [`ConsoleRenderer`].
pub struct AnimationDriver<'a, W: Write> {
    renderer: ConsoleRenderer<W>,
    selector: GlyphSelector,
    caption_font: &'a dyn GlyphRasterizer,
    loader: &'a dyn ImageLoader,
    cancel: &'a dyn CancelCheck,
    pacer: Box<dyn Pacer + 'a>,
    settings: AnimationSettings,
}

impl<'a, W: Write> AnimationDriver<'a, W> {
    pub fn new(
        renderer: ConsoleRenderer<W>,
        selector: GlyphSelector,
        caption_font: &'a dyn GlyphRasterizer,
        loader: &'a dyn ImageLoader,
        settings: AnimationSettings,
    ) -> Self {
        Self {
            renderer,
            selector,
            caption_font,
            loader,
            cancel: &NeverCancel,
            pacer: Box::new(ThreadPacer),
            settings,
        }
    }

    /// Poll `cancel` at every checkpoint.
    pub fn with_cancel(mut self, cancel: &'a dyn CancelCheck) -> Self {
        self.cancel = cancel;
        self
    }

    /// Replace the sleeping strategy.
    pub fn with_pacer(mut self, pacer: impl Pacer + 'a) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    pub fn selector(&self) -> &GlyphSelector {
        &self.selector
    }

    pub fn into_renderer(self) -> ConsoleRenderer<W> {
        self.renderer
    }

    /// Play every caption, then every picture.
    pub fn play(&mut self, program: &Program) -> Result<Outcome, AnimationError> {
        let mut report = PlaybackReport::default();

        for caption in &program.captions {
            if self.fade_in_caption(caption, &mut report)?.is_break() {
                return Ok(Outcome::Cancelled);
            }
        }

        for path in &program.images {
            if self.show_image(path, &mut report)?.is_break() {
                return Ok(Outcome::Cancelled);
            }
        }

        log::debug!(
            "Playback finished: {} captions, {} images, {} skipped",
            report.captions_shown,
            report.images_shown,
            report.skipped_images.len()
        );
        Ok(Outcome::Completed(report))
    }

    fn checkpoint(&self) -> ControlFlow<()> {
        if self.cancel.is_cancelled() {
            log::debug!("Cancellation requested");
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn fade_in_caption(
        &mut self,
        text: &str,
        report: &mut PlaybackReport,
    ) -> Result<ControlFlow<()>, AnimationError> {
        let Some(size) = self.settings.caption_size(text) else {
            log::warn!("Skipping empty caption");
            return Ok(ControlFlow::Continue(()));
        };

        self.pacer.pause(self.settings.caption_lead_in);
        if self.checkpoint().is_break() {
            return Ok(ControlFlow::Break(()));
        }
        self.renderer.clear();
        self.pacer.pause(self.settings.caption_settle);

        let bitmap = self
            .caption_font
            .render(text, size as f32, RenderStyle::CAPTION);
        let steps = self.settings.fade_steps.max(1);
        let pause = self.settings.step_pause();
        log::debug!("Fading in {:?} at {}px over {} steps", text, size, steps);

        for step in 1..=steps {
            let alpha = step as f64 / steps as f64;
            self.renderer.clear();
            self.renderer.render(&bitmap, &mut self.selector, alpha)?;
            self.pacer.pause(pause);
            if self.checkpoint().is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }

        report.captions_shown += 1;
        Ok(ControlFlow::Continue(()))
    }

    fn show_image(
        &mut self,
        path: &Path,
        report: &mut PlaybackReport,
    ) -> Result<ControlFlow<()>, AnimationError> {
        let image = match self.loader.load(path) {
            Ok(image) => image,
            Err(e) => {
                log::debug!("Skipping image: {}", e);
                report.skipped_images.push(path.to_path_buf());
                return Ok(ControlFlow::Continue(()));
            }
        };

        if self.checkpoint().is_break() {
            return Ok(ControlFlow::Break(()));
        }
        self.renderer.clear();
        self.renderer.render(&image, &mut self.selector, 1.0)?;
        self.pacer.pause(self.settings.image_dwell);

        report.images_shown += 1;
        Ok(ControlFlow::Continue(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = AnimationSettings::default();
        assert_eq!(s.fade_steps, 12);
        assert_eq!(s.step_pause(), Duration::from_secs(4) / 12);
    }

    #[test]
    fn test_caption_size_shrinks_with_length() {
        let s = AnimationSettings::default();
        assert_eq!(s.caption_size(" Hello "), Some(28));
        assert_eq!(s.caption_size("Hi"), Some(30));
        assert_eq!(s.caption_size("födelse-"), Some(25));
        assert_eq!(s.caption_size(""), None);
    }

    #[test]
    fn test_caption_size_never_zero() {
        let s = AnimationSettings::default();
        let long = "x".repeat(1000);
        assert_eq!(s.caption_size(&long), Some(1));
    }

    #[test]
    fn test_closure_cancel_check() {
        let yes = || true;
        let no = || false;
        assert!(yes.is_cancelled());
        assert!(!no.is_cancelled());
        assert!(!NeverCancel.is_cancelled());
    }
}
