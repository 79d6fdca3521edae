//! glyph-fade library crate.
//!
//! Fades captions and pictures into a terminal as character art. Glyph
//! brightness is measured from a real font, so the same picture renders
//! with the characters that best match its tones.

pub mod animation;
pub mod ascii;
pub mod cli;
pub mod config;
pub mod error;
pub mod font;
pub mod image_source;
pub mod renderer;
pub mod screen;
pub mod signal;
