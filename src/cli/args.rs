//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::CharacterSet;
use crate::ascii::{CharSet, GridSize};
use crate::config::{Config, MAX_SECONDS};

/// Parse and validate a grid size (COLUMNSxROWS format)
fn parse_grid_size(s: &str) -> Result<GridSize, String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid grid size '{}'. Use COLUMNSxROWS (e.g., 79x40)",
            s
        ));
    }
    let columns: u32 = parts[0]
        .parse()
        .map_err(|_| format!("Invalid column count '{}'", parts[0]))?;
    let rows: u32 = parts[1]
        .parse()
        .map_err(|_| format!("Invalid row count '{}'", parts[1]))?;
    if columns == 0 || rows == 0 {
        return Err("Grid columns and rows must be greater than 0".to_string());
    }
    Ok(GridSize::new(columns, rows))
}

/// Parse and validate a fade step count (1-1000)
fn parse_steps(s: &str) -> Result<u32, String> {
    let steps: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid step count", s))?;
    if !(1..=1000).contains(&steps) {
        return Err(format!("Steps must be between 1 and 1000, got {}", steps));
    }
    Ok(steps)
}

/// Parse and validate a duration in seconds (0-3600)
fn parse_seconds(s: &str) -> Result<f64, String> {
    let secs: f64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if !(0.0..=MAX_SECONDS).contains(&secs) {
        return Err(format!("Seconds must be between 0 and 3600, got {}", secs));
    }
    Ok(secs)
}

/// Fade short messages and pictures into the terminal as character art
#[derive(Parser, Debug)]
#[command(name = "glyph-fade")]
#[command(version, about = "Fade messages and pictures into the terminal as character art", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Fade in the captions from the config file
    glyph-fade

    # Custom captions followed by a picture
    glyph-fade \" Hello \" \"world\" --image cat.jpg

    # Faster fade on a bigger grid
    glyph-fade --steps 6 --fade-secs 1.5 --grid 120x50 \"Hi\"

    # See how the font's glyphs rank by brightness
    glyph-fade calibrate --font DejaVuSansMono.ttf")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Captions to fade in, in order (default: from config)
    pub captions: Vec<String>,

    /// Picture to show after the captions (repeatable)
    #[arg(short, long = "image", value_name = "PATH")]
    pub images: Vec<PathBuf>,

    /// Monospace font used to measure glyph brightness
    #[arg(long, global = true)]
    pub font: Option<PathBuf>,

    /// Font for captions (default: --font)
    #[arg(long)]
    pub caption_font: Option<PathBuf>,

    /// Calibration character set
    #[arg(long, global = true)]
    pub charset: Option<CharacterSet>,

    /// Console grid size in cells
    #[arg(long, value_name = "COLUMNSxROWS", value_parser = parse_grid_size, global = true)]
    pub grid: Option<GridSize>,

    /// Number of opacity steps per caption
    #[arg(long, value_parser = parse_steps)]
    pub steps: Option<u32>,

    /// Total fade time per caption in seconds
    #[arg(long, value_parser = parse_seconds)]
    pub fade_secs: Option<f64>,

    /// How long each picture stays up in seconds
    #[arg(long, value_parser = parse_seconds)]
    pub dwell_secs: Option<f64>,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the glyph brightness table, darkest first
    Calibrate,
    /// Draw one picture at full strength, without animation
    Show {
        /// Picture to draw
        path: PathBuf,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}

impl Args {
    /// Overlay command-line values on a loaded config.
    pub fn apply_to(&self, config: &mut Config) {
        if !self.captions.is_empty() {
            config.captions.texts = self.captions.clone();
        }
        if !self.images.is_empty() {
            config.images.paths = self.images.clone();
        }
        if let Some(font) = &self.font {
            config.glyphs.font = Some(font.clone());
        }
        if let Some(font) = &self.caption_font {
            config.captions.font = Some(font.clone());
        }
        if let Some(charset) = self.charset {
            config.glyphs.charset = CharSet::from(charset).name().to_string();
            config.glyphs.characters = None;
        }
        if let Some(grid) = self.grid {
            config.display.columns = grid.columns;
            config.display.rows = grid.rows;
        }
        if let Some(steps) = self.steps {
            config.fade.steps = steps;
        }
        if let Some(secs) = self.fade_secs {
            config.fade.duration_secs = secs;
        }
        if let Some(secs) = self.dwell_secs {
            config.images.dwell_secs = secs;
        }
    }
}
