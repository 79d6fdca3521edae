//! Configuration file handling for glyph-fade.
//!
//! Loads configuration from `~/.config/glyph-fade/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::animation::AnimationSettings;
use crate::ascii::{CharSet, GridSize, DEFAULT_CELL_ASPECT, DEFAULT_GLYPH_SIZE_PX};

/// Configuration file structure for glyph-fade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub fade: FadeConfig,
    #[serde(default)]
    pub glyphs: GlyphConfig,
    #[serde(default)]
    pub captions: CaptionConfig,
    #[serde(default)]
    pub images: ImageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub columns: u32,
    pub rows: u32,
    /// Width of a character cell divided by its height
    pub cell_aspect: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            columns: GridSize::DEFAULT.columns,
            rows: GridSize::DEFAULT.rows,
            cell_aspect: DEFAULT_CELL_ASPECT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    pub steps: u32,
    pub duration_secs: f64,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            steps: 12,
            duration_secs: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
    /// Preset name: letters, standard, blocks, minimal
    pub charset: String,
    /// Literal characters; overrides `charset` when set
    pub characters: Option<String>,
    pub size_px: f32,
    /// Monospace font used for calibration
    pub font: Option<PathBuf>,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            charset: CharSet::default().name().to_string(),
            characters: None,
            size_px: DEFAULT_GLYPH_SIZE_PX,
            font: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionConfig {
    pub texts: Vec<String>,
    /// Font for captions; falls back to the glyph font
    pub font: Option<PathBuf>,
    pub max_size: u32,
    pub size_budget: u32,
    pub lead_in_ms: u64,
    pub settle_ms: u64,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            texts: default_captions(),
            font: None,
            max_size: 30,
            size_budget: 200,
            lead_in_ms: 300,
            settle_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub paths: Vec<PathBuf>,
    pub dwell_secs: f64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            dwell_secs: 4.0,
        }
    }
}

fn default_captions() -> Vec<String> {
    [" Happy ", "birthday", " to ", " you! "]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;
            Self::parse(&content).map_err(|e| match e {
                ConfigError::Parse { source, .. } => ConfigError::Parse {
                    path: path.clone(),
                    source,
                },
                other => other,
            })
        } else {
            log::debug!("No config at {}, using defaults", path.display());
            Ok(Config::default())
        }
    }

    /// Parse and validate TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the animation cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str, reason: &str| ConfigError::Invalid {
            field,
            reason: reason.to_string(),
        };
        if self.display.columns == 0 || self.display.rows == 0 {
            return Err(invalid("display", "columns and rows must be at least 1"));
        }
        if !(self.display.cell_aspect.is_finite() && self.display.cell_aspect > 0.0) {
            return Err(invalid("display.cell_aspect", "must be a positive number"));
        }
        if self.fade.steps == 0 {
            return Err(invalid("fade.steps", "must be at least 1"));
        }
        if !is_duration(self.fade.duration_secs) {
            return Err(invalid("fade.duration_secs", "must be between 0 and 3600 seconds"));
        }
        if !is_duration(self.images.dwell_secs) {
            return Err(invalid("images.dwell_secs", "must be between 0 and 3600 seconds"));
        }
        if !(self.glyphs.size_px.is_finite() && self.glyphs.size_px > 0.0) {
            return Err(invalid("glyphs.size_px", "must be a positive number"));
        }
        if self.glyphs.characters.is_none() && CharSet::from_name(&self.glyphs.charset).is_none() {
            return Err(invalid(
                "glyphs.charset",
                "expected one of: letters, standard, blocks, minimal",
            ));
        }
        if self.captions.max_size == 0 {
            return Err(invalid("captions.max_size", "must be at least 1"));
        }
        Ok(())
    }

    /// Characters to calibrate.
    pub fn charset_chars(&self) -> String {
        match &self.glyphs.characters {
            Some(chars) => chars.clone(),
            None => CharSet::from_name(&self.glyphs.charset)
                .unwrap_or_default()
                .chars()
                .to_string(),
        }
    }

    pub fn grid(&self) -> GridSize {
        GridSize::new(self.display.columns, self.display.rows)
    }

    pub fn animation_settings(&self) -> AnimationSettings {
        AnimationSettings {
            fade_steps: self.fade.steps,
            fade_duration: Duration::from_secs_f64(self.fade.duration_secs),
            caption_lead_in: Duration::from_millis(self.captions.lead_in_ms),
            caption_settle: Duration::from_millis(self.captions.settle_ms),
            image_dwell: Duration::from_secs_f64(self.images.dwell_secs),
            caption_max_size: self.captions.max_size,
            caption_size_budget: self.captions.size_budget,
        }
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }
}

/// Longest wait any timing setting may ask for.
pub const MAX_SECONDS: f64 = 3600.0;

fn is_duration(secs: f64) -> bool {
    (0.0..=MAX_SECONDS).contains(&secs)
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("glyph-fade").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/glyph-fade/config.toml")
        })
}

/// Commented template written by `config init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# glyph-fade configuration

[display]
# Console grid in character cells
columns = 79
rows = 40
# Character cell width divided by its height
cell_aspect = 0.6

[fade]
# Opacity levels per caption and total fade time
steps = 12
duration_secs = 4.0

[glyphs]
# Calibration palette: letters, standard, blocks, minimal
charset = "letters"
# Or list the characters yourself
# characters = " .:-=+*#%@"
size_px = 12.0
# Monospace font used to measure glyph brightness
# font = "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf"

[captions]
texts = [" Happy ", "birthday", " to ", " you! "]
# font = "/path/to/caption-font.ttf"
max_size = 30
size_budget = 200
lead_in_ms = 300
settle_ms = 100

[images]
# Pictures shown after the captions; missing files are skipped
paths = []
dwell_secs = 4.0
"#;
