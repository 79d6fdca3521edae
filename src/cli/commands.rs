//! Subcommand handlers for playback, calibration and config actions.

use std::io::{self, Write};
use std::path::Path;

use super::args::{Args, Command, ConfigAction};
use crate::animation::{AnimationDriver, CancelCheck, Outcome, Program};
use crate::ascii::{GlyphIntensityTable, GlyphSelector};
use crate::config::{default_path, Config, DEFAULT_CONFIG_TEMPLATE};
use crate::error::AppError;
use crate::font::{locate_font, FontError, FontRasterizer, GlyphRasterizer};
use crate::image_source::{FileImageLoader, ImageLoader};
use crate::renderer::ConsoleRenderer;
use crate::signal::{install_interrupt_handler, InterruptFlag, INTERRUPT_EXIT_CODE};

/// Dispatch parsed arguments. Returns the process exit status.
pub fn run(args: Args) -> Result<i32, AppError> {
    match &args.command {
        Some(Command::Config { action }) => {
            let path = args.config.clone().unwrap_or_else(default_path);
            let config = match action {
                ConfigAction::Show => Some(load_config(&args)?),
                ConfigAction::Init => None,
            };
            handle_config_action(action, config.as_ref(), &path, &mut io::stdout().lock())?;
            Ok(0)
        }
        Some(Command::Calibrate) => {
            let config = load_config(&args)?;
            calibrate(&config, &mut io::stdout().lock())?;
            Ok(0)
        }
        Some(Command::Show { path }) => {
            let config = load_config(&args)?;
            show_image(&config, path, io::stdout().lock())?;
            Ok(0)
        }
        None => {
            let config = load_config(&args)?;
            if let Err(e) = install_interrupt_handler() {
                log::warn!("Could not set up Ctrl+C handler: {}", e);
            }
            match play(&config, io::stdout().lock(), &InterruptFlag)? {
                Outcome::Completed(report) => {
                    for path in &report.skipped_images {
                        log::info!("Skipped unreadable image {}", path.display());
                    }
                    Ok(0)
                }
                Outcome::Cancelled => Ok(INTERRUPT_EXIT_CODE),
            }
        }
    }
}

/// Load the config file and overlay command-line values.
pub fn load_config(args: &Args) -> Result<Config, AppError> {
    let mut config = Config::load(args.config.as_deref())?;
    args.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

fn open_font(explicit: Option<&Path>) -> Result<FontRasterizer, FontError> {
    let path = locate_font(explicit)?;
    FontRasterizer::open(&path)
}

/// Calibrate the configured character set with `rasterizer`.
pub fn build_selector(
    rasterizer: &dyn GlyphRasterizer,
    config: &Config,
) -> Result<GlyphSelector, AppError> {
    let table = GlyphIntensityTable::calibrate(
        rasterizer,
        &config.charset_chars(),
        config.glyphs.size_px,
    )?;
    Ok(GlyphSelector::new(table))
}

/// Play the configured captions and pictures onto `out`.
pub fn play<W: Write>(
    config: &Config,
    out: W,
    cancel: &dyn CancelCheck,
) -> Result<Outcome, AppError> {
    let glyph_font = open_font(config.glyphs.font.as_deref())?;
    let caption_font = match &config.captions.font {
        Some(path) => Some(open_font(Some(path))?),
        None => None,
    };
    let caption_font: &dyn GlyphRasterizer = match &caption_font {
        Some(font) => font,
        None => &glyph_font,
    };

    let selector = build_selector(&glyph_font, config)?;
    let renderer = ConsoleRenderer::new(out, config.grid(), config.display.cell_aspect);
    let program = Program {
        captions: config.captions.texts.clone(),
        images: config.images.paths.clone(),
    };

    let mut driver = AnimationDriver::new(
        renderer,
        selector,
        caption_font,
        &FileImageLoader,
        config.animation_settings(),
    )
    .with_cancel(cancel);
    Ok(driver.play(&program)?)
}

/// Print the calibrated glyphs from darkest to brightest.
pub fn calibrate<W: Write>(config: &Config, out: &mut W) -> Result<(), AppError> {
    let font = open_font(config.glyphs.font.as_deref())?;
    let selector = build_selector(&font, config)?;
    write_table(selector.table(), out)?;
    Ok(())
}

fn write_table<W: Write>(table: &GlyphIntensityTable, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Glyph brightness ({} glyphs, darkest first):",
        table.len()
    )?;
    for (ch, brightness) in table.by_brightness() {
        let bar = "#".repeat((brightness * 40.0).round() as usize);
        writeln!(out, "  {:<6} {:.4}  {}", format!("{:?}", ch), brightness, bar)?;
    }
    out.flush()
}

/// Draw one picture at full strength.
pub fn show_image<W: Write>(config: &Config, path: &Path, out: W) -> Result<(), AppError> {
    let image = FileImageLoader.load(path)?;
    let font = open_font(config.glyphs.font.as_deref())?;
    let mut selector = build_selector(&font, config)?;
    let mut renderer = ConsoleRenderer::new(out, config.grid(), config.display.cell_aspect);
    renderer.render(&image, &mut selector, 1.0)?;
    Ok(())
}

/// Handle config subcommand actions.
///
/// `config` is the effective configuration and is only needed for `show`.
pub fn handle_config_action<W: Write>(
    action: &ConfigAction,
    config: Option<&Config>,
    path: &Path,
    out: &mut W,
) -> Result<(), AppError> {
    match action {
        ConfigAction::Show => {
            let config = config.cloned().unwrap_or_default();
            writeln!(out, "Current configuration:")?;
            writeln!(out)?;
            write!(out, "{}", config.to_toml()?)?;
            writeln!(out)?;
            if path.exists() {
                writeln!(out, "Config file: {} (exists)", path.display())?;
            } else {
                writeln!(out, "Config file: {} (not found)", path.display())?;
            }
        }
        ConfigAction::Init => {
            if path.exists() {
                return Err(AppError::ConfigExists {
                    path: path.to_path_buf(),
                });
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)?;
            writeln!(out, "Created config file: {}", path.display())?;
        }
    }
    Ok(())
}
