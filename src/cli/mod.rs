//! Command-line front end: argument parsing and the handlers behind each
//! subcommand.

mod args;
mod commands;
mod enums;

pub use args::{Args, Command, ConfigAction};
pub use commands::{
    build_selector, calibrate, handle_config_action, load_config, play, run, show_image,
};
pub use enums::CharacterSet;
