//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing and subcommand handlers.

mod args;
mod commands;

pub use args::{parse_step, Args, Command, ConfigAction};
pub use commands::{handle_config_action, list_effects, run_apply, CommandError};
