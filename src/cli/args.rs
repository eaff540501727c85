//! CLI argument parsing with clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::effects::Step;

/// Parse a step such as `zeus`, `melt=70` or `reset`.
pub fn parse_step(s: &str) -> Result<Step, String> {
    s.parse()
}

/// Apply stylized pixel effects to JPEG and PNG images
#[derive(Parser, Debug)]
#[command(name = "abstract-fx")]
#[command(version, about = "Stylized pixel effects for JPEG and PNG images", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Two button effects in a row
    abstract-fx apply photo.jpg -o out.png -s zeus -s strie

    # Move the melt slider up to 70, then scatter confetti
    abstract-fx apply photo.png -o out.png -s melt=70 -s confetti=90 --seed 3

    # List available effects
    abstract-fx list-effects")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Log progress to stderr (repeat for more detail)
    #[arg(long, short, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply a sequence of effects to an image
    Apply {
        /// Image to edit (JPEG or PNG, 4 to 1500 pixels per side)
        input: PathBuf,

        /// Where to write the result (.jpg, .jpeg or .png)
        #[arg(long, short)]
        output: PathBuf,

        /// Effect, slider position or reset, applied in order (e.g. zeus, melt=70, reset)
        #[arg(long = "step", short, value_parser = parse_step, required = true)]
        steps: Vec<Step>,

        /// Seed for confetti placement
        #[arg(long)]
        seed: Option<u64>,

        /// Overwrite the output file if it exists
        #[arg(long, short)]
        force: bool,
    },
    /// List available effects and sliders
    ListEffects,
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
