//! Subcommand handlers for apply, list-effects and config actions.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::args::ConfigAction;
use crate::config::{default_path as get_config_path, Config, ConfigError, DEFAULT_CONFIG};
use crate::effects::{Effect, Step};
use crate::error::EffectError;
use crate::imaging::{self, ImagingError};
use crate::session::EffectSession;
use crate::slider::{SLIDER_DEFAULT_VALUE, SLIDER_MAX_VALUE};

/// Errors surfaced by the subcommands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Imaging(#[from] ImagingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Decoded image rejected by the engine
    #[error("Cannot edit '{}': {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: EffectError,
    },

    /// An effect step failed part way through
    #[error("Step {index} ({step}) failed: {source}")]
    Step {
        index: usize,
        step: Step,
        #[source]
        source: EffectError,
    },

    #[error("Config file already exists: {}\nUse 'abstract-fx config show' to view current settings.", .0.display())]
    ConfigExists(PathBuf),

    #[error("Failed to write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load `input`, replay `steps` on it and save the result to `output`.
pub fn run_apply(
    input: &Path,
    output: &Path,
    steps: &[Step],
    seed: Option<u64>,
    overwrite: bool,
) -> Result<(), CommandError> {
    // Fail before doing any work if the result could not be written anyway
    if !overwrite && output.exists() {
        return Err(ImagingError::OutputExists(output.to_path_buf()).into());
    }

    let decoded = imaging::load_bgra(input)?;

    let mut session = match seed {
        Some(seed) => EffectSession::with_seed(seed),
        None => EffectSession::new(),
    };
    session
        .load(decoded.width, decoded.height, decoded.bgra)
        .map_err(|source| CommandError::Load {
            path: input.to_path_buf(),
            source,
        })?;

    for (i, &step) in steps.iter().enumerate() {
        log::info!("Step {}: {}", i + 1, step);
        session.run(step).map_err(|source| CommandError::Step {
            index: i + 1,
            step,
            source,
        })?;
    }

    let image = session.into_image().map_err(|source| CommandError::Load {
        path: input.to_path_buf(),
        source,
    })?;
    imaging::save_bgra(&image, output, overwrite)?;
    Ok(())
}

/// Print the effect catalog to stdout.
pub fn list_effects() {
    println!("Effects:");
    for effect in Effect::ALL {
        println!("  {:<12} {}", effect.to_string(), effect.description());
    }
    println!();
    println!(
        "Sliders (position 0-{}, resting at {}):",
        SLIDER_MAX_VALUE, SLIDER_DEFAULT_VALUE
    );
    println!("  {:<12} drag pixel blocks up or down", "melt=N");
    println!("  {:<12} wash similar colors together", "wash=N");
    println!("  {:<12} scatter squares of color", "confetti=N");
    println!();
    println!("  {:<12} restore the original image", "reset");
}

/// Handle config subcommand actions.
pub fn handle_config_action(
    action: ConfigAction,
    path: Option<&Path>,
    config: &Config,
) -> Result<(), CommandError> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    match action {
        ConfigAction::Show => {
            println!("Current configuration:");
            match config.random.seed {
                Some(seed) => println!("  Seed: {}", seed),
                None => println!("  Seed: random"),
            }
            println!(
                "  Overwrite: {}",
                if config.output.overwrite { "yes" } else { "no" }
            );
            println!(
                "  Log level: {}",
                config.log.level.as_deref().unwrap_or("warn")
            );
            println!();

            if config_path.exists() {
                println!("Config file: {} (exists)", config_path.display());
            } else {
                println!("Config file: {} (not found)", config_path.display());
            }
        }
        ConfigAction::Init => {
            init_config(&config_path)?;
            println!("Created config file: {}", config_path.display());
        }
    }
    Ok(())
}

fn init_config(config_path: &Path) -> Result<(), CommandError> {
    if config_path.exists() {
        return Err(CommandError::ConfigExists(config_path.to_path_buf()));
    }

    // Create parent directories if needed
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| CommandError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(config_path, DEFAULT_CONFIG).map_err(|source| CommandError::Io {
        path: config_path.to_path_buf(),
        source,
    })
}
