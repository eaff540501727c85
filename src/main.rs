use abstract_fx::cli::{self, Args, Command};
use abstract_fx::config::Config;
use abstract_fx::logger;
use clap::Parser;

fn main() {
    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    logger::init(logger::level_for(args.verbose, config.log.level_filter()));
    if config.log.level.is_some() && config.log.level_filter().is_none() {
        log::warn!(
            "Ignoring unknown log level {:?} in config",
            config.log.level.as_deref().unwrap_or_default()
        );
    }

    let result = match args.command {
        Command::Apply {
            input,
            output,
            steps,
            seed,
            force,
        } => cli::run_apply(
            &input,
            &output,
            &steps,
            seed.or(config.random.seed),
            force || config.output.overwrite,
        ),
        Command::ListEffects => {
            cli::list_effects();
            Ok(())
        }
        Command::Config { action } => {
            cli::handle_config_action(action, args.config.as_deref(), &config)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
