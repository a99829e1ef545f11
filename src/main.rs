//! xcassetgen - render SVG sources into Xcode asset catalog sets
//!
//! Produces:
//! - an `.appiconset` with one PNG per size/scale slot (`xcassetgen appicon`)
//! - one `.imageset` per configured SVG at 1x/2x/3x (`xcassetgen imageset`)
//! - a `Contents.json` manifest in every generated folder
//!
//! Running without a command generates both from `assets.toml` or the
//! built-in defaults.

mod cli;
mod core;
mod generator;
mod logging;
mod render;
mod settings;
mod verify;

use clap::Parser;
use cli::{exit_codes, Cli, Commands};
use settings::Settings;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.json_output) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::UNEXPECTED_FAILURE;
    }

    let command = cli.command.unwrap_or(Commands::All);
    let config_path = cli.config.as_deref();

    let result = match command {
        Commands::All => load_settings(config_path).and_then(|s| cli::run_all(&s)),
        Commands::Appicon(args) => {
            load_settings(config_path).and_then(|s| cli::appicon::run(args, s))
        }
        Commands::Imageset(args) => {
            load_settings(config_path).and_then(|s| cli::imageset::run(args, s))
        }
        Commands::Verify(args) => cli::verify::run(args),
        // Initializing must work before the file it creates exists
        Commands::Config(args) if args.init => {
            cli::config::run(args, Settings::default(), config_path)
        }
        Commands::Config(args) => {
            load_settings(config_path).and_then(|s| cli::config::run(args, s, config_path))
        }
    };

    match result {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            cli::categorize_error(&e)
        }
    }
}

fn load_settings(path: Option<&std::path::Path>) -> anyhow::Result<Settings> {
    Ok(Settings::load(path)?)
}
