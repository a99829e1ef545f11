//! Command-line interface

pub mod appicon;
pub mod config;
pub mod imageset;
pub mod verify;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::core::{GenerateError, Idiom};
use crate::settings::{ConfigError, Settings};

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const UNEXPECTED_FAILURE: i32 = 1;
    pub const SOURCE_MISSING: i32 = 2;
    pub const RENDER_FAILURE: i32 = 3;
    pub const PARTIAL_FAILURE: i32 = 4;
    pub const VERIFY_FAILED: i32 = 5;
    pub const INVALID_CONFIG: i32 = 6;
}

#[derive(Debug, Parser)]
#[command(name = "xcassetgen", version, about = "Render SVGs into Xcode asset catalog sets")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_output: bool,

    /// Settings file (defaults to ./assets.toml when present)
    #[arg(short, long, global = true, env = "XCASSETGEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the app icon set and every image set (default)
    All,
    /// Generate the app icon set
    Appicon(appicon::AppIconArgs),
    /// Generate image sets
    Imageset(imageset::ImagesetArgs),
    /// Check generated folders against their Contents.json
    Verify(verify::VerifyArgs),
    /// Show or initialize the settings file
    Config(config::ConfigArgs),
}

/// Overrides shared by the generator commands
#[derive(Debug, Clone, Default, Args)]
pub struct TableArgs {
    /// Scale factors, comma separated
    #[arg(long, value_delimiter = ',')]
    pub scales: Option<Vec<u32>>,

    /// Idiom written to every manifest entry
    #[arg(long, value_enum)]
    pub idiom: Option<Idiom>,
}

/// Run both generators with the loaded settings.
///
/// The app icon failing does not stop the image sets from running.
pub fn run_all(settings: &Settings) -> anyhow::Result<()> {
    let appicon = appicon::generate(settings);
    let imagesets = imageset::generate(settings);

    match (appicon, imagesets) {
        (Err(e), Err(other)) => {
            eprintln!("Error: {:#}", other);
            Err(e)
        }
        (appicon, imagesets) => appicon.and(imagesets),
    }
}

/// Map an error to the exit code of its root cause
pub fn categorize_error(e: &anyhow::Error) -> i32 {
    if let Some(err) = e.downcast_ref::<GenerateError>() {
        return match err {
            GenerateError::SourceMissing(_) => exit_codes::SOURCE_MISSING,
            GenerateError::InvalidSvg { .. }
            | GenerateError::Pixmap { .. }
            | GenerateError::PixelOverflow { .. }
            | GenerateError::Encode(_) => exit_codes::RENDER_FAILURE,
            _ => exit_codes::UNEXPECTED_FAILURE,
        };
    }
    if e.downcast_ref::<ConfigError>().is_some() {
        return exit_codes::INVALID_CONFIG;
    }
    if e.downcast_ref::<imageset::PartialFailure>().is_some() {
        return exit_codes::PARTIAL_FAILURE;
    }
    if e.downcast_ref::<verify::VerifyFailed>().is_some() {
        return exit_codes::VERIFY_FAILED;
    }
    exit_codes::UNEXPECTED_FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["xcassetgen"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_appicon_overrides_parse() {
        let cli = Cli::try_parse_from([
            "xcassetgen",
            "-v",
            "appicon",
            "--sizes",
            "16,32",
            "--scales",
            "1,2,3",
            "--idiom",
            "iphone",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Appicon(args)) => {
                assert_eq!(args.sizes, Some(vec![16, 32]));
                assert_eq!(args.table.scales, Some(vec![1, 2, 3]));
                assert_eq!(args.table.idiom, Some(Idiom::Iphone));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_categorize_error() {
        let missing = anyhow::Error::new(GenerateError::SourceMissing(PathBuf::from("a.svg")))
            .context("Failed to generate app icon");
        assert_eq!(categorize_error(&missing), exit_codes::SOURCE_MISSING);

        let config = anyhow::Error::new(ConfigError::Invalid("bad".to_string()));
        assert_eq!(categorize_error(&config), exit_codes::INVALID_CONFIG);

        let partial = anyhow::Error::new(imageset::PartialFailure { failed: 1, total: 2 });
        assert_eq!(categorize_error(&partial), exit_codes::PARTIAL_FAILURE);

        assert_eq!(
            categorize_error(&anyhow::anyhow!("something else")),
            exit_codes::UNEXPECTED_FAILURE
        );
    }

    #[test]
    fn test_run_all_continues_after_appicon_failure() {
        let dir = tempfile::tempdir().unwrap();
        let bean = dir.path().join("CoffeeBean.svg");
        std::fs::write(&bean, crate::render::tests::SQUARE_SVG).unwrap();

        let mut settings = Settings::default();
        settings.render.load_system_fonts = false;
        settings.appicon.source = dir.path().join("AppIcon.svg");
        settings.appicon.output = dir.path().join("AppIcon.appiconset");
        settings.imageset.sets = vec![crate::settings::ImagesetSource {
            source: bean,
            output: dir.path().join("CoffeeBean.imageset"),
        }];

        let err = run_all(&settings).unwrap_err();
        assert_eq!(categorize_error(&err), exit_codes::SOURCE_MISSING);
        assert!(!dir.path().join("AppIcon.appiconset").exists());
        assert!(dir.path().join("CoffeeBean.imageset/Contents.json").exists());
    }
}
