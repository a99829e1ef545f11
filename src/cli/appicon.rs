//! `appicon` command

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::generator;
use crate::settings::Settings;

use super::TableArgs;

#[derive(Debug, Clone, Default, Args)]
pub struct AppIconArgs {
    /// Source SVG
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Output .appiconset folder
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Logical icon sizes in points, comma separated
    #[arg(long, value_delimiter = ',')]
    pub sizes: Option<Vec<u32>>,

    #[command(flatten)]
    pub table: TableArgs,
}

impl AppIconArgs {
    /// Layer command-line overrides on top of the loaded settings
    pub fn apply(self, settings: &mut Settings) {
        let appicon = &mut settings.appicon;
        if let Some(source) = self.source {
            appicon.source = source;
        }
        if let Some(output) = self.output {
            appicon.output = output;
        }
        if let Some(sizes) = self.sizes {
            appicon.sizes = sizes;
        }
        if let Some(scales) = self.table.scales {
            appicon.scales = scales;
        }
        if let Some(idiom) = self.table.idiom {
            appicon.idiom = idiom;
        }
    }
}

pub fn run(args: AppIconArgs, mut settings: Settings) -> anyhow::Result<()> {
    args.apply(&mut settings);
    settings.validate()?;
    generate(&settings)
}

/// Generate the app icon set and print where it went
pub fn generate(settings: &Settings) -> anyhow::Result<()> {
    let source = &settings.appicon.source;
    let report = generator::generate_appicon(&settings.appicon, &settings.render_options())
        .with_context(|| format!("Failed to generate app icon from {}", source.display()))?;

    tracing::debug!("Manifest written to {}", report.manifest_path.display());
    println!("AppIcon set generated in: {}", report.output_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Idiom;

    #[test]
    fn test_apply_overrides_only_given_fields() {
        let mut settings = Settings::default();
        let args = AppIconArgs {
            output: Some(PathBuf::from("Assets.xcassets/AppIcon.appiconset")),
            sizes: Some(vec![1024]),
            table: TableArgs {
                scales: None,
                idiom: Some(Idiom::Universal),
            },
            ..AppIconArgs::default()
        };

        args.apply(&mut settings);

        assert_eq!(settings.appicon.source, PathBuf::from("AppIcon.svg"));
        assert_eq!(settings.appicon.output, PathBuf::from("Assets.xcassets/AppIcon.appiconset"));
        assert_eq!(settings.appicon.sizes, vec![1024]);
        assert_eq!(settings.appicon.scales, vec![1, 2]);
        assert_eq!(settings.appicon.idiom, Idiom::Universal);
    }

    #[test]
    fn test_run_rejects_invalid_override() {
        let args = AppIconArgs {
            sizes: Some(vec![0]),
            ..AppIconArgs::default()
        };
        let err = run(args, Settings::default()).unwrap_err();
        assert_eq!(super::super::categorize_error(&err), super::super::exit_codes::INVALID_CONFIG);
    }
}
