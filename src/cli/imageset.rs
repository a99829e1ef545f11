//! `imageset` command

use anyhow::Context;
use clap::Args;
use thiserror::Error;

use crate::generator;
use crate::settings::{ImagesetSource, Settings};

use super::TableArgs;

/// Some image sets could not be generated
#[derive(Debug, Error)]
#[error("{failed} of {total} image sets failed")]
pub struct PartialFailure {
    pub failed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ImagesetArgs {
    /// Sets to generate as SVG[=FOLDER]; replaces the configured list
    pub sets: Vec<String>,

    /// Logical size in points
    #[arg(long)]
    pub base_size: Option<u32>,

    #[command(flatten)]
    pub table: TableArgs,

    /// Stop at the first failing set
    #[arg(long)]
    pub fail_fast: bool,
}

impl ImagesetArgs {
    /// Layer command-line overrides on top of the loaded settings
    pub fn apply(self, settings: &mut Settings) -> anyhow::Result<()> {
        let imageset = &mut settings.imageset;
        if !self.sets.is_empty() {
            imageset.sets = self
                .sets
                .iter()
                .map(|arg| ImagesetSource::parse(arg))
                .collect::<Result<_, _>>()?;
        }
        if let Some(base_size) = self.base_size {
            imageset.base_size = base_size;
        }
        if let Some(scales) = self.table.scales {
            imageset.scales = scales;
        }
        if let Some(idiom) = self.table.idiom {
            imageset.idiom = idiom;
        }
        imageset.fail_fast |= self.fail_fast;
        Ok(())
    }
}

pub fn run(args: ImagesetArgs, mut settings: Settings) -> anyhow::Result<()> {
    args.apply(&mut settings)?;
    settings.validate()?;
    generate(&settings)
}

/// Generate every image set, printing one line per folder
pub fn generate(settings: &Settings) -> anyhow::Result<()> {
    let mut summary = generator::generate_imagesets(&settings.imageset, &settings.render_options());

    for report in summary.succeeded() {
        tracing::debug!("Manifest written to {}", report.manifest_path.display());
        println!("Imageset generated: {}", report.output_dir.display());
    }

    // A lone set fails with its own error so the exit code names the cause
    if summary.total() == 1 {
        if let Some(outcome) = summary.outcomes.pop() {
            let output = outcome.output;
            return outcome
                .result
                .map(|_| ())
                .with_context(|| format!("Failed to generate image set {}", output.display()));
        }
    }

    let mut failed = 0;
    for (outcome, err) in summary.failed() {
        failed += 1;
        eprintln!(
            "Imageset failed: {} -> {}: {}",
            outcome.source.display(),
            outcome.output.display(),
            describe(err)
        );
    }
    for skipped in &summary.skipped {
        eprintln!("Imageset skipped: {}", skipped.output.display());
    }

    if summary.is_success() {
        Ok(())
    } else {
        Err(PartialFailure {
            failed: failed + summary.skipped.len(),
            total: summary.total(),
        }
        .into())
    }
}

/// Error message followed by its causes
fn describe(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut cause = err.source();
    while let Some(c) = cause {
        msg.push_str(": ");
        msg.push_str(&c.to_string());
        cause = c.source();
    }
    msg
}
