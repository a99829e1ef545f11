//! Image sets: each configured SVG rendered at one base size into its own
//! `.imageset` folder

use std::path::{Path, PathBuf};

use crate::core::{GenerateError, ImageEntry, Idiom, SizeSpec};
use crate::render::{RenderOptions, SvgImage};
use crate::settings::{ImagesetSettings, ImagesetSource};

use super::{render_set, SetReport, Variant};

/// Result of one (SVG, folder) pair
#[derive(Debug)]
pub struct ImagesetOutcome {
    pub source: PathBuf,
    pub output: PathBuf,
    pub result: Result<SetReport, GenerateError>,
}

/// Per-pair results of an image set run
#[derive(Debug, Default)]
pub struct ImagesetSummary {
    pub outcomes: Vec<ImagesetOutcome>,
    /// Pairs never attempted because fail-fast stopped the run
    pub skipped: Vec<ImagesetSource>,
}

impl ImagesetSummary {
    pub fn succeeded(&self) -> impl Iterator<Item = &SetReport> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = (&ImagesetOutcome, &GenerateError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o, e)))
    }

    pub fn is_success(&self) -> bool {
        self.failed().next().is_none() && self.skipped.is_empty()
    }

    /// Total pairs requested, including skipped ones
    pub fn total(&self) -> usize {
        self.outcomes.len() + self.skipped.len()
    }
}

/// Variant file name, e.g. `CoffeeBean@3x.png`
pub fn imageset_filename(base_name: &str, spec: SizeSpec) -> String {
    format!("{}@{}.png", base_name, spec.scale_label())
}

/// Variants of one SVG at every configured scale
pub fn imageset_variants(
    base_name: &str,
    base_size: u32,
    scales: &[u32],
    idiom: Idiom,
) -> Vec<Variant> {
    SizeSpec::cross(&[base_size], scales)
        .into_iter()
        .map(|spec| Variant {
            spec,
            entry: ImageEntry::scaled(idiom, spec, imageset_filename(base_name, spec)),
        })
        .collect()
}

/// Generate a single image set
pub fn generate_imageset(
    set: &ImagesetSource,
    settings: &ImagesetSettings,
    options: &RenderOptions,
) -> Result<SetReport, GenerateError> {
    let base_name = base_name(&set.source)?;
    let source = SvgImage::open(&set.source, options)?;
    let variants =
        imageset_variants(&base_name, settings.base_size, &settings.scales, settings.idiom);
    render_set(&source, &set.output, &variants)
}

/// Generate every configured image set.
///
/// Pairs are independent: a failure is recorded and the next pair still runs,
/// unless `fail_fast` is set, in which case the remaining pairs are skipped.
pub fn generate_imagesets(settings: &ImagesetSettings, options: &RenderOptions) -> ImagesetSummary {
    let mut summary = ImagesetSummary::default();

    let mut pending = settings.sets.iter();
    for set in pending.by_ref() {
        tracing::info!(
            "Generating image set from {} into {}",
            set.source.display(),
            set.output.display()
        );
        let result = generate_imageset(set, settings, options);
        let failed = result.is_err();
        if let Err(e) = &result {
            tracing::warn!("Image set {} failed: {}", set.output.display(), e);
        }

        summary.outcomes.push(ImagesetOutcome {
            source: set.source.clone(),
            output: set.output.clone(),
            result,
        });

        if failed && settings.fail_fast {
            break;
        }
    }
    summary.skipped = pending.cloned().collect();

    summary
}

fn base_name(source: &Path) -> Result<String, GenerateError> {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| GenerateError::UnnamedSource(source.to_path_buf()))
}
