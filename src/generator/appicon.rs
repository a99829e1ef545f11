//! App icon set: one SVG rendered at every size/scale slot of an `.appiconset`

use crate::core::{GenerateError, ImageEntry, SizeSpec};
use crate::render::{RenderOptions, SvgImage};
use crate::settings::AppIconSettings;

use super::{render_set, SetReport, Variant};

/// Slot file name, e.g. `icon_16x16@2x.png`
pub fn appicon_filename(spec: SizeSpec) -> String {
    format!("icon_{}@{}.png", spec.size_label(), spec.scale_label())
}

/// Variants for every size (outer) and scale (inner) in the settings
pub fn appicon_variants(settings: &AppIconSettings) -> Vec<Variant> {
    SizeSpec::cross(&settings.sizes, &settings.scales)
        .into_iter()
        .map(|spec| Variant {
            spec,
            entry: ImageEntry::sized(settings.idiom, spec, appicon_filename(spec)),
        })
        .collect()
}

/// Generate the app icon set.
///
/// The source is parsed before the output folder is touched, so a missing or
/// malformed SVG leaves nothing on disk.
pub fn generate_appicon(
    settings: &AppIconSettings,
    options: &RenderOptions,
) -> Result<SetReport, GenerateError> {
    tracing::info!(
        "Generating app icon from {} into {}",
        settings.source.display(),
        settings.output.display()
    );
    let source = SvgImage::open(&settings.source, options)?;
    render_set(&source, &settings.output, &appicon_variants(settings))
}
