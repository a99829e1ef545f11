//! Asset set generation
//!
//! Both generators reduce to the same routine: render a list of variants of
//! one source into a folder, recording each variant in the manifest only
//! after its PNG is on disk, then write `Contents.json` once everything
//! succeeded.

mod appicon;
mod imageset;

pub use appicon::*;
pub use imageset::*;

use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{GenerateError, ImageEntry, Manifest, SizeSpec};
use crate::render::{self, RasterSource};

/// One PNG to produce and the manifest entry describing it
#[derive(Debug, Clone)]
pub struct Variant {
    pub spec: SizeSpec,
    pub entry: ImageEntry,
}

impl Variant {
    pub fn filename(&self) -> &str {
        &self.entry.filename
    }
}

/// Outcome of a completed asset set
#[derive(Debug, Clone)]
pub struct SetReport {
    pub output_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
}

/// Render every variant of `source` into `output_dir` and write its manifest.
///
/// On error, PNGs written so far stay on disk and no manifest is written.
pub fn render_set(
    source: &dyn RasterSource,
    output_dir: &Path,
    variants: &[Variant],
) -> Result<SetReport, GenerateError> {
    fs::create_dir_all(output_dir).map_err(|e| GenerateError::CreateDir {
        path: output_dir.to_path_buf(),
        source: e,
    })?;

    let mut manifest = Manifest::new();
    for variant in variants {
        let pixels = variant
            .spec
            .pixel_size()
            .ok_or(GenerateError::PixelOverflow {
                base: variant.spec.base_size,
                scale: variant.spec.scale,
            })?;

        let path = output_dir.join(variant.filename());
        render::rasterize(source, &path, pixels, pixels)?;
        tracing::debug!("Wrote {} ({}x{})", path.display(), pixels, pixels);

        manifest.push(variant.entry.clone());
    }

    let manifest_path = manifest.write_to(output_dir)?;
    tracing::info!(
        "Generated {} images from {} into {}",
        manifest.len(),
        source.path().display(),
        output_dir.display()
    );

    Ok(SetReport {
        output_dir: output_dir.to_path_buf(),
        manifest_path,
        manifest,
    })
}
