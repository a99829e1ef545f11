//! SVG rasterization backed by usvg, resvg and tiny-skia

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::core::GenerateError;

/// Something that can be rendered to a PNG of an exact pixel size
pub trait RasterSource {
    /// Path the image was loaded from, used in messages
    fn path(&self) -> &Path;

    /// Render to encoded PNG bytes of `width` x `height` pixels
    fn render_png(&self, width: u32, height: u32) -> Result<Vec<u8>, GenerateError>;
}

/// Options applied when parsing SVG sources
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Make installed fonts available to `<text>` elements
    pub load_system_fonts: bool,
}

/// A parsed SVG document
pub struct SvgImage {
    path: PathBuf,
    tree: usvg::Tree,
}

impl SvgImage {
    /// Read and parse an SVG file; relative hrefs resolve next to the file
    pub fn open(path: &Path, options: &RenderOptions) -> Result<Self, GenerateError> {
        let data = fs::read(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => GenerateError::SourceMissing(path.to_path_buf()),
            _ => GenerateError::SourceRead {
                path: path.to_path_buf(),
                source,
            },
        })?;

        Self::from_data(path, &data, options)
    }

    /// Parse SVG bytes that were loaded from `path`
    pub fn from_data(
        path: &Path,
        data: &[u8],
        options: &RenderOptions,
    ) -> Result<Self, GenerateError> {
        let mut opt = usvg::Options {
            resources_dir: path.parent().map(Path::to_path_buf),
            ..usvg::Options::default()
        };
        if options.load_system_fonts {
            Arc::make_mut(&mut opt.fontdb).load_system_fonts();
        }

        let tree =
            usvg::Tree::from_data(data, &opt).map_err(|source| GenerateError::InvalidSvg {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            "Parsed {} ({} x {})",
            path.display(),
            tree.size().width(),
            tree.size().height()
        );

        Ok(Self {
            path: path.to_path_buf(),
            tree,
        })
    }

    /// Intrinsic (width, height) of the document in user units
    pub fn size(&self) -> (f32, f32) {
        (self.tree.size().width(), self.tree.size().height())
    }
}

impl RasterSource for SvgImage {
    fn path(&self) -> &Path {
        &self.path
    }

    fn render_png(&self, width: u32, height: u32) -> Result<Vec<u8>, GenerateError> {
        let mut pixmap =
            tiny_skia::Pixmap::new(width, height).ok_or(GenerateError::Pixmap { width, height })?;

        let (svg_w, svg_h) = self.size();
        let transform = fit_transform(svg_w, svg_h, width, height);
        resvg::render(&self.tree, transform, &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| GenerateError::Encode(e.to_string()))
    }
}

/// Uniform scale that fits the document inside the target box, centered
/// on the axis with slack (SVG `xMidYMid meet`)
pub fn fit_transform(svg_w: f32, svg_h: f32, width: u32, height: u32) -> tiny_skia::Transform {
    let scale = (width as f32 / svg_w).min(height as f32 / svg_h);
    let tx = (width as f32 - svg_w * scale) / 2.0;
    let ty = (height as f32 - svg_h * scale) / 2.0;
    tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, tx, ty)
}

/// Render `source` to a `width` x `height` PNG at `dest`.
///
/// The file is on disk when this returns `Ok`.
pub fn rasterize(
    source: &dyn RasterSource,
    dest: &Path,
    width: u32,
    height: u32,
) -> Result<(), GenerateError> {
    let png = source.render_png(width, height)?;
    write_synced(dest, &png)
}

/// Write `bytes` to `dest` and flush them to disk before returning
pub fn write_synced(dest: &Path, bytes: &[u8]) -> Result<(), GenerateError> {
    use std::io::Write;

    let to_err = |source: std::io::Error| GenerateError::Write {
        path: dest.to_path_buf(),
        source,
    };
    let mut file = fs::File::create(dest).map_err(to_err)?;
    file.write_all(bytes).map_err(to_err)?;
    file.sync_all().map_err(to_err)
}
