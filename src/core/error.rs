//! Errors raised while generating an asset set

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while rasterizing a source or writing its outputs
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Source image not found: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("Failed to read source image {}", path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse SVG {}", path.display())]
    InvalidSvg {
        path: PathBuf,
        #[source]
        source: usvg::Error,
    },

    #[error("Source path has no file name: {}", .0.display())]
    UnnamedSource(PathBuf),

    #[error("Failed to create output directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{base}pt at {scale}x does not fit in a pixel size")]
    PixelOverflow { base: u32, scale: u32 },

    #[error("Cannot allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize manifest")]
    Serialize(#[from] serde_json::Error),
}
