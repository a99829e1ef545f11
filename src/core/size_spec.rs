//! Size spec model - one (base size, scale factor) variant of an asset

use serde::{Deserialize, Serialize};

/// Asset catalog idiom an image variant targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Idiom {
    /// macOS app icons
    Mac,
    /// Device-independent images
    Universal,
    Iphone,
    Ipad,
}

impl Idiom {
    pub fn as_str(&self) -> &'static str {
        match self {
            Idiom::Mac => "mac",
            Idiom::Universal => "universal",
            Idiom::Iphone => "iphone",
            Idiom::Ipad => "ipad",
        }
    }
}

impl std::fmt::Display for Idiom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A base logical size paired with a display scale factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SizeSpec {
    /// Logical size in points (square)
    pub base_size: u32,
    /// Pixel density multiplier (1x, 2x, 3x)
    pub scale: u32,
}

impl SizeSpec {
    pub fn new(base_size: u32, scale: u32) -> Self {
        Self { base_size, scale }
    }

    /// Rendered edge length in pixels, `None` on overflow
    pub fn pixel_size(&self) -> Option<u32> {
        self.base_size.checked_mul(self.scale)
    }

    /// Scale as written in a manifest, e.g. `"2x"`
    pub fn scale_label(&self) -> String {
        format!("{}x", self.scale)
    }

    /// Logical size as written in a manifest, e.g. `"16x16"`
    pub fn size_label(&self) -> String {
        format!("{0}x{0}", self.base_size)
    }

    /// Cross product of sizes and scales, sizes varying slowest
    pub fn cross(sizes: &[u32], scales: &[u32]) -> Vec<SizeSpec> {
        sizes
            .iter()
            .flat_map(|&size| scales.iter().map(move |&scale| SizeSpec::new(size, scale)))
            .collect()
    }
}
