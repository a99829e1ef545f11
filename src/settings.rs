//! Generator settings, loaded from an optional TOML file
//!
//! Defaults reproduce the stock tables: a mac app icon at 16/32/128/256/512
//! points in 1x and 2x, and a universal 16 pt image set in 1x/2x/3x.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Idiom, SizeSpec};
use crate::render::RenderOptions;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "assets.toml";

/// Largest edge of a rendered PNG; an RGBA pixmap this size takes 256 MiB
pub const MAX_PIXEL_SIZE: u32 = 8192;

/// Errors loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub render: RenderSettings,
    pub appicon: AppIconSettings,
    pub imageset: ImagesetSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Load installed fonts for SVG `<text>` elements
    pub load_system_fonts: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppIconSettings {
    pub source: PathBuf,
    pub output: PathBuf,
    pub idiom: Idiom,
    /// Logical icon sizes in points
    pub sizes: Vec<u32>,
    pub scales: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesetSettings {
    /// Logical size shared by every image set, in points
    pub base_size: u32,
    pub scales: Vec<u32>,
    pub idiom: Idiom,
    /// Stop at the first failing set instead of continuing with the rest
    pub fail_fast: bool,
    pub sets: Vec<ImagesetSource>,
}

/// An SVG and the `.imageset` folder it is rendered into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagesetSource {
    pub source: PathBuf,
    pub output: PathBuf,
}

impl ImagesetSource {
    /// Parse `SVG[=FOLDER]`; without a folder the set lands in `{stem}.imageset`
    /// next to the working directory
    pub fn parse(arg: &str) -> Result<Self, ConfigError> {
        let (source, output) = match arg.split_once('=') {
            Some((source, output)) => (PathBuf::from(source), Some(PathBuf::from(output))),
            None => (PathBuf::from(arg), None),
        };
        if source.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(format!("empty SVG path in '{}'", arg)));
        }

        let output = match output {
            Some(output) if !output.as_os_str().is_empty() => output,
            Some(_) => return Err(ConfigError::Invalid(format!("empty folder in '{}'", arg))),
            None => {
                let stem = source
                    .file_stem()
                    .ok_or_else(|| ConfigError::Invalid(format!("'{}' has no file name", arg)))?;
                PathBuf::from(format!("{}.imageset", stem.to_string_lossy()))
            }
        };

        Ok(Self { source, output })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            render: RenderSettings::default(),
            appicon: AppIconSettings::default(),
            imageset: ImagesetSettings::default(),
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            load_system_fonts: true,
        }
    }
}

impl Default for AppIconSettings {
    fn default() -> Self {
        Self {
            source: PathBuf::from("AppIcon.svg"),
            output: PathBuf::from("AppIcon.appiconset"),
            idiom: Idiom::Mac,
            sizes: vec![16, 32, 128, 256, 512],
            scales: vec![1, 2],
        }
    }
}

impl Default for ImagesetSettings {
    fn default() -> Self {
        Self {
            base_size: 16,
            scales: vec![1, 2, 3],
            idiom: Idiom::Universal,
            fail_fast: false,
            sets: vec![ImagesetSource {
                source: PathBuf::from("CoffeeBean.svg"),
                output: PathBuf::from("CoffeeBean.imageset"),
            }],
        }
    }
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit path must exist. Without one, `assets.toml` in the working
    /// directory is used when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => path.to_path_buf(),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                path
            }
        };

        let settings = Self::from_file(&path)?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse a config file, resolving its relative paths against its directory
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            settings.resolve_paths(base);
        }
        settings.validate()?;
        Ok(settings)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        resolve(&mut self.appicon.source);
        resolve(&mut self.appicon.output);
        for set in &mut self.imageset.sets {
            resolve(&mut set.source);
            resolve(&mut set.output);
        }
    }

    /// Reject tables that would produce no images, zero-sized images,
    /// colliding file names or pixel sizes beyond `u32`
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_table("appicon", &self.appicon.sizes, &self.appicon.scales)?;
        validate_table("imageset", &[self.imageset.base_size], &self.imageset.scales)?;

        let mut outputs = HashSet::new();
        for set in &self.imageset.sets {
            if !outputs.insert(&set.output) {
                return Err(ConfigError::Invalid(format!(
                    "imageset folder {} is listed more than once",
                    set.output.display()
                )));
            }
        }
        Ok(())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            load_system_fonts: self.render.load_system_fonts,
        }
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn validate_table(section: &str, sizes: &[u32], scales: &[u32]) -> Result<(), ConfigError> {
    let invalid = |msg: String| Err(ConfigError::Invalid(format!("{}: {}", section, msg)));

    if sizes.is_empty() {
        return invalid("no sizes configured".to_string());
    }
    if scales.is_empty() {
        return invalid("no scales configured".to_string());
    }
    if sizes.contains(&0) {
        return invalid("sizes must be positive".to_string());
    }
    if scales.contains(&0) {
        return invalid("scales must be positive".to_string());
    }

    let mut seen = HashSet::new();
    for spec in SizeSpec::cross(sizes, scales) {
        if !seen.insert(spec) {
            return invalid(format!(
                "duplicate variant {}@{}",
                spec.size_label(),
                spec.scale_label()
            ));
        }
        match spec.pixel_size() {
            Some(pixels) if pixels <= MAX_PIXEL_SIZE => {}
            _ => {
                return invalid(format!(
                    "{}@{} is larger than {} pixels",
                    spec.size_label(),
                    spec.scale_label(),
                    MAX_PIXEL_SIZE
                ));
            }
        }
    }
    Ok(())
}
