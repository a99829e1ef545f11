//! Contents.json model - the asset catalog manifest of one output folder

use std::fs;
use std::path::{Path, PathBuf};

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::{GenerateError, Idiom, SizeSpec};

/// File name of the manifest inside every asset folder
pub const MANIFEST_FILE: &str = "Contents.json";

/// One image variant listed in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageEntry {
    pub idiom: Idiom,
    /// Scale label, e.g. `"2x"`
    pub scale: String,
    /// Logical size label, e.g. `"16x16"`; only app icon entries carry one
    #[serde(default)]
    pub size: Option<String>,
    pub filename: String,
}

impl ImageEntry {
    /// Entry for an app icon slot, which records its logical size
    pub fn sized(idiom: Idiom, spec: SizeSpec, filename: impl Into<String>) -> Self {
        Self {
            idiom,
            scale: spec.scale_label(),
            size: Some(spec.size_label()),
            filename: filename.into(),
        }
    }

    /// Entry for an image set variant, identified by scale alone
    pub fn scaled(idiom: Idiom, spec: SizeSpec, filename: impl Into<String>) -> Self {
        Self {
            idiom,
            scale: spec.scale_label(),
            size: None,
            filename: filename.into(),
        }
    }

    /// Numeric scale factor parsed back from the label
    pub fn scale_factor(&self) -> Option<u32> {
        self.scale.strip_suffix('x')?.parse().ok()
    }

    /// Logical (width, height) parsed back from the size label
    pub fn logical_size(&self) -> Option<(u32, u32)> {
        let (w, h) = self.size.as_deref()?.split_once('x')?;
        Some((w.parse().ok()?, h.parse().ok()?))
    }
}

// Sized entries are written `idiom, scale, size, filename` and unsized ones
// `idiom, filename, scale`, matching what Xcode emits for each set type.
impl Serialize for ImageEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.size {
            Some(size) => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("idiom", &self.idiom)?;
                map.serialize_entry("scale", &self.scale)?;
                map.serialize_entry("size", size)?;
                map.serialize_entry("filename", &self.filename)?;
                map.end()
            }
            None => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("idiom", &self.idiom)?;
                map.serialize_entry("filename", &self.filename)?;
                map.serialize_entry("scale", &self.scale)?;
                map.end()
            }
        }
    }
}

/// Static authoring block at the end of every manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestInfo {
    pub author: String,
    pub version: u32,
}

impl Default for ManifestInfo {
    fn default() -> Self {
        Self {
            author: "xcode".to_string(),
            version: 1,
        }
    }
}

/// The `Contents.json` of an `.appiconset` or `.imageset` folder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub images: Vec<ImageEntry>,
    #[serde(default)]
    pub info: ManifestInfo,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an image; callers push only after the PNG is on disk
    pub fn push(&mut self, entry: ImageEntry) {
        self.images.push(entry);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Pretty JSON with 2-space indent and no trailing newline
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Replace `dir/Contents.json`, going through a temporary file so a crash
    /// never leaves a truncated manifest behind
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, GenerateError> {
        let json = self.to_json()?;
        let path = dir.join(MANIFEST_FILE);
        let tmp = dir.join(format!("{}.tmp", MANIFEST_FILE));

        // Synced before the rename so the swap never exposes a short file
        crate::render::write_synced(&tmp, json.as_bytes())?;
        fs::rename(&tmp, &path).map_err(|source| GenerateError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    pub fn read_from(dir: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let path = dir.join(MANIFEST_FILE);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid manifest {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appicon_entry() -> ImageEntry {
        ImageEntry::sized(Idiom::Mac, SizeSpec::new(16, 2), "icon_16x16@2x.png")
    }

    fn imageset_entry() -> ImageEntry {
        ImageEntry::scaled(Idiom::Universal, SizeSpec::new(16, 3), "CoffeeBean@3x.png")
    }

    #[test]
    fn test_sized_entry_key_order() {
        let json = serde_json::to_string(&appicon_entry()).unwrap();
        assert_eq!(
            json,
            r#"{"idiom":"mac","scale":"2x","size":"16x16","filename":"icon_16x16@2x.png"}"#
        );
    }

    #[test]
    fn test_scaled_entry_key_order() {
        let json = serde_json::to_string(&imageset_entry()).unwrap();
        assert_eq!(
            json,
            r#"{"idiom":"universal","filename":"CoffeeBean@3x.png","scale":"3x"}"#
        );
    }

    #[test]
    fn test_pretty_layout() {
        let mut manifest = Manifest::new();
        manifest.push(imageset_entry());
        let expected = "{\n  \"images\": [\n    {\n      \"idiom\": \"universal\",\n      \
                        \"filename\": \"CoffeeBean@3x.png\",\n      \
                        \"scale\": \"3x\"\n    }\n  ],\n  \
                        \"info\": {\n    \"author\": \"xcode\",\n    \"version\": 1\n  }\n}";
        assert_eq!(manifest.to_json().unwrap(), expected);
    }

    #[test]
    fn test_round_trip_is_byte_identical() {
        let mut manifest = Manifest::new();
        manifest.push(appicon_entry());
        manifest.push(ImageEntry::sized(Idiom::Mac, SizeSpec::new(512, 1), "icon_512x512@1x.png"));

        let json = manifest.to_json().unwrap();
        let parsed = Manifest::from_json(&json).unwrap();
        assert_eq!(parsed, manifest);
        assert_eq!(parsed.to_json().unwrap(), json);
    }

    #[test]
    fn test_parsed_labels() {
        let entry = appicon_entry();
        assert_eq!(entry.scale_factor(), Some(2));
        assert_eq!(entry.logical_size(), Some((16, 16)));
        assert_eq!(imageset_entry().logical_size(), None);
    }

    #[test]
    fn test_write_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "stale").unwrap();

        let mut manifest = Manifest::new();
        manifest.push(imageset_entry());
        let path = manifest.write_to(dir.path()).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), manifest.to_json().unwrap());
        assert!(!dir.path().join("Contents.json.tmp").exists());
        assert_eq!(Manifest::read_from(dir.path()).unwrap(), manifest);
    }

    #[test]
    fn test_write_over_leftover_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = dir.path().join("Contents.json.tmp");
        std::fs::write(&tmp, "x".repeat(4096)).unwrap();

        let manifest = Manifest::new();
        let path = manifest.write_to(dir.path()).unwrap();

        // The temp file is truncated on reuse, not appended to
        assert_eq!(std::fs::read_to_string(&path).unwrap(), manifest.to_json().unwrap());
        assert!(!tmp.exists());
    }

    #[test]
    fn test_write_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("Gone.imageset");

        let result = Manifest::new().write_to(&missing);
        let tmp = missing.join("Contents.json.tmp");
        assert!(matches!(result, Err(GenerateError::Write { path, .. }) if path == tmp));
        assert!(!missing.exists());
    }
}
