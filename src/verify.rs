//! Manifest verification
//!
//! Re-reads a generated folder and checks that every manifest entry names a
//! PNG that exists with the pixel size its entry implies.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::{ImageEntry, Manifest};

/// A problem found with one manifest entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// Listed file does not exist
    Missing { filename: String },
    /// File exists but cannot be decoded
    Unreadable { filename: String, reason: String },
    /// Scale label is not of the form `Nx`
    BadScale { filename: String, scale: String },
    /// Pixel size differs from what the entry implies
    DimensionMismatch {
        filename: String,
        expected: (u32, u32),
        actual: (u32, u32),
    },
    /// Unsized entries disagree on their logical size
    InconsistentBase {
        filename: String,
        expected: u32,
        actual: u32,
    },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::Missing { filename } => write!(f, "{}: file is missing", filename),
            Issue::Unreadable { filename, reason } => {
                write!(f, "{}: unreadable ({})", filename, reason)
            }
            Issue::BadScale { filename, scale } => {
                write!(f, "{}: invalid scale '{}'", filename, scale)
            }
            Issue::DimensionMismatch {
                filename,
                expected,
                actual,
            } => write!(
                f,
                "{}: expected {}x{} px, found {}x{} px",
                filename, expected.0, expected.1, actual.0, actual.1
            ),
            Issue::InconsistentBase {
                filename,
                expected,
                actual,
            } => write!(
                f,
                "{}: logical size {}pt differs from {}pt used by other images",
                filename, actual, expected
            ),
        }
    }
}

/// Result of verifying one folder
#[derive(Debug, Clone)]
pub struct VerifyReport {
    pub dir: PathBuf,
    pub checked: usize,
    pub issues: Vec<Issue>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Verify the manifest in `dir` against the PNGs beside it.
///
/// Fails only when the manifest itself cannot be read; problems with
/// individual entries are returned as issues.
pub fn verify_dir(dir: &Path) -> anyhow::Result<VerifyReport> {
    let manifest = Manifest::read_from(dir)?;
    let mut issues = Vec::new();
    let mut base: Option<u32> = None;

    for entry in &manifest.images {
        if let Some(issue) = check_entry(dir, entry, &mut base) {
            tracing::debug!("{}: {}", dir.display(), issue);
            issues.push(issue);
        }
    }

    Ok(VerifyReport {
        dir: dir.to_path_buf(),
        checked: manifest.len(),
        issues,
    })
}

fn check_entry(dir: &Path, entry: &ImageEntry, base: &mut Option<u32>) -> Option<Issue> {
    let filename = entry.filename.clone();
    let path = dir.join(&entry.filename);
    if !path.is_file() {
        return Some(Issue::Missing { filename });
    }

    let actual = match image::image_dimensions(&path) {
        Ok(dims) => dims,
        Err(e) => {
            return Some(Issue::Unreadable {
                filename,
                reason: e.to_string(),
            })
        }
    };

    let Some(scale) = entry.scale_factor().filter(|&s| s > 0) else {
        return Some(Issue::BadScale {
            filename,
            scale: entry.scale.clone(),
        });
    };

    if let Some((w, h)) = entry.logical_size() {
        let expected = (w.saturating_mul(scale), h.saturating_mul(scale));
        return (actual != expected).then_some(Issue::DimensionMismatch {
            filename,
            expected,
            actual,
        });
    }

    // Unsized entries only constrain each other: square, whole points, one base
    let (w, h) = actual;
    if w != h || w % scale != 0 {
        let side = w.max(h).div_ceil(scale) * scale;
        return Some(Issue::DimensionMismatch {
            filename,
            expected: (side, side),
            actual,
        });
    }

    let logical = w / scale;
    match *base {
        None => {
            *base = Some(logical);
            None
        }
        Some(expected) if expected != logical => Some(Issue::InconsistentBase {
            filename,
            expected,
            actual: logical,
        }),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Idiom, SizeSpec};
    use crate::render::write_synced;

    fn blank_png(dir: &Path, name: &str, w: u32, h: u32) {
        let png = tiny_skia::Pixmap::new(w, h).unwrap().encode_png().unwrap();
        write_synced(&dir.join(name), &png).unwrap();
    }

    fn write_manifest(dir: &Path, entries: Vec<ImageEntry>) {
        let manifest = Manifest {
            images: entries,
            ..Manifest::default()
        };
        manifest.write_to(dir).unwrap();
    }

    #[test]
    fn test_consistent_imageset() {
        let dir = tempfile::tempdir().unwrap();
        let mut entries = Vec::new();
        for scale in 1..=3 {
            let name = format!("Bean@{}x.png", scale);
            blank_png(dir.path(), &name, 16 * scale, 16 * scale);
            entries.push(ImageEntry::scaled(Idiom::Universal, SizeSpec::new(16, scale), name));
        }
        write_manifest(dir.path(), entries);

        let report = verify_dir(dir.path()).unwrap();
        assert!(report.is_ok(), "{:?}", report.issues);
        assert_eq!(report.checked, 3);
    }

    #[test]
    fn test_missing_and_mis_sized_files() {
        let dir = tempfile::tempdir().unwrap();
        blank_png(dir.path(), "icon_16x16@2x.png", 16, 16);
        write_manifest(
            dir.path(),
            vec![
                ImageEntry::sized(Idiom::Mac, SizeSpec::new(16, 1), "icon_16x16@1x.png"),
                ImageEntry::sized(Idiom::Mac, SizeSpec::new(16, 2), "icon_16x16@2x.png"),
            ],
        );

        let report = verify_dir(dir.path()).unwrap();
        assert_eq!(
            report.issues,
            vec![
                Issue::Missing {
                    filename: "icon_16x16@1x.png".to_string()
                },
                Issue::DimensionMismatch {
                    filename: "icon_16x16@2x.png".to_string(),
                    expected: (32, 32),
                    actual: (16, 16),
                },
            ]
        );
    }

    #[test]
    fn test_inconsistent_base() {
        let dir = tempfile::tempdir().unwrap();
        blank_png(dir.path(), "a@1x.png", 16, 16);
        blank_png(dir.path(), "a@2x.png", 40, 40);
        write_manifest(
            dir.path(),
            vec![
                ImageEntry::scaled(Idiom::Universal, SizeSpec::new(16, 1), "a@1x.png"),
                ImageEntry::scaled(Idiom::Universal, SizeSpec::new(16, 2), "a@2x.png"),
            ],
        );

        let report = verify_dir(dir.path()).unwrap();
        assert_eq!(
            report.issues,
            vec![Issue::InconsistentBase {
                filename: "a@2x.png".to_string(),
                expected: 16,
                actual: 20,
            }]
        );
    }

    #[test]
    fn test_unreadable_png() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a@1x.png"), b"not a png").unwrap();
        write_manifest(
            dir.path(),
            vec![ImageEntry::scaled(Idiom::Universal, SizeSpec::new(16, 1), "a@1x.png")],
        );

        let report = verify_dir(dir.path()).unwrap();
        assert!(matches!(report.issues.as_slice(), [Issue::Unreadable { .. }]));
    }

    #[test]
    fn test_missing_manifest_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(verify_dir(dir.path()).is_err());
    }

    #[test]
    fn test_issue_display() {
        let issue = Issue::DimensionMismatch {
            filename: "icon_16x16@2x.png".to_string(),
            expected: (32, 32),
            actual: (16, 16),
        };
        assert_eq!(issue.to_string(), "icon_16x16@2x.png: expected 32x32 px, found 16x16 px");
    }
}
