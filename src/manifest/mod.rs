use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::versions::GameVersion;

/// Metadata a graphics pack may ship as `manifest.json` in its root folder,
/// describing the pack and the game versions it supports.
#[derive(Debug, Deserialize)]
pub struct PackManifest {
    /// Display name of the pack.
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    /// The pack's own version string, unrelated to game versions.
    #[serde(default)]
    pub version: Option<String>,
    /// Prefix identifying this pack's folder across renames.
    #[serde(default)]
    pub folder_prefix: Option<String>,
    /// Earliest supported game version, inclusive.
    #[serde(default)]
    pub df_min_version: Option<String>,
    /// Latest supported game version, inclusive.
    #[serde(default)]
    pub df_max_version: Option<String>,
}

/// Custom error type for `read_manifest`.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read the file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),
    #[error("Manifest has an empty title")]
    EmptyTitle,
}

/// Parses a pack's `manifest.json` and returns its contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read, if the contents cannot be
/// deserialized as JSON, or if the title is empty.
pub fn read_manifest<P: AsRef<Path>>(path: P) -> Result<PackManifest, ManifestError> {
    let content = fs::read_to_string(path)?;
    let manifest: PackManifest = serde_json::from_str(&content)?;
    if manifest.title.is_empty() {
        return Err(ManifestError::EmptyTitle);
    }
    Ok(manifest)
}

impl PackManifest {
    /// Whether the pack supports the given game version. Bounds the manifest
    /// leaves out are unconstrained.
    pub fn is_compatible(&self, version: &GameVersion) -> bool {
        if let Some(min) = &self.df_min_version {
            if version.as_str() < min.as_str() {
                return false;
            }
        }
        if let Some(max) = &self.df_max_version {
            if version.as_str() > max.as_str() {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_temp_manifest(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("manifest.json");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, file_path)
    }

    #[test]
    fn parses_valid_manifest_file() {
        let content = r#"{
        "title": "Mayday",
        "author": "Mike Mayday",
        "version": "1.0",
        "df_min_version": "0.40.01",
        "df_max_version": "0.40.24"
    }"#;
        let (_dir, file_path) = write_temp_manifest(content);
        let manifest = read_manifest(&file_path).unwrap();
        assert_eq!(manifest.title, "Mayday");
        assert_eq!(manifest.author.as_deref(), Some("Mike Mayday"));
        assert_eq!(manifest.df_min_version.as_deref(), Some("0.40.01"));
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let (_dir, file_path) = write_temp_manifest(r#"{"title": "Spacefox"}"#);
        let manifest = read_manifest(&file_path).unwrap();
        assert_eq!(manifest.title, "Spacefox");
        assert!(manifest.author.is_none());
        assert!(manifest.folder_prefix.is_none());
    }

    #[test]
    fn returns_error_for_missing_file() {
        assert!(read_manifest("non_existent_manifest.json").is_err());
    }

    #[test]
    fn returns_error_for_invalid_json() {
        let (_dir, file_path) = write_temp_manifest(r#"{"title": 3}"#);
        assert!(read_manifest(&file_path).is_err());
    }

    #[test]
    fn returns_error_for_empty_title() {
        let (_dir, file_path) = write_temp_manifest(r#"{"title": ""}"#);
        assert!(matches!(
            read_manifest(&file_path),
            Err(ManifestError::EmptyTitle)
        ));
    }

    #[test]
    fn compatibility_honors_inclusive_bounds() {
        let (_dir, file_path) = write_temp_manifest(
            r#"{"title": "Mayday", "df_min_version": "0.40.01", "df_max_version": "0.40.24"}"#,
        );
        let manifest = read_manifest(&file_path).unwrap();
        assert!(manifest.is_compatible(&GameVersion::from("0.40.01")));
        assert!(manifest.is_compatible(&GameVersion::from("0.40.24")));
        assert!(!manifest.is_compatible(&GameVersion::from("0.34.11")));
        assert!(!manifest.is_compatible(&GameVersion::from("0.42.06")));
    }

    #[test]
    fn unbounded_manifest_accepts_any_version() {
        let (_dir, file_path) = write_temp_manifest(r#"{"title": "ASCII"}"#);
        let manifest = read_manifest(&file_path).unwrap();
        assert!(manifest.is_compatible(&GameVersion::from("0.21.93.19a")));
        assert!(manifest.is_compatible(&GameVersion::from("0.47.05")));
    }
}
