//! Export settings
//!
//! The four user-editable fields that shape an export. Settings are stored
//! as JSON at the vault root and loaded fresh for every export; editing
//! produces a new value that is saved back, nothing mutates a snapshot an
//! export is already using.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants as C;
use crate::error::{ExportError, Result};

/// Render configuration for one export run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Grow heading markers with nesting depth
    #[serde(alias = "StackedHashtags")]
    pub stacked_headings: bool,
    /// Emit a title line for every embedded note
    #[serde(alias = "InsertTitles")]
    pub insert_titles: bool,
    /// Text placed before the root basename in the export name
    #[serde(alias = "Export_Prefix")]
    pub export_prefix: String,
    /// Text placed after the root basename in the export name
    #[serde(alias = "Export_Suffix")]
    pub export_suffix: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            stacked_headings: true,
            insert_titles: true,
            export_prefix: C::DEFAULT_EXPORT_PREFIX.to_string(),
            export_suffix: C::DEFAULT_EXPORT_SUFFIX.to_string(),
        }
    }
}

/// Editable settings keys, as typed on the command line
pub const SETTING_KEYS: &[&str] = &["stacked-headings", "insert-titles", "prefix", "suffix"];

impl ExportSettings {
    /// Path of the settings file for a vault
    pub fn path_in(vault_root: &Path) -> PathBuf {
        vault_root.join(C::SETTINGS_FILENAME)
    }

    /// Load settings for a vault, falling back to defaults for a missing
    /// file or missing fields
    pub fn load(vault_root: &Path) -> Result<Self> {
        let path = Self::path_in(vault_root);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| ExportError::Settings {
            path: path.clone(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ExportError::Settings {
            path,
            message: e.to_string(),
        })
    }

    /// Save settings to the vault's settings file
    pub fn save(&self, vault_root: &Path) -> Result<PathBuf> {
        let path = Self::path_in(vault_root);
        let json = serde_json::to_string_pretty(self).map_err(|e| ExportError::Settings {
            path: path.clone(),
            message: e.to_string(),
        })?;

        fs::write(&path, json + C::NEWLINE).map_err(|e| ExportError::Settings {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(path)
    }

    /// Return a copy with one field changed
    pub fn with_value(&self, key: &str, value: &str) -> std::result::Result<Self, String> {
        let mut next = self.clone();
        match key {
            "stacked-headings" => next.stacked_headings = parse_flag(value)?,
            "insert-titles" => next.insert_titles = parse_flag(value)?,
            "prefix" => next.export_prefix = value.to_string(),
            "suffix" => next.export_suffix = value.to_string(),
            _ => {
                return Err(format!(
                    "Unknown setting '{}' (expected one of: {})",
                    key,
                    SETTING_KEYS.join(", ")
                ))
            }
        }
        Ok(next)
    }

    /// Get one field as display text
    pub fn value_of(&self, key: &str) -> Option<String> {
        match key {
            "stacked-headings" => Some(self.stacked_headings.to_string()),
            "insert-titles" => Some(self.insert_titles.to_string()),
            "prefix" => Some(self.export_prefix.clone()),
            "suffix" => Some(self.export_suffix.clone()),
            _ => None,
        }
    }

    /// Refuse exports whose name could collide with the root note itself
    pub fn validate_export_name(&self) -> Result<()> {
        if self.export_prefix.is_empty() && self.export_suffix.is_empty() {
            return Err(ExportError::ConfigurationInvalid);
        }
        Ok(())
    }

    /// File name of the export artifact for a root note
    pub fn artifact_name(&self, root_basename: &str) -> String {
        format!(
            "{}{}{}{}",
            self.export_prefix,
            root_basename,
            self.export_suffix,
            C::MARKDOWN_EXTENSION
        )
    }
}

fn parse_flag(value: &str) -> std::result::Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(format!("Expected true or false, got '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = ExportSettings::default();
        assert!(settings.stacked_headings);
        assert!(settings.insert_titles);
        assert_eq!(settings.export_prefix, "");
        assert_eq!(settings.export_suffix, "_Export");
    }

    #[test]
    fn test_artifact_name() {
        let settings = ExportSettings {
            export_prefix: "pre-".to_string(),
            export_suffix: "-post".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.artifact_name("Root"), "pre-Root-post.md");
    }

    #[test]
    fn test_empty_name_parts_rejected() {
        let settings = ExportSettings {
            export_prefix: String::new(),
            export_suffix: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            settings.validate_export_name(),
            Err(ExportError::ConfigurationInvalid)
        ));
        assert!(ExportSettings::default().validate_export_name().is_ok());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = ExportSettings::load(dir.path()).unwrap();
        assert_eq!(settings, ExportSettings::default());
    }

    #[test]
    fn test_load_partial_and_plugin_keys() {
        let dir = TempDir::new().unwrap();
        fs::write(
            ExportSettings::path_in(dir.path()),
            r#"{"StackedHashtags": false, "Export_Prefix": "Full_"}"#,
        )
        .unwrap();

        let settings = ExportSettings::load(dir.path()).unwrap();
        assert!(!settings.stacked_headings);
        assert!(settings.insert_titles);
        assert_eq!(settings.export_prefix, "Full_");
        assert_eq!(settings.export_suffix, "_Export");
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let settings = ExportSettings::default()
            .with_value("insert-titles", "off")
            .unwrap()
            .with_value("suffix", "_Merged")
            .unwrap();
        settings.save(dir.path()).unwrap();

        assert_eq!(ExportSettings::load(dir.path()).unwrap(), settings);
    }

    #[test]
    fn test_invalid_file_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(ExportSettings::path_in(dir.path()), "not json").unwrap();
        assert!(matches!(
            ExportSettings::load(dir.path()),
            Err(ExportError::Settings { .. })
        ));
    }

    #[test]
    fn test_with_value_errors() {
        let settings = ExportSettings::default();
        assert!(settings.with_value("colour", "red").is_err());
        assert!(settings.with_value("stacked-headings", "maybe").is_err());
        assert_eq!(settings.value_of("prefix"), Some(String::new()));
        assert_eq!(settings.value_of("colour"), None);
    }
}
