//! Per-bundle configuration (`bundle.yaml`)

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::{BUNDLE_FILE_NAME, read_yaml};
use crate::error::Result;

/// Explicit on/off override for a language.
///
/// `Unset` means the bundle does not mention the language and the lake
/// default applies. An absent key and an explicit `null` both map to `Unset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum Toggle {
    #[default]
    Unset,
    Enabled,
    Disabled,
}

impl Toggle {
    /// Resolve against an inherited value
    pub fn resolve(self, inherited: bool) -> bool {
        match self {
            Toggle::Unset => inherited,
            Toggle::Enabled => true,
            Toggle::Disabled => false,
        }
    }

    pub fn is_set(self) -> bool {
        self != Toggle::Unset
    }
}

impl From<Option<bool>> for Toggle {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Toggle::Unset,
            Some(true) => Toggle::Enabled,
            Some(false) => Toggle::Disabled,
        }
    }
}

impl From<Toggle> for Option<bool> {
    fn from(value: Toggle) -> Self {
        match value {
            Toggle::Unset => None,
            Toggle::Enabled => Some(true),
            Toggle::Disabled => Some(false),
        }
    }
}

/// Root of `bundle.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BundleConfig {
    /// Bundle identity; required
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub bundle_prefix: String,
    pub version: String,
    pub config: BundleSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BundleSection {
    pub languages: BundleLanguages,
}

/// Language overrides. Empty strings mean "not overridden".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BundleLanguages {
    pub java: JavaOverride,
    pub python: PackageOverride,
    pub javascript: PackageOverride,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JavaOverride {
    pub enabled: Toggle,
    pub group_id: String,
    pub artifact_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PackageOverride {
    pub enabled: Toggle,
    pub package_name: String,
}

impl BundleConfig {
    /// Load `bundle.yaml` from `dir`.
    ///
    /// A missing file, or one without a `name`, is `Ok(None)`: the directory
    /// is simply not a bundle. Malformed YAML is an error.
    pub fn load(dir: &Path) -> Result<Option<Self>> {
        Self::load_named(dir, BUNDLE_FILE_NAME)
    }

    pub fn load_named(dir: &Path, file_name: &str) -> Result<Option<Self>> {
        let path = dir.join(file_name);
        if !path.is_file() {
            debug!("No {} in {:?}", file_name, dir);
            return Ok(None);
        }

        let config: BundleConfig = read_yaml(&path)?;
        if config.name.trim().is_empty() {
            debug!("{:?} has no bundle name, ignoring", path);
            return Ok(None);
        }

        Ok(Some(config))
    }

    pub fn languages(&self) -> &BundleLanguages {
        &self.config.languages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::TempDir;

    fn write_bundle(content: &str) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("bundle.yaml"), content).unwrap();
        temp_dir
    }

    #[test]
    fn test_load_bundle_config() {
        let temp_dir = write_bundle(
            r#"
name: "user-service"
display_name: "User Service"
description: "User service proto definitions"
version: "1.0.0"
config:
  languages:
    java:
      enabled: true
      group_id: "com.acme.proto"
      artifact_id: "user-service-proto"
    python:
      enabled: false
"#,
        );

        let bundle = BundleConfig::load(temp_dir.path()).unwrap().unwrap();
        assert_eq!(bundle.name, "user-service");
        assert_eq!(bundle.display_name, "User Service");

        let languages = bundle.languages();
        assert_eq!(languages.java.enabled, Toggle::Enabled);
        assert_eq!(languages.java.group_id, "com.acme.proto");
        assert_eq!(languages.java.artifact_id, "user-service-proto");
        assert_eq!(languages.python.enabled, Toggle::Disabled);
        assert_eq!(languages.javascript.enabled, Toggle::Unset);
    }

    #[test]
    fn test_null_enabled_is_unset() {
        let temp_dir = write_bundle("name: b\nconfig:\n  languages:\n    python:\n      enabled: ~\n");

        let bundle = BundleConfig::load(temp_dir.path()).unwrap().unwrap();
        assert_eq!(bundle.languages().python.enabled, Toggle::Unset);
    }

    #[test]
    fn test_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        assert!(BundleConfig::load(temp_dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_missing_or_empty_name_is_none() {
        let temp_dir = write_bundle("description: no name here\n");
        assert!(BundleConfig::load(temp_dir.path()).unwrap().is_none());

        let temp_dir = write_bundle("name: \"\"\n");
        assert!(BundleConfig::load(temp_dir.path()).unwrap().is_none());

        let temp_dir = write_bundle("");
        assert!(BundleConfig::load(temp_dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_malformed_bundle_is_error() {
        let temp_dir = write_bundle("name: [unterminated\n");
        let result = BundleConfig::load(temp_dir.path());
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_toggle_resolve() {
        assert!(Toggle::Unset.resolve(true));
        assert!(!Toggle::Unset.resolve(false));
        assert!(Toggle::Enabled.resolve(false));
        assert!(!Toggle::Disabled.resolve(true));
        assert!(!Toggle::Unset.is_set());
        assert!(Toggle::Disabled.is_set());
    }
}
