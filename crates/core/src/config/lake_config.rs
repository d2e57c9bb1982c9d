//! Repository-wide defaults (`lake.yaml`)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{LAKE_FILE_NAME, read_yaml};
use crate::error::Result;

/// Root of `lake.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LakeConfig {
    pub config: LakeSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LakeSection {
    pub language_defaults: LanguageDefaults,
    pub build_defaults: BuildDefaults,
}

/// Default settings applied to every bundle unless overridden
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LanguageDefaults {
    pub java: JavaDefaults,
    pub python: PackageDefaults,
    pub javascript: PackageDefaults,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JavaDefaults {
    pub enabled: bool,
    pub group_id: String,
}

/// Defaults for ecosystems identified by a single package name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PackageDefaults {
    pub enabled: bool,
    pub package_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuildDefaults {
    /// Fallback release version used when `VERSION` is unset at publish time
    pub base_version: String,
}

impl LakeConfig {
    /// Walk upward from `start_dir` looking for `lake.yaml`.
    ///
    /// Returns `Ok(None)` when the filesystem root is reached without finding
    /// one. A file that exists but cannot be read or parsed is an error.
    pub fn discover(start_dir: &Path) -> Result<Option<Self>> {
        Self::discover_named(start_dir, LAKE_FILE_NAME)
    }

    pub fn discover_named(start_dir: &Path, file_name: &str) -> Result<Option<Self>> {
        debug!("Looking for {} starting from {:?}", file_name, start_dir);

        let Some(path) = find_upward(start_dir, file_name) else {
            debug!("No {} found above {:?}", file_name, start_dir);
            return Ok(None);
        };

        debug!("Found lake config at {:?}", path);
        Self::load_from_file(&path).map(Some)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        read_yaml(path)
    }

    pub fn base_version(&self) -> Option<&str> {
        let version = self.config.build_defaults.base_version.trim();
        (!version.is_empty()).then_some(version)
    }
}

fn find_upward(start_dir: &Path, file_name: &str) -> Option<PathBuf> {
    let mut current = Some(start_dir);

    while let Some(dir) = current {
        let candidate = dir.join(file_name);
        if candidate.exists() {
            return Some(candidate);
        }
        current = dir.parent();
    }

    None
}
