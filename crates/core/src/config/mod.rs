//! Configuration model for protolake bundles
//!
//! Two files drive generation:
//! - `lake.yaml`: repository-wide language defaults, found by walking upward
//! - `bundle.yaml`: per-bundle identity plus language overrides
//!
//! The two are combined by [`merge`] into a [`MergedConfig`].

mod bundle_config;
mod lake_config;
mod merge;
mod settings;

pub use bundle_config::{
    BundleConfig, BundleLanguages, BundleSection, JavaOverride, PackageOverride, Toggle,
};
pub use lake_config::{
    BuildDefaults, JavaDefaults, LakeConfig, LakeSection, LanguageDefaults, PackageDefaults,
};
pub use merge::{JavaSettings, MergedConfig, PackageSettings, merge};
pub use settings::GenerateOptions;

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::Path;

pub const LAKE_FILE_NAME: &str = "lake.yaml";
pub const BUNDLE_FILE_NAME: &str = "bundle.yaml";

/// Read and deserialize a YAML config file.
///
/// A document with no content (blank, comments only, or a bare `---`)
/// yields `T::default()`.
fn read_yaml<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    if is_blank_document(&content) {
        return Ok(T::default());
    }

    serde_yaml::from_str(&content).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

fn is_blank_document(content: &str) -> bool {
    content.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_documents() {
        assert!(is_blank_document(""));
        assert!(is_blank_document("\n  \n"));
        assert!(is_blank_document("# nothing here\n---\n"));
        assert!(!is_blank_document("name: foo"));
    }
}
