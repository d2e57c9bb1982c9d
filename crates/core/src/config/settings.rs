use serde::{Deserialize, Serialize};

use super::{BUNDLE_FILE_NAME, LAKE_FILE_NAME};

/// Settings for one generation run.
///
/// Passed explicitly to every call; nothing here is process-global.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", default)]
pub struct GenerateOptions {
    /// When false, generation produces no rules at all
    pub enabled: bool,
    /// Import prefixes that are always provided externally (never resolved)
    pub well_known_prefixes: Vec<String>,
    pub bundle_file_name: String,
    pub lake_file_name: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            well_known_prefixes: vec!["google/".to_string()],
            bundle_file_name: BUNDLE_FILE_NAME.to_string(),
            lake_file_name: LAKE_FILE_NAME.to_string(),
        }
    }
}

impl GenerateOptions {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn is_well_known(&self, import_path: &str) -> bool {
        self.well_known_prefixes
            .iter()
            .any(|prefix| import_path.starts_with(prefix.as_str()))
    }
}
