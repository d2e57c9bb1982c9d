//! Configuration merging logic for protolake
//!
//! Lake defaults are the base layer and the bundle overrides them:
//! - `enabled` is tri-state; an explicit bundle value always wins
//! - string fields are replaced only by a non-empty bundle value
//!
//! A bundle can therefore disable a language the lake enables, but it cannot
//! blank out an inherited string.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{BundleConfig, LakeConfig, Toggle};

/// Final settings for one bundle after merging
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MergedConfig {
    pub bundle_name: String,
    pub display_name: String,
    pub description: String,
    pub version: String,
    /// Literal fallback for `${VERSION}` in publish commands
    pub base_version: Option<String>,
    pub java: JavaSettings,
    pub python: PackageSettings,
    pub javascript: PackageSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JavaSettings {
    pub enabled: bool,
    pub group_id: String,
    pub artifact_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PackageSettings {
    pub enabled: bool,
    pub package_name: String,
}

/// Merge lake defaults with a bundle's overrides
pub fn merge(lake: Option<&LakeConfig>, bundle: &BundleConfig) -> MergedConfig {
    let mut merged = MergedConfig {
        bundle_name: bundle.name.clone(),
        display_name: bundle.display_name.clone(),
        description: bundle.description.clone(),
        version: bundle.version.clone(),
        ..MergedConfig::default()
    };

    match lake {
        Some(lake) => {
            let defaults = &lake.config.language_defaults;
            merged.java = JavaSettings {
                enabled: defaults.java.enabled,
                group_id: defaults.java.group_id.clone(),
                artifact_id: String::new(),
            };
            merged.python = PackageSettings {
                enabled: defaults.python.enabled,
                package_name: defaults.python.package_name.clone(),
            };
            merged.javascript = PackageSettings {
                enabled: defaults.javascript.enabled,
                package_name: defaults.javascript.package_name.clone(),
            };
            merged.base_version = lake.base_version().map(str::to_string);

            debug!(
                "Lake defaults - java: {}, python: {}, javascript: {}",
                defaults.java.enabled, defaults.python.enabled, defaults.javascript.enabled
            );
        }
        None => warn!("No lake configuration found for bundle {}", bundle.name),
    }

    let languages = bundle.languages();

    merged.java.enabled = languages.java.enabled.resolve(merged.java.enabled);
    override_string(&mut merged.java.group_id, &languages.java.group_id);
    override_string(&mut merged.java.artifact_id, &languages.java.artifact_id);

    merge_package(&mut merged.python, languages.python.enabled, &languages.python.package_name);
    merge_package(
        &mut merged.javascript,
        languages.javascript.enabled,
        &languages.javascript.package_name,
    );

    debug!(
        "Merged config for bundle {} - java: {:?}, python: {:?}, javascript: {:?}",
        merged.bundle_name, merged.java, merged.python, merged.javascript
    );

    merged
}

fn merge_package(base: &mut PackageSettings, enabled: Toggle, package_name: &str) {
    base.enabled = enabled.resolve(base.enabled);
    override_string(&mut base.package_name, package_name);
}

fn override_string(base: &mut String, value: &str) {
    if !value.is_empty() {
        *base = value.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{JavaDefaults, PackageDefaults};

    fn lake(java: bool, python: bool, javascript: bool) -> LakeConfig {
        let mut lake = LakeConfig::default();
        let defaults = &mut lake.config.language_defaults;
        defaults.java = JavaDefaults {
            enabled: java,
            group_id: "com.example.proto".to_string(),
        };
        defaults.python = PackageDefaults {
            enabled: python,
            package_name: "acme_proto".to_string(),
        };
        defaults.javascript = PackageDefaults {
            enabled: javascript,
            package_name: "@acme/proto".to_string(),
        };
        lake
    }

    fn bundle(name: &str) -> BundleConfig {
        BundleConfig {
            name: name.to_string(),
            ..BundleConfig::default()
        }
    }

    #[test]
    fn test_unset_toggle_inherits_lake_default() {
        let lake = lake(true, true, false);
        let merged = merge(Some(&lake), &bundle("orders"));

        assert_eq!(merged.bundle_name, "orders");
        assert!(merged.java.enabled);
        assert!(merged.python.enabled);
        assert_eq!(merged.python.package_name, "acme_proto");
        assert!(!merged.javascript.enabled);
    }

    #[test]
    fn test_explicit_toggle_wins_both_ways() {
        let lake = lake(true, false, true);
        let mut bundle = bundle("orders");
        bundle.config.languages.java.enabled = Toggle::Disabled;
        bundle.config.languages.python.enabled = Toggle::Enabled;
        bundle.config.languages.javascript.enabled = Toggle::Enabled;

        let merged = merge(Some(&lake), &bundle);
        assert!(!merged.java.enabled);
        assert!(merged.python.enabled);
        assert!(merged.javascript.enabled);
    }

    #[test]
    fn test_no_lake_defaults_to_disabled() {
        let merged = merge(None, &bundle("orders"));
        assert_eq!(merged.java, JavaSettings::default());
        assert_eq!(merged.python, PackageSettings::default());
        assert_eq!(merged.javascript, PackageSettings::default());
        assert_eq!(merged.base_version, None);
    }

    #[test]
    fn test_non_empty_string_overrides_default() {
        let lake = lake(true, true, true);
        let mut bundle = bundle("orders");
        bundle.config.languages.java.group_id = "com.orders".to_string();
        bundle.config.languages.java.artifact_id = "orders-proto".to_string();
        bundle.config.languages.python.package_name = "orders_proto".to_string();

        let merged = merge(Some(&lake), &bundle);
        assert_eq!(merged.java.group_id, "com.orders");
        assert_eq!(merged.java.artifact_id, "orders-proto");
        assert_eq!(merged.python.package_name, "orders_proto");
        // Untouched strings keep the default
        assert_eq!(merged.javascript.package_name, "@acme/proto");
    }

    #[test]
    fn test_empty_string_never_erases_default() {
        let lake = lake(true, true, true);
        let mut bundle = bundle("orders");
        bundle.config.languages.java.group_id = String::new();
        bundle.config.languages.python.package_name = String::new();

        let merged = merge(Some(&lake), &bundle);
        assert_eq!(merged.java.group_id, "com.example.proto");
        assert_eq!(merged.python.package_name, "acme_proto");
    }

    #[test]
    fn test_base_version_carried_from_lake() {
        let mut lake = lake(true, false, false);
        lake.config.build_defaults.base_version = "3.1.0".to_string();

        let merged = merge(Some(&lake), &bundle("orders"));
        assert_eq!(merged.base_version.as_deref(), Some("3.1.0"));
    }
}
