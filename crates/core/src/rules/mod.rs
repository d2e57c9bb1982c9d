//! Generated rule records and the per-language handlers that produce them

mod java;
mod javascript;
mod publish;
mod python;
mod synthesize;

pub use java::JavaRules;
pub use javascript::JavaScriptRules;
pub use publish::{DEFAULT_VERSION, PublishTarget};
pub use python::PythonRules;
pub use synthesize::{RuleSynthesizer, VALIDATION_RULE};

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::MergedConfig;

pub const VISIBILITY_PUBLIC: &str = "//visibility:public";

/// One generated build rule: kind, name and attributes.
///
/// Rules refer to each other only through label strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub kind: String,
    pub name: String,
    pub attrs: BTreeMap<String, AttrValue>,
}

impl Rule {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn set_attr(&mut self, key: &str, value: impl Into<AttrValue>) {
        self.attrs.insert(key.to_string(), value.into());
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    pub fn attr_str(&self, key: &str) -> Option<&str> {
        match self.attrs.get(key) {
            Some(AttrValue::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Label of this rule from within the same package
    pub fn label(&self) -> String {
        format!(":{}", self.name)
    }
}

/// Attribute values a rule can carry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    String(String),
    List(Vec<String>),
    Platform(PlatformStrings),
}

impl AttrValue {
    /// The string items of a list-valued attribute (generic part only for
    /// platform lists)
    pub fn items(&self) -> &[String] {
        match self {
            AttrValue::String(_) => &[],
            AttrValue::List(items) => items,
            AttrValue::Platform(strings) => &strings.generic,
        }
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::String(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::String(value.to_string())
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        AttrValue::List(value)
    }
}

impl From<PlatformStrings> for AttrValue {
    fn from(value: PlatformStrings) -> Self {
        AttrValue::Platform(value)
    }
}

/// A string list that may be partitioned by platform.
///
/// Generated bundles only use the generic part.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlatformStrings {
    pub generic: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub platforms: BTreeMap<String, Vec<String>>,
}

impl PlatformStrings {
    pub fn generic<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            generic: items.into_iter().map(Into::into).collect(),
            platforms: BTreeMap::new(),
        }
    }
}

/// The ecosystems a bundle can publish to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Python,
    JavaScript,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Java => "java",
            Language::Python => "python",
            Language::JavaScript => "javascript",
        };
        f.write_str(name)
    }
}

/// Trait for generating one language's rules for a bundle
pub trait LanguageRules: Send + Sync {
    fn language(&self) -> Language;

    fn is_enabled(&self, config: &MergedConfig) -> bool;

    /// Required identity fields that are empty in `config`
    fn missing_identity(&self, config: &MergedConfig) -> Vec<&'static str>;

    /// Name of the bundle/package rule for `bundle_name`
    fn bundle_rule_name(&self, bundle_name: &str) -> String;

    /// Stub library, bundle, publish and alias rules over `protos`
    fn generate(&self, config: &MergedConfig, protos: &[String], version_fallback: &str) -> Vec<Rule>;
}

/// A `load()` the BUILD writer must declare for emitted kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadInfo {
    pub name: &'static str,
    pub symbols: &'static [&'static str],
}

static LOADS: [LoadInfo; 4] = [
    LoadInfo {
        name: "@rules_proto_grpc_java//:defs.bzl",
        symbols: &["java_grpc_library"],
    },
    LoadInfo {
        name: "@rules_proto_grpc_python//:defs.bzl",
        symbols: &["python_grpc_library"],
    },
    LoadInfo {
        name: "@rules_proto_grpc_js//:defs.bzl",
        symbols: &["js_grpc_library", "js_grpc_web_library"],
    },
    LoadInfo {
        name: "//tools:proto_bundle.bzl",
        symbols: &["build_validation", "java_proto_bundle", "py_proto_bundle", "js_proto_bundle"],
    },
];

/// Every load statement the generated kinds may need
pub fn loads() -> &'static [LoadInfo] {
    &LOADS
}

/// Load statements restricted to symbols actually used by `rules`, keeping
/// only the used symbols of each
pub fn loads_for(rules: &[Rule]) -> Vec<(&'static str, Vec<&'static str>)> {
    LOADS
        .iter()
        .filter_map(|load| {
            let used: Vec<&'static str> = load
                .symbols
                .iter()
                .copied()
                .filter(|symbol| rules.iter().any(|rule| rule.kind == *symbol))
                .collect();
            (!used.is_empty()).then_some((load.name, used))
        })
        .collect()
}

/// Attributes that must be non-empty for each bundle kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindInfo {
    pub non_empty_attrs: &'static [&'static str],
}

pub fn kinds() -> BTreeMap<&'static str, KindInfo> {
    BTreeMap::from([
        (
            "java_proto_bundle",
            KindInfo {
                non_empty_attrs: &["group_id", "artifact_id", "proto_deps", "java_deps", "java_grpc_deps"],
            },
        ),
        (
            "py_proto_bundle",
            KindInfo {
                non_empty_attrs: &["package_name", "proto_deps", "py_deps", "py_grpc_deps"],
            },
        ),
        (
            "js_proto_bundle",
            KindInfo {
                non_empty_attrs: &["package_name", "proto_deps", "js_deps", "js_grpc_web_deps"],
            },
        ),
        (
            "build_validation",
            KindInfo {
                non_empty_attrs: &["targets"],
            },
        ),
    ])
}

/// Stub/binding generation rule over `protos`
pub(crate) fn stub_library(kind: &str, name: String, protos: &[String]) -> Rule {
    Rule::new(kind, name)
        .with_attr("protos", PlatformStrings::generic(protos.iter().cloned()))
        .with_attr("visibility", vec![VISIBILITY_PUBLIC.to_string()])
}

/// Label of a sibling rule called `name`
pub(crate) fn local(name: &str) -> PlatformStrings {
    PlatformStrings::generic([format!(":{name}")])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_cover_generated_kinds() {
        let all: Vec<&str> = loads().iter().flat_map(|l| l.symbols.iter().copied()).collect();
        for kind in kinds().keys() {
            assert!(all.contains(kind), "{kind} has no load statement");
        }
        assert_eq!(loads().len(), 4);
    }

    #[test]
    fn test_loads_for_filters_unused_symbols() {
        let rules = vec![
            Rule::new("proto_library", "x_all_protos"),
            Rule::new("java_grpc_library", "x_java_grpc"),
            Rule::new("java_proto_bundle", "x_java_bundle"),
        ];

        assert_eq!(
            loads_for(&rules),
            vec![
                ("@rules_proto_grpc_java//:defs.bzl", vec!["java_grpc_library"]),
                ("//tools:proto_bundle.bzl", vec!["java_proto_bundle"]),
            ]
        );
    }

    #[test]
    fn test_rule_attributes() {
        let rule = Rule::new("alias", "publish_to_maven").with_attr("actual", ":publish_x_to_maven");
        assert_eq!(rule.label(), ":publish_to_maven");
        assert_eq!(rule.attr_str("actual"), Some(":publish_x_to_maven"));
        assert!(rule.attr("visibility").is_none());
    }

    #[test]
    fn test_java_bundle_kind_requires_coordinates() {
        let kinds = kinds();
        let java = &kinds["java_proto_bundle"];
        assert!(java.non_empty_attrs.contains(&"group_id"));
        assert!(java.non_empty_attrs.contains(&"artifact_id"));
    }
}
