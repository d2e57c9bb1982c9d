use super::publish::MAVEN;
use super::{Language, LanguageRules, Rule, VISIBILITY_PUBLIC, local, stub_library};
use crate::config::MergedConfig;

/// Maven artifacts: `java_grpc_library` stubs plus a `java_proto_bundle`
pub struct JavaRules;

impl LanguageRules for JavaRules {
    fn language(&self) -> Language {
        Language::Java
    }

    fn is_enabled(&self, config: &MergedConfig) -> bool {
        config.java.enabled
    }

    fn missing_identity(&self, config: &MergedConfig) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if config.java.group_id.is_empty() {
            missing.push("group_id");
        }
        if config.java.artifact_id.is_empty() {
            missing.push("artifact_id");
        }
        missing
    }

    fn bundle_rule_name(&self, bundle_name: &str) -> String {
        format!("{bundle_name}_java_bundle")
    }

    fn generate(&self, config: &MergedConfig, protos: &[String], version_fallback: &str) -> Vec<Rule> {
        let bundle_name = &config.bundle_name;
        let grpc_name = format!("{bundle_name}_java_grpc");
        let bundle_rule = self.bundle_rule_name(bundle_name);
        let java = &config.java;

        let stubs = stub_library("java_grpc_library", grpc_name.clone(), protos);

        // No version attribute: the bundle rule reads it from the environment
        let bundle = Rule::new("java_proto_bundle", bundle_rule.clone())
            .with_attr("proto_deps", local(&format!("{bundle_name}_all_protos")))
            .with_attr("java_deps", local(&grpc_name))
            .with_attr("java_grpc_deps", local(&grpc_name))
            .with_attr("group_id", java.group_id.as_str())
            .with_attr("artifact_id", java.artifact_id.as_str())
            .with_attr("visibility", vec![VISIBILITY_PUBLIC.to_string()]);

        let [publish, alias] = MAVEN.rules(
            bundle_name,
            &bundle_rule,
            &[
                ("--group-id", java.group_id.as_str()),
                ("--artifact-id", java.artifact_id.as_str()),
            ],
            version_fallback,
        );

        vec![stubs, bundle, publish, alias]
    }
}
