use super::publish::PYPI;
use super::{Language, LanguageRules, Rule, VISIBILITY_PUBLIC, local, stub_library};
use crate::config::MergedConfig;

/// PyPI wheels: `python_grpc_library` stubs plus a `py_proto_bundle`
pub struct PythonRules;

impl LanguageRules for PythonRules {
    fn language(&self) -> Language {
        Language::Python
    }

    fn is_enabled(&self, config: &MergedConfig) -> bool {
        config.python.enabled
    }

    fn missing_identity(&self, config: &MergedConfig) -> Vec<&'static str> {
        if config.python.package_name.is_empty() {
            vec!["package_name"]
        } else {
            Vec::new()
        }
    }

    fn bundle_rule_name(&self, bundle_name: &str) -> String {
        format!("{bundle_name}_py_bundle")
    }

    fn generate(&self, config: &MergedConfig, protos: &[String], version_fallback: &str) -> Vec<Rule> {
        let bundle_name = &config.bundle_name;
        let grpc_name = format!("{bundle_name}_python_grpc");
        let bundle_rule = self.bundle_rule_name(bundle_name);
        let package_name = config.python.package_name.as_str();

        let stubs = stub_library("python_grpc_library", grpc_name.clone(), protos);

        let bundle = Rule::new("py_proto_bundle", bundle_rule.clone())
            .with_attr("proto_deps", local(&format!("{bundle_name}_all_protos")))
            .with_attr("py_deps", local(&grpc_name))
            .with_attr("py_grpc_deps", local(&grpc_name))
            .with_attr("package_name", package_name)
            .with_attr("visibility", vec![VISIBILITY_PUBLIC.to_string()]);

        let [publish, alias] = PYPI.rules(
            bundle_name,
            &bundle_rule,
            &[("--package-name", package_name)],
            version_fallback,
        );

        vec![stubs, bundle, publish, alias]
    }
}
