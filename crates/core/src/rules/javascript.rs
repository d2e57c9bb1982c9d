use super::publish::NPM;
use super::{Language, LanguageRules, Rule, VISIBILITY_PUBLIC, local, stub_library};
use crate::config::MergedConfig;

/// npm packages: Node and gRPC-Web stubs plus a `js_proto_bundle`
pub struct JavaScriptRules;

impl LanguageRules for JavaScriptRules {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn is_enabled(&self, config: &MergedConfig) -> bool {
        config.javascript.enabled
    }

    fn missing_identity(&self, config: &MergedConfig) -> Vec<&'static str> {
        if config.javascript.package_name.is_empty() {
            vec!["package_name"]
        } else {
            Vec::new()
        }
    }

    fn bundle_rule_name(&self, bundle_name: &str) -> String {
        format!("{bundle_name}_js_bundle")
    }

    fn generate(&self, config: &MergedConfig, protos: &[String], version_fallback: &str) -> Vec<Rule> {
        let bundle_name = &config.bundle_name;
        let node_name = format!("{bundle_name}_js_grpc_node");
        let web_name = format!("{bundle_name}_js_grpc_web");
        let bundle_rule = self.bundle_rule_name(bundle_name);
        let package_name = config.javascript.package_name.as_str();

        let node_stubs = stub_library("js_grpc_library", node_name.clone(), protos);
        let web_stubs = stub_library("js_grpc_web_library", web_name.clone(), protos);

        let bundle = Rule::new("js_proto_bundle", bundle_rule.clone())
            .with_attr("proto_deps", local(&format!("{bundle_name}_all_protos")))
            .with_attr("js_deps", local(&node_name))
            .with_attr("js_grpc_web_deps", local(&web_name))
            .with_attr("package_name", package_name)
            .with_attr("visibility", vec![VISIBILITY_PUBLIC.to_string()]);

        let [publish, alias] = NPM.rules(
            bundle_name,
            &bundle_rule,
            &[("--package-name", package_name)],
            version_fallback,
        );

        vec![node_stubs, web_stubs, bundle, publish, alias]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PackageSettings;

    #[test]
    fn test_javascript_rules() {
        let config = MergedConfig {
            bundle_name: "billing".to_string(),
            javascript: PackageSettings {
                enabled: true,
                package_name: "@acme/billing".to_string(),
            },
            ..MergedConfig::default()
        };

        let rules = JavaScriptRules.generate(&config, &[":billing_proto".to_string()], "1.0.0");
        let kinds: Vec<&str> = rules.iter().map(|r| r.kind.as_str()).collect();
        assert_eq!(
            kinds,
            vec!["js_grpc_library", "js_grpc_web_library", "js_proto_bundle", "genrule", "alias"]
        );

        let bundle = &rules[2];
        assert_eq!(bundle.attr_str("package_name"), Some("@acme/billing"));
        assert_eq!(
            bundle.attr("js_grpc_web_deps").map(|v| v.items().to_vec()),
            Some(vec![":billing_js_grpc_web".to_string()])
        );
        assert_eq!(rules[4].name, "publish_to_npm");
    }
}
