use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};

use super::{
    DEFAULT_VERSION, JavaRules, JavaScriptRules, LanguageRules, PlatformStrings, PythonRules, Rule,
    VISIBILITY_PUBLIC,
};
use crate::bazel::Label;
use crate::config::MergedConfig;
use crate::imports::DependencyCollector;

/// Name of the validation rule closing every generated bundle package
pub const VALIDATION_RULE: &str = "all";

/// Turns a merged bundle configuration into the ordered rule list
pub struct RuleSynthesizer {
    handlers: Vec<Box<dyn LanguageRules>>,
}

impl RuleSynthesizer {
    pub fn new() -> Self {
        Self {
            handlers: vec![Box::new(JavaRules), Box::new(PythonRules), Box::new(JavaScriptRules)],
        }
    }

    /// Aggregate library, then each publishable language in turn, then the
    /// validation rule when any bundle rule was produced
    pub fn synthesize(
        &self,
        config: &MergedConfig,
        direct_targets: &[Label],
        bundle_dir: &Path,
        bundle_package: &str,
        collector: &DependencyCollector<'_>,
    ) -> Vec<Rule> {
        let bundle_name = &config.bundle_name;
        let mut rules = vec![aggregate_rule(bundle_name, direct_targets)];

        let deps = collector.collect(bundle_dir, bundle_package, direct_targets);
        let protos: Vec<String> = deps.iter().map(ToString::to_string).collect();
        debug!("Bundle {} resolves to {} proto targets", bundle_name, protos.len());

        let version_fallback = config.base_version.as_deref().unwrap_or(DEFAULT_VERSION);
        let mut bundle_labels = Vec::new();

        for handler in &self.handlers {
            let language = handler.language();
            if !handler.is_enabled(config) {
                debug!("{} disabled for bundle {}", language, bundle_name);
                continue;
            }

            let missing = handler.missing_identity(config);
            if !missing.is_empty() {
                warn!(
                    "Skipping {} rules for bundle {}: missing {}",
                    language,
                    bundle_name,
                    missing.join(", ")
                );
                continue;
            }

            let generated = handler.generate(config, &protos, version_fallback);
            info!("Generated {} {} rules for bundle {}", generated.len(), language, bundle_name);
            bundle_labels.push(format!(":{}", handler.bundle_rule_name(bundle_name)));
            rules.extend(generated);
        }

        if !bundle_labels.is_empty() {
            rules.push(
                Rule::new("build_validation", VALIDATION_RULE).with_attr("targets", bundle_labels),
            );
        }

        rules
    }
}

impl Default for RuleSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

fn aggregate_rule(bundle_name: &str, direct_targets: &[Label]) -> Rule {
    let deps: BTreeSet<&Label> = direct_targets.iter().collect();
    Rule::new("proto_library", format!("{bundle_name}_all_protos"))
        .with_attr("deps", PlatformStrings::generic(deps.into_iter().map(ToString::to_string)))
        .with_attr("visibility", vec![VISIBILITY_PUBLIC.to_string()])
}
