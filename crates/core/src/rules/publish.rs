//! Publish commands with the hybrid static/dynamic split
//!
//! Artifact identity (coordinates, package names) is written into the
//! generated command. The release version and destination repository are
//! shell expansions evaluated when the command runs, each with a literal
//! fallback, so one generated BUILD file serves every release.

use super::{PlatformStrings, Rule, VISIBILITY_PUBLIC, local};

/// Fallback for `${VERSION}` when the lake has no base version
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Environment variable carrying the release version
pub const VERSION_ENV: &str = "VERSION";

/// A destination ecosystem's publishing tool and repository settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishTarget {
    /// Short name used in rule names (`publish_<bundle>_to_<name>`)
    pub name: &'static str,
    pub tool: &'static str,
    /// Flag that receives the built bundle
    pub artifact_flag: &'static str,
    pub repo_flag: &'static str,
    pub repo_env: &'static str,
    pub repo_default: &'static str,
}

pub const MAVEN: PublishTarget = PublishTarget {
    name: "maven",
    tool: "//tools:maven_publisher",
    artifact_flag: "--jar",
    repo_flag: "--repo",
    repo_env: "MAVEN_REPO",
    repo_default: "file://~/.m2/repository",
};

pub const PYPI: PublishTarget = PublishTarget {
    name: "pypi",
    tool: "//tools:pypi_publisher",
    artifact_flag: "--wheel",
    repo_flag: "--repo",
    repo_env: "PYPI_REPO",
    repo_default: "file://~/.pypi",
};

pub const NPM: PublishTarget = PublishTarget {
    name: "npm",
    tool: "//tools:npm_publisher",
    artifact_flag: "--package",
    repo_flag: "--registry",
    repo_env: "NPM_REGISTRY",
    repo_default: "file://~/.npm",
};

impl PublishTarget {
    pub fn rule_name(&self, bundle_name: &str) -> String {
        format!("publish_{bundle_name}_to_{}", self.name)
    }

    pub fn alias_name(&self) -> String {
        format!("publish_to_{}", self.name)
    }

    /// Shell command publishing `bundle_rule`.
    ///
    /// `identity` flags are baked in as-is; version and repository are
    /// deferred to the environment.
    pub fn command(&self, bundle_rule: &str, identity: &[(&str, &str)], version_fallback: &str) -> String {
        let mut parts = vec![
            format!("$(location {})", self.tool),
            format!("{} $(location :{bundle_rule})", self.artifact_flag),
        ];
        parts.extend(identity.iter().map(|(flag, value)| format!("{flag} {value}")));
        parts.push(format!("--version \"${{{VERSION_ENV}:-{version_fallback}}}\""));
        parts.push(format!(
            "{} \"${{{}:-{}}}\"",
            self.repo_flag, self.repo_env, self.repo_default
        ));
        parts.push("> $@".to_string());
        parts.join(" ")
    }

    /// The publish genrule and its fixed-name alias
    pub fn rules(
        &self,
        bundle_name: &str,
        bundle_rule: &str,
        identity: &[(&str, &str)],
        version_fallback: &str,
    ) -> [Rule; 2] {
        let publish_name = self.rule_name(bundle_name);

        let publish = Rule::new("genrule", publish_name.clone())
            .with_attr("srcs", local(bundle_rule))
            .with_attr("outs", PlatformStrings::generic([format!("publish_{}.log", self.name)]))
            .with_attr("cmd", self.command(bundle_rule, identity, version_fallback))
            .with_attr("tools", PlatformStrings::generic([self.tool]));

        let alias = Rule::new("alias", self.alias_name())
            .with_attr("actual", format!(":{publish_name}"))
            .with_attr("visibility", vec![VISIBILITY_PUBLIC.to_string()]);

        [publish, alias]
    }
}
