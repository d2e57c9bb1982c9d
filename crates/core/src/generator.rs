//! Per-bundle entry point tying configuration, discovery and synthesis together

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::bazel::{ProtoTargetFinder, build_file};
use crate::config::{BundleConfig, GenerateOptions, LakeConfig, MergedConfig, merge};
use crate::error::{Error, Result};
use crate::imports::{DependencyCollector, ImportIndex};
use crate::rules::{Rule, RuleSynthesizer};

/// Generates the rules for bundle directories of one repository
pub struct BundleGenerator {
    repo_root: PathBuf,
    options: GenerateOptions,
    synthesizer: RuleSynthesizer,
}

impl BundleGenerator {
    pub fn new(repo_root: impl Into<PathBuf>, options: GenerateOptions) -> Self {
        Self {
            repo_root: repo_root.into(),
            options,
            synthesizer: RuleSynthesizer::new(),
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Rules for `bundle_dir`, scanning the repository for a fresh import index
    pub fn generate(&self, bundle_dir: &Path) -> Result<Vec<Rule>> {
        if !self.is_bundle_dir(bundle_dir) {
            return Ok(Vec::new());
        }

        let index = ImportIndex::build(&self.repo_root)?;
        self.generate_with_index(bundle_dir, &index)
    }

    /// Rules for `bundle_dir` resolved against a prebuilt `index`.
    ///
    /// Directories without a bundle file, bundle files without a name and
    /// bundles declaring no `proto_library` targets all yield no rules.
    pub fn generate_with_index(&self, bundle_dir: &Path, index: &ImportIndex) -> Result<Vec<Rule>> {
        if !self.is_bundle_dir(bundle_dir) {
            return Ok(Vec::new());
        }

        let Some(config) = self.merged_config(bundle_dir)? else {
            return Ok(Vec::new());
        };
        info!("Generating rules for bundle {} at {:?}", config.bundle_name, bundle_dir);

        let bundle_package = self.package_of(bundle_dir)?;

        let mut finder = ProtoTargetFinder::new()?;
        let targets = finder.discover_targets(bundle_dir, &self.repo_root);
        if targets.is_empty() {
            info!("Bundle {} declares no proto_library targets", config.bundle_name);
            return Ok(Vec::new());
        }

        let collector = DependencyCollector::new(index, &self.options);
        let rules = self
            .synthesizer
            .synthesize(&config, &targets, bundle_dir, &bundle_package, &collector);

        debug!("Bundle {} produced {} rules", config.bundle_name, rules.len());
        Ok(rules)
    }

    /// Lake defaults merged with the bundle file in `bundle_dir`, or `None`
    /// when the directory holds no named bundle
    pub fn merged_config(&self, bundle_dir: &Path) -> Result<Option<MergedConfig>> {
        let Some(bundle) = BundleConfig::load_named(bundle_dir, &self.options.bundle_file_name)? else {
            return Ok(None);
        };

        let lake = LakeConfig::discover_named(bundle_dir, &self.options.lake_file_name)?;
        Ok(Some(merge(lake.as_ref(), &bundle)))
    }

    fn is_bundle_dir(&self, bundle_dir: &Path) -> bool {
        if !self.options.enabled {
            debug!("Bundle generation disabled, skipping {:?}", bundle_dir);
            return false;
        }
        bundle_dir.join(&self.options.bundle_file_name).is_file()
    }

    fn package_of(&self, dir: &Path) -> Result<String> {
        build_file::package_path(&self.repo_root, dir).ok_or_else(|| Error::OutsideRepository {
            path: dir.to_path_buf(),
            repo_root: self.repo_root.clone(),
        })
    }
}
