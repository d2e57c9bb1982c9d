//! Find the proto compilation units a bundle declares

use std::path::Path;
use tracing::{debug, warn};

use super::build_file::{self, ProtoLibraryReader};
use super::Label;
use crate::error::Result;

/// Finds `proto_library` targets in a bundle's directory subtree
pub struct ProtoTargetFinder {
    reader: ProtoLibraryReader,
}

impl ProtoTargetFinder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            reader: ProtoLibraryReader::new()?,
        })
    }

    /// Targets declared in `bundle_dir` and all of its subdirectories.
    ///
    /// Targets in the bundle directory itself come first, in local `:name`
    /// form and manifest order. Subdirectory targets follow in
    /// `//package:name` form, ordered by path.
    pub fn discover_targets(&mut self, bundle_dir: &Path, repo_root: &Path) -> Vec<Label> {
        debug!("discover_targets: bundle_dir={:?}, repo_root={:?}", bundle_dir, repo_root);

        let mut targets: Vec<Label> = Vec::new();

        for dir in build_file::package_dirs(bundle_dir) {
            let is_bundle_dir = dir == bundle_dir;
            let package = if is_bundle_dir {
                None
            } else {
                match build_file::package_path(repo_root, &dir) {
                    Some(package) => Some(package),
                    None => {
                        warn!("{:?} is outside the repository root {:?}", dir, repo_root);
                        continue;
                    }
                }
            };

            for rule in self.reader.read_dir(&dir) {
                let label = match &package {
                    None => Label::local(rule.name),
                    Some(package) => Label::in_package(package, rule.name),
                };

                if targets.contains(&label) {
                    continue;
                }
                debug!("Found proto_library target: {}", label);
                targets.push(label);
            }
        }

        debug!("Discovered {} proto targets under {:?}", targets.len(), bundle_dir);
        targets
    }
}
