//! Per-bundle dependency collection
//!
//! Only the imports written in the bundle's own `.proto` files are resolved.
//! Imports of those imports are deliberately not followed, so a bundle never
//! drags in distant parts of the repository.

use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

use super::{ImportIndex, proto_imports};
use crate::bazel::{Label, build_file};
use crate::config::GenerateOptions;

/// Resolves a bundle's direct proto imports against an [`ImportIndex`]
pub struct DependencyCollector<'a> {
    index: &'a ImportIndex,
    options: &'a GenerateOptions,
}

impl<'a> DependencyCollector<'a> {
    pub fn new(index: &'a ImportIndex, options: &'a GenerateOptions) -> Self {
        Self { index, options }
    }

    /// `direct_targets` plus the owner of every import in the bundle's
    /// sources, one hop deep.
    ///
    /// `bundle_package` is the bundle directory's package path; resolved
    /// targets inside it are rewritten to local `:name` form and root-package
    /// targets seen from elsewhere become `//:name`.
    pub fn collect(
        &self,
        bundle_dir: &Path,
        bundle_package: &str,
        direct_targets: &[Label],
    ) -> BTreeSet<Label> {
        let mut all_deps: BTreeSet<Label> = direct_targets.iter().cloned().collect();

        let proto_files = bundle_proto_files(bundle_dir);
        debug!("Found {} proto files in bundle at {:?}", proto_files.len(), bundle_dir);

        for proto_file in &proto_files {
            self.collect_from_file(proto_file, bundle_package, &mut all_deps);
        }

        all_deps
    }

    fn collect_from_file(&self, proto_file: &Path, bundle_package: &str, deps: &mut BTreeSet<Label>) {
        let content = match std::fs::read_to_string(proto_file) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read proto file {:?}: {}", proto_file, e);
                return;
            }
        };

        for import_path in proto_imports::parse_imports(&content) {
            if self.options.is_well_known(&import_path) {
                continue;
            }

            match self.index.resolve(&import_path) {
                Some(target) => {
                    let target = target.clone().relative_to(bundle_package);
                    if deps.insert(target.clone()) {
                        debug!(
                            "Added dependency {} (from import {} in {:?})",
                            target, import_path, proto_file
                        );
                    }
                }
                None => warn!("Could not resolve import {} from {:?}", import_path, proto_file),
            }
        }
    }
}

/// Every `.proto` file under `bundle_dir`, skipping Bazel output trees
pub fn bundle_proto_files(bundle_dir: &Path) -> Vec<std::path::PathBuf> {
    build_file::walk(bundle_dir)
        .filter(|entry| entry.file_type().is_file() && proto_imports::is_proto_file(entry.path()))
        .map(walkdir::DirEntry::into_path)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn index() -> ImportIndex {
        vec![
            ("acme/common/types.proto".to_string(), Label::in_package("acme/common", "types_proto")),
            ("acme/user/user.proto".to_string(), Label::in_package("acme/user", "user_proto")),
            ("google/protobuf/any.proto".to_string(), Label::in_package("google", "any_proto")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_collect_resolves_direct_imports() {
        let temp_dir = TempDir::new().unwrap();
        let bundle = temp_dir.path().join("acme/user");
        write(
            &bundle,
            "user.proto",
            r#"
syntax = "proto3";
import "acme/common/types.proto";
import "google/protobuf/any.proto";
import "acme/missing/gone.proto";
import "acme/user/user.proto";
"#,
        );

        let index = index();
        let options = GenerateOptions::default();
        let collector = DependencyCollector::new(&index, &options);
        let deps = collector.collect(&bundle, "acme/user", &[Label::local("user_proto")]);

        let rendered: Vec<String> = deps.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec![":user_proto", "//acme/common:types_proto"]);
    }

    #[test]
    fn test_well_known_prefixes_are_configurable() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "a.proto",
            "import \"google/protobuf/any.proto\";\nimport \"acme/common/types.proto\";\n",
        );

        let index = index();
        let options = GenerateOptions {
            well_known_prefixes: vec!["acme/common/".to_string()],
            ..GenerateOptions::default()
        };
        let collector = DependencyCollector::new(&index, &options);
        let deps = collector.collect(temp_dir.path(), "bundle", &[]);

        let rendered: Vec<String> = deps.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["//google:any_proto"]);
    }

    #[test]
    fn test_root_package_import_from_nested_bundle() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "a.proto", "import \"common.proto\";\n");

        let index: ImportIndex = vec![("common.proto".to_string(), Label::in_package("", "common_proto"))]
            .into_iter()
            .collect();
        let options = GenerateOptions::default();
        let collector = DependencyCollector::new(&index, &options);

        let nested = collector.collect(temp_dir.path(), "acme/a", &[Label::local("common_proto")]);
        let rendered: Vec<String> = nested.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec![":common_proto", "//:common_proto"]);

        let at_root = collector.collect(temp_dir.path(), "", &[Label::local("common_proto")]);
        let rendered: Vec<String> = at_root.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec![":common_proto"]);
    }

    #[test]
    fn test_output_dirs_are_not_scanned() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "bazel-bin/gen.proto", "import \"acme/common/types.proto\";\n");

        assert!(bundle_proto_files(temp_dir.path()).is_empty());
    }
}
