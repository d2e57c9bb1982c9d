//! Repository-wide map from proto import path to the owning `proto_library`

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::bazel::build_file::{self, ProtoLibraryReader};
use crate::bazel::{AttributeValue, GlobPattern, Label, RuleCall};
use crate::error::Result;

/// Import path (as written in an `import` statement) to owning target.
///
/// Built fresh from a full repository scan; never cached across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ImportIndex {
    entries: BTreeMap<String, Label>,
}

impl ImportIndex {
    /// Scan every package under `repo_root` and index the sources of each
    /// `proto_library`.
    ///
    /// When two declarations claim the same import path the later one in
    /// traversal order wins and a warning is logged.
    pub fn build(repo_root: &Path) -> Result<Self> {
        let mut reader = ProtoLibraryReader::new()?;
        let mut index = Self::default();

        for dir in build_file::package_dirs(repo_root) {
            let Some(package) = build_file::package_path(repo_root, &dir) else {
                continue;
            };

            for rule in reader.read_dir(&dir) {
                let label = Label::in_package(&package, rule.name.clone());
                for src in rule_sources(&rule, &dir) {
                    let import_path = import_path_for(&rule, &package, &src);
                    index.insert(import_path, label.clone());
                }
            }
        }

        debug!("Import index built with {} entries", index.len());
        Ok(index)
    }

    pub fn insert(&mut self, import_path: String, label: Label) {
        if let Some(previous) = self.entries.get(&import_path) {
            if *previous != label {
                warn!(
                    "Import {} is declared by both {} and {}; using {}",
                    import_path, previous, label, label
                );
            }
        }
        self.entries.insert(import_path, label);
    }

    pub fn resolve(&self, import_path: &str) -> Option<&Label> {
        self.entries.get(import_path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Label)> {
        self.entries.iter()
    }
}

impl FromIterator<(String, Label)> for ImportIndex {
    fn from_iter<I: IntoIterator<Item = (String, Label)>>(iter: I) -> Self {
        let mut index = Self::default();
        for (import_path, label) in iter {
            index.insert(import_path, label);
        }
        index
    }
}

/// Manifest-relative source paths of a rule.
///
/// Local labels (`:a.proto`) are reduced to file names; labels into other
/// packages are not sources of this package and are skipped.
fn rule_sources(rule: &RuleCall, package_dir: &Path) -> Vec<String> {
    let entries = match rule.attributes.get("srcs") {
        Some(AttributeValue::List(items)) => items.clone(),
        Some(AttributeValue::String(item)) | Some(AttributeValue::Label(item)) => vec![item.clone()],
        Some(AttributeValue::Glob(glob)) => expand_glob(glob, package_dir),
        _ => Vec::new(),
    };

    entries
        .into_iter()
        .filter_map(|src| {
            if src.starts_with("//") || src.starts_with('@') {
                debug!("Ignoring cross-package source {} in {}", src, rule.name);
                return None;
            }
            let src = src.trim_start_matches(':').trim_start_matches("./");
            (!src.is_empty()).then(|| src.to_string())
        })
        .collect()
}

fn expand_glob(glob: &GlobPattern, package_dir: &Path) -> Vec<String> {
    let excludes: Vec<glob::Pattern> = glob
        .exclude
        .iter()
        .filter_map(|pattern| glob::Pattern::new(pattern).ok())
        .collect();

    let Some(base) = package_dir.to_str().map(glob::Pattern::escape) else {
        warn!("Cannot expand globs under non UTF-8 path {:?}", package_dir);
        return Vec::new();
    };

    let mut files = Vec::new();
    for pattern in &glob.patterns {
        let full = format!("{base}/{pattern}");

        let paths = match glob::glob(&full) {
            Ok(paths) => paths,
            Err(e) => {
                warn!("Invalid glob pattern {}: {}", pattern, e);
                continue;
            }
        };

        for path in paths.filter_map(std::result::Result::ok) {
            if !path.is_file() {
                continue;
            }
            let Some(relative) = build_file::package_path(package_dir, &path) else {
                continue;
            };
            if excludes.iter().any(|exclude| exclude.matches(&relative)) {
                continue;
            }
            if !files.contains(&relative) {
                files.push(relative);
            }
        }
    }

    files
}

/// Path other protos use to import `src`, honouring
/// `strip_import_prefix` and `import_prefix`
fn import_path_for(rule: &RuleCall, package: &str, src: &str) -> String {
    let mut path = join_path(package, src);

    if let Some(strip) = rule.string_attr("strip_import_prefix") {
        let prefix = match strip.strip_prefix('/') {
            Some(absolute) => absolute.trim_end_matches('/').to_string(),
            None => join_path(package, strip.trim_end_matches('/')),
        };

        if !prefix.is_empty() {
            match path.strip_prefix(&format!("{prefix}/")).map(str::to_string) {
                Some(rest) => path = rest,
                None => warn!(
                    "{} in {} is not under strip_import_prefix {}",
                    src, rule.name, strip
                ),
            }
        }
    }

    if let Some(prefix) = rule.string_attr("import_prefix") {
        let prefix = prefix.trim_matches('/');
        if !prefix.is_empty() {
            path = format!("{prefix}/{path}");
        }
    }

    path
}

fn join_path(package: &str, rel: &str) -> String {
    match (package.is_empty(), rel.is_empty()) {
        (true, _) => rel.to_string(),
        (false, true) => package.to_string(),
        (false, false) => format!("{package}/{rel}"),
    }
}
