//! Locating and reading BUILD manifests inside a repository tree

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::{RuleCall, RuleExtractor, StarlarkParser};

pub const BUILD_FILE_NAMES: [&str; 2] = ["BUILD.bazel", "BUILD"];
pub const WORKSPACE_MARKERS: [&str; 3] = ["MODULE.bazel", "WORKSPACE", "WORKSPACE.bazel"];
pub const PROTO_LIBRARY: &str = "proto_library";

/// The manifest declaring `dir` as a package, if any. `BUILD.bazel` wins
/// over `BUILD`.
pub fn find_build_file(dir: &Path) -> Option<PathBuf> {
    BUILD_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

/// Bazel output trees (`bazel-bin`, `bazel-out`, `bazel-<workspace>`, ...)
/// and VCS metadata are never scanned
pub fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with("bazel-") || name == ".git")
}

/// Recursively walk `root` in sorted order, pruning skipped directories.
///
/// Unreadable entries are logged and skipped.
pub fn walk(root: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable path: {}", e);
                None
            }
        })
}

/// Every directory under `root` (inclusive) that holds a BUILD manifest
pub fn package_dirs(root: &Path) -> Vec<PathBuf> {
    walk(root)
        .filter(|entry| entry.file_type().is_dir())
        .filter(|entry| find_build_file(entry.path()).is_some())
        .map(DirEntry::into_path)
        .collect()
}

/// Package path of `dir` relative to `repo_root`, with `/` separators.
/// The root package is the empty string.
pub fn package_path(repo_root: &Path, dir: &Path) -> Option<String> {
    let relative = dir.strip_prefix(repo_root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}

/// Nearest ancestor of `start` (inclusive) that looks like a Bazel workspace
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if WORKSPACE_MARKERS.iter().any(|marker| dir.join(marker).is_file()) {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

/// Reads `proto_library` declarations from package manifests
pub struct ProtoLibraryReader {
    parser: StarlarkParser,
}

impl ProtoLibraryReader {
    pub fn new() -> crate::Result<Self> {
        Ok(Self {
            parser: StarlarkParser::new()?,
        })
    }

    /// `proto_library` rules declared in `dir`'s manifest, in file order.
    ///
    /// A missing, unreadable or unparseable manifest yields no rules.
    pub fn read_dir(&mut self, dir: &Path) -> Vec<RuleCall> {
        let Some(build_file) = find_build_file(dir) else {
            debug!("No BUILD file found in {:?}", dir);
            return Vec::new();
        };

        match self.parser.parse_file(&build_file) {
            Ok(ast) => {
                let rules = RuleExtractor::extract_rules(&ast, &[PROTO_LIBRARY]);
                debug!("Found {} proto_library rules in {:?}", rules.len(), build_file);
                rules
            }
            Err(e) => {
                warn!("Skipping BUILD file {:?}: {}", build_file, e);
                Vec::new()
            }
        }
    }
}
