use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use protolake_core::bazel::build_file::find_workspace_root;

/// Canonical repository root: the explicit argument, else the nearest
/// enclosing Bazel workspace, else the current directory
pub fn resolve_repo_root(explicit: Option<&Path>) -> Result<PathBuf> {
    let root = match explicit {
        Some(root) => root.to_path_buf(),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            find_workspace_root(&cwd).unwrap_or(cwd)
        }
    };

    let root = root
        .canonicalize()
        .with_context(|| format!("Repository root not found: {}", root.display()))?;
    debug!("Using repository root {:?}", root);
    Ok(root)
}

/// Canonical bundle directory
pub fn resolve_bundle_dir(dir: &Path) -> Result<PathBuf> {
    let canonical = dir
        .canonicalize()
        .with_context(|| format!("Bundle directory not found: {}", dir.display()))?;
    if !canonical.is_dir() {
        anyhow::bail!("Not a directory: {}", dir.display());
    }
    Ok(canonical)
}
