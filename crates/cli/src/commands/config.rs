use anyhow::{Context, Result};
use std::path::Path;

use protolake_core::{BundleGenerator, GenerateOptions};

use crate::utils::{resolve_bundle_dir, resolve_repo_root};

pub fn config_command(dir: &Path, repo_root: Option<&Path>) -> Result<()> {
    let repo_root = resolve_repo_root(repo_root)?;
    let bundle_dir = resolve_bundle_dir(dir)?;

    let generator = BundleGenerator::new(repo_root, GenerateOptions::default());
    let merged = generator
        .merged_config(&bundle_dir)
        .with_context(|| format!("Failed to load configuration for {}", dir.display()))?;

    let Some(merged) = merged else {
        anyhow::bail!("No named bundle found in {}", dir.display());
    };

    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}
