use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use protolake_core::ImportIndex;

use crate::utils::resolve_repo_root;

pub fn index_command(repo_root: Option<&Path>) -> Result<()> {
    let repo_root = resolve_repo_root(repo_root)?;

    let index = ImportIndex::build(&repo_root)
        .with_context(|| format!("Failed to index {}", repo_root.display()))?;
    info!("Indexed {} proto imports", index.len());

    println!("{}", serde_json::to_string_pretty(&index)?);
    Ok(())
}
