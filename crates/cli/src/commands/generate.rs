use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use protolake_core::{BundleGenerator, GenerateOptions};

use crate::cli::OutputFormat;
use crate::display::render_build_file;
use crate::utils::{resolve_bundle_dir, resolve_repo_root};

pub fn generate_command(dir: &Path, repo_root: Option<&Path>, format: OutputFormat) -> Result<()> {
    let repo_root = resolve_repo_root(repo_root)?;
    let bundle_dir = resolve_bundle_dir(dir)?;
    debug!("Generating rules for {:?} in {:?}", bundle_dir, repo_root);

    let generator = BundleGenerator::new(repo_root, GenerateOptions::default());
    let rules = generator
        .generate(&bundle_dir)
        .with_context(|| format!("Failed to generate rules for {}", dir.display()))?;

    match format {
        OutputFormat::Starlark => print!("{}", render_build_file(&rules)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rules)?),
    }

    Ok(())
}
