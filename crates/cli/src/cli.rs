use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::commands::{config_command, generate_command, index_command};

#[derive(Parser, Debug)]
#[command(name = "protolake")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the generated rules for a bundle directory
    #[command(visible_alias = "g")]
    Generate {
        /// Bundle directory containing bundle.yaml
        dir: PathBuf,

        /// Repository root (defaults to the enclosing Bazel workspace)
        #[arg(short, long)]
        repo_root: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Starlark)]
        format: OutputFormat,
    },
    /// Print the merged configuration of a bundle as JSON
    Config {
        /// Bundle directory containing bundle.yaml
        dir: PathBuf,

        /// Repository root (defaults to the enclosing Bazel workspace)
        #[arg(short, long)]
        repo_root: Option<PathBuf>,
    },
    /// Print the repository import index as JSON
    Index {
        /// Repository root (defaults to the enclosing Bazel workspace)
        #[arg(short, long)]
        repo_root: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Starlark,
    Json,
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Generate {
                dir,
                repo_root,
                format,
            } => generate_command(&dir, repo_root.as_deref(), format),
            Commands::Config { dir, repo_root } => config_command(&dir, repo_root.as_deref()),
            Commands::Index { repo_root } => index_command(repo_root.as_deref()),
        }
    }
}
