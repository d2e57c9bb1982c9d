use anyhow::Result;
use clap::Parser;
use protolake_cli::Cli;

fn main() -> Result<()> {
    // stdout carries generated output
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    Cli::parse().command.execute()
}
