//! `relkit` command-line entry point.

use anyhow::{anyhow, Context};
use clap::Parser;
use relkit_core::{default_log_level, init_console_logging, init_logging, RelkitConfig};

mod cli;
mod commands;

// Console logging stays quiet unless asked for.
const CONSOLE_LOG_LEVEL: &str = "warn";

fn main() {
    if let Err(error) = run() {
        eprintln!("relkit error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let root = cli
        .root
        .canonicalize()
        .with_context(|| format!("workspace root `{}` is not accessible", cli.root.display()))?;

    let config = RelkitConfig::load(&root)
        .with_context(|| format!("failed to load configuration for `{}`", root.display()))?;
    init_cli_logging(&cli, &config)?;

    let output = commands::dispatch(&cli.command, &root, &config)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn init_cli_logging(cli: &cli::Cli, config: &RelkitConfig) -> anyhow::Result<()> {
    let configured = config.logging.level.as_deref();
    let initialized = match cli.log_dir.as_deref().or(config.logging.dir.as_deref()) {
        Some(dir) => {
            let level = cli.effective_log_level(configured, default_log_level());
            init_logging(level, dir).map_err(|err| anyhow!(err))
        }
        None => {
            let level = cli.effective_log_level(configured, CONSOLE_LOG_LEVEL);
            init_console_logging(level).map_err(|err| anyhow!(err))
        }
    };
    initialized.context("failed to initialize logging")
}
