use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI parser for the `relkit` binary.
#[derive(Debug, Parser)]
#[command(
    name = "relkit",
    version,
    about = "Release automation: version bumps and release-note credits"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root holding the version file and relkit.toml
    #[arg(short, long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files (stderr when omitted)
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the version loaded from the version file
    Version,
    /// Increment the version in the version file
    Bump {
        /// Record the outgoing version in `notableVersions`
        #[arg(long)]
        notable: bool,
    },
    /// List registered tasks
    Tasks,
    /// Run a registered task by name
    Run {
        /// Task name, e.g. bumpVersionFile
        task: String,
    },
    /// Filter a JSON list of contributors for release-note credits
    Contributors {
        /// JSON file with an array of {login, name, profile_url} objects
        file: PathBuf,
        /// Extra login or name to leave out (repeatable)
        #[arg(long = "ignore", value_name = "NAME")]
        ignore: Vec<String>,
    },
}

impl Cli {
    /// Log level from flags, falling back to `configured` and then `fallback`.
    pub fn effective_log_level<'a>(
        &'a self,
        configured: Option<&'a str>,
        fallback: &'a str,
    ) -> &'a str {
        if let Some(level) = self.log_level.as_deref() {
            level
        } else if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            configured.unwrap_or(fallback)
        }
    }
}
