//! CLI definition and parsing.
//!
//! Global flags override values loaded from the XML config.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use sgp_fileman::{Config, LogLevel};

/// Inspect game data through the sgp_fileman file layer.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Inspect game data through the sgp_fileman file layer")]
pub struct Args {
    /// Set log level: debug, info, warn, error.
    #[arg(long, global = true, value_parser = parse_level)]
    pub log_level: Option<LogLevel>,

    /// Also log to a file. Without a value, the default log path is used.
    #[arg(long, global = true, num_args = 0..=1, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<Option<PathBuf>>,

    /// Emit logs in structured JSON.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List files directly inside a directory.
    Ls {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        /// Only files with this extension (no dot; empty for none).
        #[arg(long)]
        ext: Option<String>,
        /// Compare the extension ignoring case.
        #[arg(long)]
        ignore_case: bool,
        /// Print bare file names instead of paths.
        #[arg(long)]
        names_only: bool,
        /// Sort the listing.
        #[arg(long)]
        sort: bool,
    },
    /// Print the on-disk name matching NAME ignoring case.
    Resolve {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        name: String,
    },
    /// Print a file found ignoring case.
    Cat {
        #[arg(value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        name: String,
    },
    /// Show the read-only and directory flags of a path.
    Attrs {
        #[arg(value_hint = ValueHint::AnyPath)]
        path: PathBuf,
    },
    /// Move a file, copying across filesystems when needed.
    Mv {
        #[arg(value_hint = ValueHint::FilePath)]
        from: PathBuf,
        #[arg(value_hint = ValueHint::FilePath)]
        to: PathBuf,
    },
    /// Create a directory (no error if it already exists).
    Mkdir {
        #[arg(value_hint = ValueHint::DirPath)]
        path: PathBuf,
    },
    /// Delete a file (no error if it is already gone).
    Rm {
        #[arg(value_hint = ValueHint::FilePath)]
        path: PathBuf,
    },
    /// Bytes free on the volume holding the current directory.
    FreeSpace,
    /// Print the config file location and effective settings.
    PrintConfig,
}

fn parse_level(s: &str) -> Result<LogLevel, String> {
    s.parse()
}

impl Args {
    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.log_level {
            cfg.log_level = level;
        }
        match &self.log_file {
            Some(Some(path)) => cfg.log_file = Some(path.clone()),
            Some(None) => cfg.log_file = sgp_fileman::default_log_path().ok(),
            None => {}
        }
        if self.json {
            cfg.json_logs = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
