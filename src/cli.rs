//! CLI definition and parsing.
//! Defines Args/Command and provides parse() for command-line handling.
//!
//! Notes:
//! - Paths given on the command line win over `source_dir`/`destination_dir` from the config.
//! - --debug is a shorthand for --log-level debug.
//! - Without a subcommand the interactive shell starts.

use clap::{Parser, Subcommand, ValueHint};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel};

/// Move files between two directories, then hide or reveal the moved set.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Move files and toggle the moved set hidden or visible")]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, global = true, value_hint = ValueHint::FilePath, help = "Append logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where move_hide will look for the config file, then exit.
    #[arg(long, help = "Print the config file location used by move_hide and exit")]
    pub print_config: bool,

    /// Write a commented template config at the config location, then exit.
    #[arg(long, help = "Create a template config file and exit")]
    pub init_config: bool,

    /// Dry-run: report moves but do not modify the filesystem.
    #[arg(long, global = true, help = "Show what would be moved, but do not move anything")]
    pub dry_run: bool,

    /// Also list and move files that are already hidden.
    #[arg(long, global = true, help = "Include already-hidden files")]
    pub include_hidden: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List the files directly inside a directory.
    List {
        #[arg(value_name = "DIR", value_hint = ValueHint::DirPath)]
        dir: PathBuf,
    },
    /// Move every file from SOURCE into DEST (falls back to the config's directories).
    Move {
        #[arg(value_name = "SOURCE", value_hint = ValueHint::DirPath)]
        source: Option<PathBuf>,
        #[arg(value_name = "DEST", value_hint = ValueHint::DirPath)]
        destination: Option<PathBuf>,
    },
    /// Hide the named files inside DIR.
    Hide {
        #[arg(long, short = 'C', value_name = "DIR", value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },
    /// Reveal the named files inside DIR (use the visible names).
    Show {
        #[arg(long, short = 'C', value_name = "DIR", value_hint = ValueHint::DirPath)]
        dir: PathBuf,
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,
    },
    /// Interactive session: select directories, move, toggle visibility.
    Shell,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.include_hidden {
            cfg.include_hidden = true;
        }
        if let Some(Command::Move {
            source,
            destination,
        }) = &self.command
        {
            if let Some(s) = source {
                cfg.source_dir = Some(sanitize_path(s));
            }
            if let Some(d) = destination {
                cfg.destination_dir = Some(sanitize_path(d));
            }
        }
    }
}

/// Strip quotes left behind by shells (PowerShell/CMD quoting, pasted paths).
pub fn sanitize_path(p: &Path) -> PathBuf {
    sanitize_str(&p.to_string_lossy())
}

/// Only a matching pair of quotes wrapping the whole argument is removed;
/// quotes inside a name (`Bob's files`) are part of it.
pub fn sanitize_str(s: &str) -> PathBuf {
    let trimmed = s.trim();
    let mut inner = match trimmed.as_bytes() {
        [b'"', .., b'"'] | [b'\'', .., b'\''] => trimmed[1..trimmed.len() - 1].to_string(),
        _ => trimmed.to_string(),
    };

    // Drop ONE trailing separator so "dir/" and "dir" select the same thing;
    // keep a bare root and a drive root such as `C:\`.
    if inner.len() > 1 && (inner.ends_with('\\') || inner.ends_with('/')) {
        let rest = &inner[..inner.len() - 1];
        if !rest.ends_with(':') {
            inner.pop();
        }
    }

    PathBuf::from(inner)
}

pub fn parse() -> Args {
    Args::parse()
}
