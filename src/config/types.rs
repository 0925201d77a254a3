//! Core configuration types.
//! - Config holds runtime settings; every field is optional in the file.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::fs_ops::MoveOptions;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Per-file results and warnings (default)
    #[default]
    Normal,
    /// Adds skipped entries and ledger changes
    Info,
    /// Everything, including rename internals
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration. CLI flags are applied on top of the file values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Directory preselected as the move source
    pub source_dir: Option<PathBuf>,
    /// Directory preselected as the move destination
    pub destination_dir: Option<PathBuf>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Also list/move entries that are already hidden
    pub include_hidden: bool,
    /// If true, report moves but do not modify the filesystem
    pub dry_run: bool,
}

impl Config {
    pub fn move_options(&self) -> MoveOptions {
        MoveOptions {
            include_hidden: self.include_hidden,
            dry_run: self.dry_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_aliases() {
        assert_eq!(LogLevel::parse("ERROR"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::parse(" verbose "), Some(LogLevel::Info));
        assert_eq!("trace".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("loud".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Normal.to_string(), "normal");
    }

    #[test]
    fn options_follow_flags() {
        let cfg = Config {
            include_hidden: true,
            dry_run: true,
            ..Default::default()
        };
        let opts = cfg.move_options();
        assert!(opts.include_hidden && opts.dry_run);
    }
}
