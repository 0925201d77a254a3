//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request (`--init-config`).
//!
//! Notes:
//! - This module only reads/writes the config file; directories named in it
//!   are validated when they are selected.
//! - Unknown XML fields are an error so misspelled settings are not silently ignored.

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel};
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "source_dir")]
    source_dir: Option<String>,
    #[serde(rename = "destination_dir")]
    destination_dir: Option<String>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "include_hidden", default, deserialize_with = "de_bool_trimmed_opt")]
    include_hidden: Option<bool>,
    #[serde(rename = "dry_run", default, deserialize_with = "de_bool_trimmed_opt")]
    dry_run: Option<bool>,
}

// Booleans may carry surrounding whitespace or newlines in hand-edited files.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some("true") | Some("1") | Some("yes") => Ok(Some(true)),
        Some("false") | Some("0") | Some("no") => Ok(Some(false)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected true or false, found '{other}'"
        ))),
    }
}

fn non_empty_path(s: Option<&str>) -> Option<PathBuf> {
    s.map(str::trim).filter(|t| !t.is_empty()).map(PathBuf::from)
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let log_level = match parsed.log_level.as_deref().map(str::trim) {
        None | Some("") => LogLevel::default(),
        Some(s) => s.parse::<LogLevel>().map_err(anyhow::Error::msg)?,
    };
    Ok(Config {
        source_dir: non_empty_path(parsed.source_dir.as_deref()),
        destination_dir: non_empty_path(parsed.destination_dir.as_deref()),
        log_level,
        log_file: non_empty_path(parsed.log_file.as_deref()),
        include_hidden: parsed.include_hidden.unwrap_or(false),
        dry_run: parsed.dry_run.unwrap_or(false),
    })
}

/// Parse config XML text.
pub fn parse_config_xml(contents: &str) -> Result<Config> {
    let parsed: XmlConfig = from_xml_str(contents).context("parse config xml")?;
    xml_to_config(parsed)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    parse_config_xml(&contents).with_context(|| format!("in config file '{}'", path.display()))
}

/// Load the config from `MOVE_HIDE_CONFIG` or the default location.
/// Ok(None) when no file exists there; a malformed file is an error.
pub fn load_config() -> Result<Option<(PathBuf, Config)>> {
    let path = default_config_path()?;
    if !path.exists() {
        debug!(path = %path.display(), "no config file");
        return Ok(None);
    }
    let cfg = load_config_from_xml_path(&path)?;
    Ok(Some((path, cfg)))
}

/// Write a commented template config to `path`. Refuses to replace an existing
/// file or to write beneath a symlinked ancestor.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }
    if fs::symlink_metadata(path).is_ok() {
        bail!("Refusing to overwrite existing config at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/move_hide.log".into());

    let content = format!(
        "<!--\n  move_hide configuration (XML)\n\n  All fields are optional; CLI flags override them.\n\n    source_dir       -> directory whose files are moved\n    destination_dir  -> directory the files are moved into\n    log_level        -> quiet | normal | info | debug\n    log_file         -> path to a log file (stdout/stderr still used)\n    include_hidden   -> true/false: also move files that are already hidden\n    dry_run          -> true/false: report moves without touching files\n-->\n<config>\n  <source_dir></source_dir>\n  <destination_dir></destination_dir>\n  <log_level>normal</log_level>\n  <log_file>{suggested_log}</log_file>\n  <include_hidden>false</include_hidden>\n  <dry_run>false</dry_run>\n</config>\n"
    );

    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!(path = %path.display(), "created template config");
    Ok(())
}
