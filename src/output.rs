use owo_colors::OwoColorize;

use crate::fs_ops::{FileEntry, MoveReport};
use crate::visibility::ToggleReport;

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print a plain user-facing line (no prefix). Use this for primary outputs
/// such as moved filenames which users may script against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// One name per line, as `list` output.
pub fn print_listing<'a>(entries: impl IntoIterator<Item = &'a FileEntry>) {
    for e in entries {
        print_user(e.name());
    }
}

/// Moved names on stdout, failures on stderr, then a one-line summary.
pub fn print_move_report(report: &MoveReport) {
    let verb = if report.dry_run { "Would move" } else { "Moved" };
    for name in &report.moved {
        print_user(&format!("{verb}: {name}"));
    }
    for f in &report.failed {
        print_warn(&f.to_string());
    }
    if report.interrupted {
        print_warn("Move interrupted; remaining files were left in the source directory");
    }
    let summary = format!(
        "{} {} file(s), {} failed",
        verb,
        report.moved.len(),
        report.failed.len()
    );
    if report.failed.is_empty() {
        print_success(&summary);
    } else {
        print_info(&summary);
    }
}

pub fn print_toggle_report(report: &ToggleReport) {
    let verb = if report.hidden { "Hidden" } else { "Shown" };
    for name in &report.applied {
        print_user(&format!("{verb}: {name}"));
    }
    for name in &report.unchanged {
        print_user(&format!("Unchanged: {name}"));
    }
    for f in &report.failed {
        print_warn(&f.to_string());
    }
    if report.interrupted {
        print_warn("Visibility change interrupted");
    }
    let summary = format!(
        "{} {} file(s), {} failed",
        verb,
        report.succeeded_count(),
        report.failed.len()
    );
    if report.all_failed() {
        print_error(&summary);
    } else {
        print_success(&summary);
    }
}
