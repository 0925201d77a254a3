//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the Ctrl-C handler and
//! dispatches the subcommand (or the interactive shell).

use anyhow::{Context, Result};
use chrono::Local;
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, error};

use move_hide::cli::{sanitize_path, sanitize_str, Args, Command};
use move_hide::output as out;
use move_hide::{
    create_template_config, default_config_path, default_strategy, list_files, load_config,
    set_visibility, shutdown, validate, CancelToken, Config, DirectoryPicker, ListOptions,
    MoveHideError, Session, ToggleOutcome, CONFIG_ENV,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Config location queries happen before logging init
    if args.print_config {
        print_config_location();
        return Ok(());
    }
    if args.init_config {
        let path = default_config_path()?;
        create_template_config(&path)?;
        out::print_success(&format!("A template move_hide config was written to: {}", path.display()));
        out::print_info(&format!("Edit it, or set {CONFIG_ENV} to use a different file."));
        return Ok(());
    }

    // Build config (may read XML). CLI args override config values.
    let (cfg_path, mut cfg) = match load_config()? {
        Some((path, cfg)) => (Some(path), cfg),
        None => (None, Config::default()),
    };
    args.apply_overrides(&mut cfg);

    // Hold the guard until run() returns so the file appender flushes
    let _guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    ctrlc::set_handler(|| {
        shutdown::request();
        out::print_warn("Received interrupt; stopping after the current file...");
    })
    .context("failed to install signal handler")?;

    debug!(config_file = ?cfg_path, config = ?cfg, "starting move_hide");

    match args.command.clone().unwrap_or(Command::Shell) {
        Command::List { dir } => run_list(&cfg, dir),
        Command::Move { .. } => run_move(&cfg),
        Command::Hide { dir, names } => run_visibility(dir, &names, true),
        Command::Show { dir, names } => run_visibility(dir, &names, false),
        Command::Shell => {
            let stdin = io::stdin();
            run_shell(&cfg, stdin.lock())
        }
    }
}

fn print_config_location() {
    if let Some(cfg_env) = std::env::var_os(CONFIG_ENV) {
        out::print_info(&format!(
            "Using {CONFIG_ENV} (explicit):\n  {}\n",
            PathBuf::from(cfg_env).display()
        ));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Ok(p) => {
            out::print_info(&format!("Default move_hide config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run with --init-config to create a template.");
            }
        }
        Err(e) => out::print_error(&format!("Could not determine a default config path: {e}")),
    }
}

/// Log a directory-level failure with structured fields and hand it back.
fn report_failure(e: MoveHideError) -> anyhow::Error {
    error!(code = e.code(), kind = %e.kind(), error = %e, "operation failed");
    e.into()
}

fn run_list(cfg: &Config, dir: PathBuf) -> Result<()> {
    let dir = validate(sanitize_path(&dir)).map_err(report_failure)?;
    let strategy = default_strategy();
    let opts = ListOptions {
        include_hidden: cfg.include_hidden,
    };
    let entries: Vec<_> = list_files(&dir, strategy.as_ref(), opts)
        .map_err(report_failure)?
        .collect();
    out::print_listing(&entries);
    Ok(())
}

fn run_move(cfg: &Config) -> Result<()> {
    let mut session = Session::default().with_options(cfg.move_options());
    let source = cfg
        .source_dir
        .as_ref()
        .ok_or(MoveHideError::NotSelected("source"))
        .map_err(report_failure)?;
    let destination = cfg
        .destination_dir
        .as_ref()
        .ok_or(MoveHideError::NotSelected("destination"))
        .map_err(report_failure)?;
    session.select_source(source).map_err(report_failure)?;
    session.select_destination(destination).map_err(report_failure)?;

    let report = session.move_files().map_err(report_failure)?;
    out::print_move_report(&report);
    if report.interrupted {
        return Err(report_failure(MoveHideError::Interrupted));
    }
    Ok(())
}

fn run_visibility(dir: PathBuf, names: &[String], hidden: bool) -> Result<()> {
    let dir = validate(sanitize_path(&dir)).map_err(report_failure)?;
    let strategy = default_strategy();
    let report = set_visibility(&dir, names, hidden, strategy.as_ref(), &CancelToken::new())
        .map_err(report_failure)?;
    out::print_toggle_report(&report);
    if report.interrupted {
        return Err(report_failure(MoveHideError::Interrupted));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Interactive shell
// ---------------------------------------------------------------------------

const SHELL_HELP: &str = "\
Commands:
  source [PATH]   select the source directory (prompts when PATH is omitted)
  dest [PATH]     select the destination directory
  list            list the files waiting in the source directory
  move            move all files from source to destination
  toggle          hide the moved files, or show them again
  ledger          print the files moved in this session
  status          print the current selections and visibility
  help            print this help
  quit            leave the shell";

/// Timestamped status line, like `[2025-01-31 14:02:11] Source directory selected`.
fn status(msg: &str) {
    out::print_user(&format!("[{}] {}", Local::now().format("%Y-%m-%d %H:%M:%S"), msg));
}

fn read_line<R: BufRead>(input: &RefCell<R>) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.borrow_mut().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Directory chooser backed by the shell's input stream.
struct PromptPicker<'a, R> {
    input: &'a RefCell<R>,
}

impl<R: BufRead> DirectoryPicker for PromptPicker<'_, R> {
    fn pick(&self, purpose: &str) -> Option<PathBuf> {
        print!("Select {purpose} directory (empty to cancel): ");
        let _ = io::stdout().flush();
        match read_line(self.input) {
            Ok(Some(line)) if !line.is_empty() => Some(sanitize_str(&line)),
            _ => None,
        }
    }
}

fn run_shell<R: BufRead>(cfg: &Config, input: R) -> Result<()> {
    let input = RefCell::new(input);
    let mut session = Session::default().with_options(cfg.move_options());

    if let Some(src) = &cfg.source_dir {
        select(&mut session, "Source", Some(src.clone()), &input);
    }
    if let Some(dst) = &cfg.destination_dir {
        select(&mut session, "Destination", Some(dst.clone()), &input);
    }
    status("Ready; type help for commands");

    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let Some(line) = read_line(&input)? else {
            break;
        };
        // A Ctrl-C at the prompt only cancels the batch that is running.
        shutdown::reset();

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line.as_str(), ""),
        };
        let arg = (!rest.is_empty()).then(|| sanitize_str(rest));

        match cmd {
            "" => {}
            "source" | "src" => select(&mut session, "Source", arg, &input),
            "dest" | "destination" => select(&mut session, "Destination", arg, &input),
            "list" | "ls" => shell_list(&session),
            "move" => shell_move(&mut session),
            "toggle" => shell_toggle(&mut session),
            "ledger" => {
                if session.ledger().is_empty() {
                    status("No files have been moved yet");
                }
                for name in session.ledger().iter() {
                    out::print_user(name);
                }
            }
            "status" => shell_status(&session),
            "help" | "?" => out::print_user(SHELL_HELP),
            "quit" | "exit" | "q" => break,
            other => status(&format!("Unknown command '{other}'; type help")),
        }
    }
    Ok(())
}

fn select<R: BufRead>(session: &mut Session, which: &str, arg: Option<PathBuf>, input: &RefCell<R>) {
    let is_source = which == "Source";
    let picked = match arg {
        Some(p) => Some(p),
        None => {
            status("Opening folder selection dialog...");
            PromptPicker { input }.pick(if is_source { "source" } else { "destination" })
        }
    };
    let Some(path) = picked else {
        status(&format!("No {} directory selected", which.to_ascii_lowercase()));
        return;
    };
    let result = if is_source {
        session.select_source(&path).map(|d| d.to_string())
    } else {
        session.select_destination(&path).map(|d| d.to_string())
    };
    match result {
        Ok(dir) => status(&format!("{which} directory selected: {dir}")),
        Err(e) => {
            error!(code = e.code(), kind = %e.kind(), error = %e, "selection rejected");
            status(&format!("Error selecting {} directory: {e}", which.to_ascii_lowercase()));
        }
    }
}

fn shell_list(session: &Session) {
    match session.list_source() {
        Ok(entries) if entries.is_empty() => status("Source directory has no files to move"),
        Ok(entries) => out::print_listing(&entries),
        Err(MoveHideError::NotSelected(_)) => status("Please select source directory first"),
        Err(e) => status(&format!("Error listing source directory: {e}")),
    }
}

fn shell_move(session: &mut Session) {
    if session.source().is_none() {
        status("Please select source directory first");
        return;
    }
    if session.destination().is_none() {
        status("Please select destination directory");
        return;
    }
    status("Moving files from source to destination...");
    match session.move_files() {
        Ok(report) => {
            out::print_move_report(&report);
            if report.dry_run {
                status(&format!("Dry run: {} file(s) would be moved", report.moved.len()));
            } else {
                status(&format!(
                    "Successfully moved {} file(s) to destination",
                    report.moved.len()
                ));
            }
        }
        Err(e) => status(&format!("Error occurred while moving files: {e}")),
    }
}

fn shell_toggle(session: &mut Session) {
    match session.toggle_visibility() {
        Ok(ToggleOutcome::NothingToToggle) => status("No files have been moved yet"),
        Ok(ToggleOutcome::Applied(report)) => {
            out::print_toggle_report(&report);
            let verb = if report.hidden { "Hidden" } else { "Shown" };
            status(&format!(
                "{verb} {} moved file(s) in destination directory",
                report.succeeded_count()
            ));
        }
        Err(MoveHideError::NotSelected(_)) => status("Please select destination directory first"),
        Err(e) => status(&format!("Error occurred while toggling file visibility: {e}")),
    }
}

fn shell_status(session: &Session) {
    let show = |d: Option<&move_hide::DirectoryPath>, which: &str| match d {
        Some(d) => d.to_string(),
        None => format!("No {which} directory selected"),
    };
    out::print_user(&format!("Source:      {}", show(session.source(), "source")));
    out::print_user(&format!("Destination: {}", show(session.destination(), "destination")));
    out::print_user(&format!("Moved files: {}", session.ledger().len()));
    out::print_user(&format!("Visibility:  {:?}", session.visibility()));
    out::print_user(&format!("Strategy:    {}", session.strategy().name()));
}
