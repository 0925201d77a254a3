//! Binary-level checks: each subcommand against real temp directories.
//! MOVE_HIDE_CONFIG points at a missing file so a developer's own config is never read.

use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn bin(cfg_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("move_hide"));
    cmd.env("MOVE_HIDE_CONFIG", cfg_dir.join("absent.xml"));
    cmd
}

fn stdout_of(out: &std::process::Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn print_config_succeeds() {
    let td = tempdir().unwrap();
    let out = bin(td.path()).arg("--print-config").output().unwrap();
    assert!(out.status.success());
    assert!(stdout_of(&out).contains("MOVE_HIDE_CONFIG"));
}

#[test]
fn list_prints_top_level_files() {
    let td = tempdir().unwrap();
    let dir = td.path().join("d");
    fs::create_dir_all(dir.join("sub")).unwrap();
    fs::write(dir.join("b.txt"), "").unwrap();
    fs::write(dir.join("a.txt"), "").unwrap();
    fs::write(dir.join(".hidden"), "").unwrap();

    let out = bin(td.path()).arg("list").arg(&dir).output().unwrap();
    assert!(out.status.success(), "{out:?}");
    let lines: Vec<String> = stdout_of(&out).lines().map(str::to_string).collect();
    #[cfg(unix)]
    assert_eq!(lines, vec!["a.txt", "b.txt"]);
    #[cfg(not(unix))]
    assert!(lines.contains(&"a.txt".to_string()) && !lines.contains(&"sub".to_string()));
}

#[test]
fn move_then_hide_and_show() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dst = td.path().join("dst");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dst).unwrap();
    fs::write(src.join("report.pdf"), "pdf").unwrap();
    fs::write(src.join("notes.txt"), "notes").unwrap();

    let out = bin(td.path()).arg("move").arg(&src).arg(&dst).output().unwrap();
    assert!(out.status.success(), "{out:?}");
    let text = stdout_of(&out);
    assert!(text.contains("Moved: report.pdf"), "{text}");
    assert!(text.contains("Moved: notes.txt"), "{text}");
    assert!(dst.join("report.pdf").exists());

    let out = bin(td.path())
        .args(["hide", "-C"])
        .arg(&dst)
        .args(["report.pdf", "notes.txt"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{out:?}");
    #[cfg(unix)]
    assert!(dst.join(".report.pdf").exists());

    let out = bin(td.path())
        .args(["show", "-C"])
        .arg(&dst)
        .args(["report.pdf", "notes.txt"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{out:?}");
    assert_eq!(fs::read_to_string(dst.join("report.pdf")).unwrap(), "pdf");
}

#[test]
fn dry_run_leaves_files_in_place() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dst = td.path().join("dst");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dst).unwrap();
    fs::write(src.join("f"), "").unwrap();

    let out = bin(td.path())
        .args(["--dry-run", "move"])
        .arg(&src)
        .arg(&dst)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(stdout_of(&out).contains("Would move: f"));
    assert!(src.join("f").exists());
    assert!(!dst.join("f").exists());
}

#[test]
fn move_without_directories_exits_not_selected() {
    let td = tempdir().unwrap();
    let out = bin(td.path()).arg("move").output().unwrap();
    assert_eq!(out.status.code(), Some(20));
    assert!(String::from_utf8_lossy(&out.stderr).contains("No source directory selected"));
}

#[test]
fn same_directory_exit_code() {
    let td = tempdir().unwrap();
    let d = td.path().join("d");
    fs::create_dir_all(&d).unwrap();
    fs::write(d.join("x"), "").unwrap();
    let out = bin(td.path()).arg("move").arg(&d).arg(&d).output().unwrap();
    assert_eq!(out.status.code(), Some(6));
    assert!(d.join("x").exists());
}

#[test]
fn missing_directory_exit_code() {
    let td = tempdir().unwrap();
    let out = bin(td.path())
        .arg("list")
        .arg(td.path().join("nope"))
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn shell_session_moves_and_toggles() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    let dst = td.path().join("dst");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dst).unwrap();
    fs::write(src.join("report.pdf"), "").unwrap();

    let script = format!(
        "toggle\nmove\nsource {}\ndest {}\nmove\ntoggle\nledger\nstatus\ntoggle\nsource {}\ntoggle\nquit\n",
        src.display(),
        dst.display(),
        src.display()
    );
    let out = bin(td.path()).arg("shell").write_stdin(script).output().unwrap();
    assert!(out.status.success(), "{out:?}");
    let text = stdout_of(&out);

    assert!(text.contains("Please select destination directory first"), "{text}");
    assert!(text.contains("Please select source directory first"), "{text}");
    assert!(text.contains("Source directory selected"), "{text}");
    assert!(text.contains("Successfully moved 1 file(s) to destination"), "{text}");
    assert!(text.contains("Hidden 1 moved file(s) in destination directory"), "{text}");
    assert!(text.contains("Shown 1 moved file(s) in destination directory"), "{text}");
    assert!(text.contains("No files have been moved yet"), "{text}");
    assert!(dst.join("report.pdf").exists());
}

#[test]
fn shell_prompts_for_directory_when_no_path_given() {
    let td = tempdir().unwrap();
    let src = td.path().join("src");
    fs::create_dir_all(&src).unwrap();

    let script = format!("source\n{}\ndest\n\nquit\n", src.display());
    let out = bin(td.path()).arg("shell").write_stdin(script).output().unwrap();
    assert!(out.status.success());
    let text = stdout_of(&out);
    assert!(text.contains("Opening folder selection dialog..."), "{text}");
    assert!(text.contains("Source directory selected"), "{text}");
    assert!(text.contains("No destination directory selected"), "{text}");
}

#[test]
fn shell_ends_on_eof() {
    let td = tempdir().unwrap();
    let out = bin(td.path()).write_stdin("status\n").output().unwrap();
    assert!(out.status.success());
    assert!(stdout_of(&out).contains("No source directory selected"));
}

#[test]
fn apostrophe_in_directory_name_is_kept() {
    let td = tempdir().unwrap();
    let src = td.path().join("Bob's files");
    let dst = td.path().join("done");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&dst).unwrap();
    fs::write(src.join("cv.pdf"), "cv").unwrap();

    let out = bin(td.path()).arg("list").arg(&src).output().unwrap();
    assert!(out.status.success(), "{out:?}");
    assert_eq!(stdout_of(&out).trim(), "cv.pdf");

    let script = format!("source '{}'\ndest {}\nmove\nquit\n", src.display(), dst.display());
    let out = bin(td.path()).arg("shell").write_stdin(script).output().unwrap();
    assert!(out.status.success(), "{out:?}");
    let text = stdout_of(&out);
    assert!(text.contains("Successfully moved 1 file(s) to destination"), "{text}");
    assert!(!src.join("cv.pdf").exists());
    assert!(dst.join("cv.pdf").exists());
}
