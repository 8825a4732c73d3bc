//! Tests for the `generate`, `preview` and `themes` commands

use calamine::{open_workbook, Data, Reader, Xlsx};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::tempdir;

fn focus_tracker_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_focus-tracker"))
}

fn run(args: &[&str]) -> Output {
    Command::new(focus_tracker_binary())
        .env_remove("FOCUS_TRACKER_CONFIG")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute focus-tracker")
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

// =============================================================================
// generate
// =============================================================================

#[test]
fn generate_writes_workbook() {
    let dir = tempdir().unwrap();
    let workbook = dir.path().join("november.xlsx");

    let output = run(&[
        "generate",
        "--year",
        "2025",
        "--month",
        "11",
        "--habit",
        "Read",
        "--habit",
        "Run",
        "-o",
        path_arg(&workbook),
    ]);

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Created:"), "Should show 'Created:'");
    assert!(stdout.contains("november.xlsx"), "Should show filename");

    let mut book: Xlsx<_> = open_workbook(&workbook).expect("workbook should open");
    assert_eq!(book.sheet_names(), vec!["Habits", "Week"]);

    let cells = book.worksheet_range("Habits").unwrap();
    assert_eq!(
        cells.get_value((1, 1)),
        Some(&Data::String("November 2025".into()))
    );
    assert_eq!(cells.get_value((11, 1)), Some(&Data::String("Read".into())));
    assert_eq!(cells.get_value((12, 1)), Some(&Data::String("Run".into())));
}

#[test]
fn generate_uses_config_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("tracker.toml");
    let workbook = dir.path().join("from-config.xlsx");
    fs::write(
        &config,
        format!(
            "year = 2024\nmonth = 2\ntitle = \"Leap Focus\"\ntasks_per_day = 5\n\
             habits = [\"Stretch\"]\noutput = \"{}\"\n",
            path_arg(&workbook).replace('\\', "\\\\")
        ),
    )
    .unwrap();

    let output = run(&["generate", "--no-charts", "--config", path_arg(&config)]);
    assert!(
        output.status.success(),
        "Command should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let mut book: Xlsx<_> = open_workbook(&workbook).expect("workbook should open");
    let cells = book.worksheet_range("Habits").unwrap();
    assert_eq!(
        cells.get_value((1, 1)),
        Some(&Data::String("Leap Focus".into()))
    );
    // Feb 29 is the last day column
    assert_eq!(cells.get_value((9, 30)), Some(&Data::Float(29.0)));

    // Five task rows, so "Completed" sits right after them
    let week = book.worksheet_range("Week").unwrap();
    assert_eq!(
        week.get_value((16, 1)),
        Some(&Data::String("Completed".into()))
    );
}

#[test]
fn generate_rejects_invalid_month() {
    let dir = tempdir().unwrap();
    let workbook = dir.path().join("bad.xlsx");

    let output = run(&[
        "generate",
        "--year",
        "2025",
        "--month",
        "13",
        "-o",
        path_arg(&workbook),
    ]);

    assert!(!output.status.success(), "Command should fail");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("month"), "Should mention the month: {stderr}");
    assert!(!workbook.exists(), "No workbook should be written");
}

#[test]
fn generate_rejects_unknown_theme() {
    let dir = tempdir().unwrap();
    let workbook = dir.path().join("bad.xlsx");

    let output = run(&[
        "generate",
        "--theme",
        "neon",
        "-o",
        path_arg(&workbook),
    ]);

    assert!(!output.status.success(), "Command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("neon"), "Should name the theme: {stderr}");
}

#[test]
fn generate_missing_config_fails() {
    let dir = tempdir().unwrap();
    let output = run(&[
        "generate",
        "--config",
        path_arg(&dir.path().join("nope.toml")),
    ]);

    assert!(!output.status.success(), "Command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nope.toml"), "Should name the file: {stderr}");
}

// =============================================================================
// preview / themes
// =============================================================================

#[test]
fn preview_text() {
    let output = run(&[
        "preview", "--year", "2025", "--month", "11", "--habit", "Read",
    ]);

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("November 2025\n"));
    assert!(stdout.contains("  Week 1  01 SAT  02 SUN* 03 MON"));
    assert!(stdout.contains("   1. Read"));
}

#[test]
fn preview_json() {
    let output = run(&[
        "preview", "--year", "2026", "--month", "2", "--format", "json",
    ]);

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"days_in_month\": 28"));
    assert!(stdout.contains("\"weeks\": 4"));
    assert!(stdout.contains("\"first_weekday\": \"SUN\""));
}

#[test]
fn themes_lists_builtins() {
    let output = run(&["themes"]);

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let names: Vec<&str> = stdout.lines().collect();
    assert_eq!(names, vec!["pastel", "slate"]);
}
