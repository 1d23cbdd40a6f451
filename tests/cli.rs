use std::fs;

use assert_cmd::Command;

fn swiftype() -> Command {
    Command::cargo_bin("swiftype").unwrap()
}

#[test]
fn summary_of_empty_history() {
    let dir = tempfile::tempdir().unwrap();

    let output = swiftype()
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--summary")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Tests completed: 0"));
    assert!(stdout.contains("Best score: -"));
}

#[test]
fn summary_reads_stored_results() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("typingResults.json"),
        r#"[
            {"date":"2024-05-01T10:00:00.000Z","wpm":40,"accuracy":90,"mistakes":3,"duration":30},
            {"date":"2024-05-02T10:00:00.000Z","wpm":60,"accuracy":98,"mistakes":1,"duration":60}
        ]"#,
    )
    .unwrap();

    let output = swiftype()
        .arg("--data-dir")
        .arg(dir.path())
        .arg("--summary")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Tests completed: 2"));
    assert!(stdout.contains("Average WPM: 50"));
    assert!(stdout.contains("Average accuracy: 94%"));
    assert!(stdout.contains("Best score: 60 WPM (98% accuracy, 60s test)"));
}

#[test]
fn interactive_mode_requires_a_tty() {
    let dir = tempfile::tempdir().unwrap();

    // assert_cmd hands the child a piped stdin
    let output = swiftype()
        .arg("--data-dir")
        .arg(dir.path())
        .write_stdin("")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("stdin must be a tty"));
}

#[test]
fn unknown_duration_is_rejected() {
    swiftype().args(["-d", "45", "--summary"]).assert().failure();
}
