//! CLI integration tests.

use assert_cmd::Command;
use chrono::{Duration, Utc};
use predicates::prelude::*;

fn payplan() -> Command {
    Command::cargo_bin("payplan").expect("binary builds")
}

/// A reminder whose due date stays inside the plausibility window.
fn klarna_reminder() -> (String, String) {
    let due = (Utc::now().date_naive() + Duration::days(45))
        .format("%Y-%m-%d")
        .to_string();
    let text = format!("Klarna reminder\nPayment 2 of 4: $45.00\nDue date: {due}\n");
    (text, due)
}

#[test]
fn extracts_item_from_stdin() {
    let (text, due) = klarna_reminder();

    payplan()
        .arg("extract")
        .write_stdin(text)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"provider\":\"klarna\""))
        .stdout(predicate::str::contains(format!("\"due_date\":\"{due}\"")))
        .stdout(predicate::str::contains("\"amount_minor\":4500"));
}

#[test]
fn unrecognized_text_reports_issue_but_succeeds() {
    payplan()
        .arg("extract")
        .write_stdin("A completely unrelated note about the weather today.")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"items\":[]"))
        .stdout(predicate::str::contains("Provider not recognized"))
        .stderr(predicate::str::contains("could not be extracted"));
}

#[test]
fn pretty_output_and_file_write() {
    let (text, _) = klarna_reminder();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("result.json");

    payplan()
        .arg("extract")
        .arg("--pretty")
        .arg("--output")
        .arg(&out)
        .write_stdin(text)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 item(s)"));

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("\"duplicates_removed\": 0"));
}

#[test]
fn rejects_invalid_timezone() {
    payplan()
        .arg("extract")
        .arg("--timezone")
        .arg("Mars/Olympus")
        .write_stdin("anything")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid time zone"));
}

#[test]
fn providers_lists_priority_order() {
    payplan()
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("Klarna"))
        .stdout(predicate::str::contains("Afterpay"));
}

#[test]
fn config_init_and_show_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("payplan.json");

    payplan()
        .arg("config")
        .arg("init")
        .arg("--output")
        .arg(&path)
        .assert()
        .success();

    payplan()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"max_items\": 200"));
}
