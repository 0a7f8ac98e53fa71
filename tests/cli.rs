use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const NOW: &str = "2025-01-15T12:00";

/// The binary with an isolated home directory and no ambient config.
fn quickadd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("quickadd").unwrap();
    cmd.env("HOME", home.path())
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off")
        .env_remove("QUICKADD_CONFIG");
    cmd
}

#[test]
fn parse_prints_json_task() {
    let home = TempDir::new().unwrap();
    quickadd(&home)
        .args(["parse", "Fix auth bug tomorrow 3pm #backend @urgent p1"])
        .args(["--now", NOW, "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Fix auth bug\""))
        .stdout(predicate::str::contains("\"dueDate\": \"2025-01-16\""))
        .stdout(predicate::str::contains("\"dueTime\": \"15:00\""))
        .stdout(predicate::str::contains("\"projectName\": \"backend\""))
        .stdout(predicate::str::contains("\"priority\": 1"));
}

#[test]
fn parse_joins_separate_words() {
    let home = TempDir::new().unwrap();
    quickadd(&home)
        .args(["p", "Call", "client", "Jan", "20", "at", "2pm"])
        .args(["--now", NOW, "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Call client\""))
        .stdout(predicate::str::contains("\"dueDate\": \"2025-01-20\""))
        .stdout(predicate::str::contains("\"dueTime\": \"14:00\""));
}

#[test]
fn parse_pretty_shows_detected_fields() {
    let home = TempDir::new().unwrap();
    quickadd(&home)
        .args(["parse", "Review PR p2 @code-review #frontend tomorrow", "--now", NOW])
        .assert()
        .success()
        .stdout(predicate::str::contains("Review PR"))
        .stdout(predicate::str::contains("Detected:"))
        .stdout(predicate::str::contains("Jan 16, 2025"))
        .stdout(predicate::str::contains("#frontend"))
        .stdout(predicate::str::contains("@code-review"));
}

#[test]
fn date_and_time_print_bare_values() {
    let home = TempDir::new().unwrap();
    quickadd(&home)
        .args(["date", "next", "monday", "--now", NOW])
        .assert()
        .success()
        .stdout("2025-01-20\n");

    quickadd(&home)
        .args(["time", "5:30 PM"])
        .assert()
        .success()
        .stdout("17:30\n");
}

#[test]
fn nothing_found_is_not_an_error() {
    let home = TempDir::new().unwrap();
    quickadd(&home)
        .args(["date", "not a date", "--now", NOW, "-o", "json"])
        .assert()
        .success()
        .stdout("null\n");

    quickadd(&home)
        .args(["time", "whenever"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No time found"));
}

#[test]
fn datetime_omits_inferred_time() {
    let home = TempDir::new().unwrap();
    quickadd(&home)
        .args(["datetime", "tomorrow morning", "--now", NOW, "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"date\": \"2025-01-16\""))
        .stdout(predicate::str::contains("\"time\": null"));
}

#[test]
fn invalid_now_fails() {
    let home = TempDir::new().unwrap();
    quickadd(&home)
        .args(["date", "tomorrow", "--now", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid argument"));
}

#[test]
fn config_default_output_is_used() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("custom.yaml");
    std::fs::write(&config_path, "general:\n  default_output: json\n").unwrap();

    quickadd(&home)
        .args(["date", "tomorrow", "--now", NOW])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout("\"2025-01-16\"\n");
}

#[test]
fn invalid_config_fails() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("broken.yaml");
    std::fs::write(&config_path, "general: [not, a, map]\n").unwrap();

    quickadd(&home)
        .args(["time", "3pm"])
        .env("QUICKADD_CONFIG", &config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("config error"));
}

#[test]
fn config_init_writes_default_file() {
    let home = TempDir::new().unwrap();
    quickadd(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let written = home.path().join(".quickadd").join("config.yaml");
    let contents = std::fs::read_to_string(written).unwrap();
    assert!(contents.contains("default_output: pretty"));

    quickadd(&home).args(["config", "init"]).assert().failure();
    quickadd(&home).args(["config", "init", "--force"]).assert().success();
}

#[test]
fn completions_are_generated() {
    let home = TempDir::new().unwrap();
    quickadd(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quickadd"));
}
