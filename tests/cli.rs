use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn paytrack(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("paytrack").unwrap();
    cmd.env("PAYTRACK_CONFIG_DIR", config_dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("PAYTRACK_API_KEY");
    cmd
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// A config dir with `init` already run against `<tmp>/data`.
fn setup() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    paytrack(dir.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("paytrack is ready"));
    dir
}

#[test]
fn test_init_creates_settings_and_database() {
    let dir = setup();
    assert!(dir.path().join("settings.json").exists());
    assert!(dir.path().join("data").join("paytrack.db").exists());
}

#[test]
fn test_commands_require_init() {
    let dir = tempfile::tempdir().unwrap();
    paytrack(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("paytrack init"));
}

#[test]
fn test_add_derives_hours_and_lists_entry() {
    let dir = setup();
    paytrack(dir.path())
        .args(["add", "--date", &today(), "--start", "09:00", "--end", "17:30", "--tips", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry saved"))
        .stdout(predicate::str::contains("8.5h"));

    paytrack(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(today()))
        .stdout(predicate::str::contains("09:00-17:30"))
        .stdout(predicate::str::contains("$20.00"));
}

#[test]
fn test_add_without_positive_hours_fails() {
    let dir = setup();
    paytrack(dir.path())
        .args(["add", "--hours", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Hours must be greater than zero"));

    paytrack(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries"));
}

#[test]
fn test_add_rejects_bad_date() {
    let dir = setup();
    paytrack(dir.path())
        .args(["add", "--date", "01/08/2024", "--hours", "8"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYY-MM-DD"));
}

#[test]
fn test_report_print_totals_regular_hours() {
    let dir = setup();
    let date = today();
    paytrack(dir.path())
        .args(["add", "--date", &date, "--hours", "8"])
        .assert()
        .success();
    paytrack(dir.path())
        .args(["add", "--date", &date, "--hours", "4", "--holiday"])
        .assert()
        .success();

    paytrack(dir.path())
        .args(["report", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(4h) [Holiday]"))
        .stdout(predicate::str::contains("-> 4.00h"))
        .stdout(predicate::str::contains("-> 8.00hrs"))
        .stdout(predicate::str::contains("Total: 8.00h"));
}

#[test]
fn test_report_with_no_entries() {
    let dir = setup();
    paytrack(dir.path())
        .args(["report", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries in the selected period."));
}

#[test]
fn test_custom_range_excludes_outside_dates() {
    let dir = setup();
    paytrack(dir.path())
        .args(["add", "--date", "2024-01-08", "--hours", "8"])
        .assert()
        .success();
    paytrack(dir.path())
        .args(["add", "--date", "2024-02-20", "--hours", "5"])
        .assert()
        .success();

    paytrack(dir.path())
        .args(["list", "--from", "2024-01-01", "--to", "2024-01-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-08"))
        .stdout(predicate::str::contains("2024-02-20").not());
}

#[test]
fn test_unpadded_range_bounds_keep_entries() {
    let dir = setup();
    paytrack(dir.path())
        .args(["add", "--date", "2024-1-8", "--hours", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-08"));

    paytrack(dir.path())
        .args(["list", "--from", "2024-1-1", "--to", "2024-1-31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-01 to 2024-01-31"))
        .stdout(predicate::str::contains("2024-01-08"));
}

#[test]
fn test_range_bounds_must_be_dates() {
    let dir = setup();
    paytrack(dir.path())
        .args(["stats", "--from", "last week", "--to", "2024-01-31"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date 'last week'"));
}

#[test]
fn test_edit_without_changes_leaves_entry() {
    let dir = setup();
    paytrack(dir.path())
        .args(["add", "--date", &today(), "--hours", "8"])
        .assert()
        .success();

    paytrack(dir.path())
        .args(["edit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to change"));

    paytrack(dir.path())
        .arg("list")
        .assert()
        .success()
        // 8h * 17.20, unchanged
        .stdout(predicate::str::contains("$137.60"));
}

#[test]
fn test_edit_marks_holiday() {
    let dir = setup();
    paytrack(dir.path())
        .args(["add", "--date", &today(), "--hours", "8"])
        .assert()
        .success();

    paytrack(dir.path())
        .args(["edit", "1", "--holiday", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry updated"))
        // 8h * 17.20 * 1.5
        .stdout(predicate::str::contains("$206.40"));
}

#[test]
fn test_delete_missing_id_fails() {
    let dir = setup();
    paytrack(dir.path())
        .args(["delete", "999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No entry with ID 999"));
}

#[test]
fn test_delete_removes_entry() {
    let dir = setup();
    paytrack(dir.path())
        .args(["add", "--date", &today(), "--hours", "6"])
        .assert()
        .success();
    paytrack(dir.path())
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry deleted"));
    paytrack(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries"));
}

#[test]
fn test_hours_wraps_past_midnight() {
    let dir = tempfile::tempdir().unwrap();
    paytrack(dir.path())
        .args(["hours", "22:00", "02:30"])
        .assert()
        .success()
        .stdout("4.5\n");
}

#[test]
fn test_rates_set_persists() {
    let dir = setup();
    paytrack(dir.path())
        .args(["rates", "set", "--hourly", "20"])
        .assert()
        .success();
    paytrack(dir.path())
        .args(["rates", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$20.00"))
        .stdout(predicate::str::contains("8.22%"));

    paytrack(dir.path())
        .args(["rates", "set", "--tax", "-1"])
        .assert()
        .failure();
}

#[test]
fn test_korean_stats() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    paytrack(dir.path())
        .args(["init", "--data-dir", data_dir.to_str().unwrap(), "--lang", "ko"])
        .assert()
        .success();
    paytrack(dir.path())
        .args(["add", "--date", &today(), "--hours", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("저장 성공"));
    paytrack(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("총 수입"));
}

#[test]
fn test_backup_writes_snapshot() {
    let dir = setup();
    paytrack(dir.path())
        .args(["add", "--date", &today(), "--hours", "3"])
        .assert()
        .success();
    paytrack(dir.path())
        .arg("backup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 1 entries"));

    let snapshot = std::fs::read_to_string(dir.path().join("data").join("entries-cache.json")).unwrap();
    let rows: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 1);
}

#[cfg(feature = "remote")]
#[test]
fn test_unreachable_store_falls_back_to_cache() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    let settings = serde_json::json!({
        "data_dir": data_dir.to_str().unwrap(),
        "store": {"backend": "remote", "url": "http://127.0.0.1:9", "api_key": "test-key"},
    });
    std::fs::write(dir.path().join("settings.json"), settings.to_string()).unwrap();
    let cached = serde_json::json!([
        {"id": 7, "date": today(), "hours": 6.0, "is_holiday": false,
         "gross_pay": 103.2, "deductions": 8.48, "net_pay": 94.72, "tips": 0}
    ]);
    std::fs::write(data_dir.join("entries-cache.json"), cached.to_string()).unwrap();

    paytrack(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("$94.72"))
        .stderr(predicate::str::contains("showing cached entries"));
}
