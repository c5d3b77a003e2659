use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;

/// Helper to get path to fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_list_sections() {
    cargo_bin_cmd!()
        .arg(fixture_path("jagung.md"))
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("#jenis-jagung"))
        .stdout(predicate::str::contains("Hama dan Penyakit"))
        .stdout(predicate::str::contains("Informasi Umum Jagung").not());
}

#[test]
fn test_search_marks_matches() {
    cargo_bin_cmd!()
        .arg(fixture_path("jagung.md"))
        .args(["--search", "hibrida"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jagung **Hibrida** memiliki"))
        .stdout(predicate::str::contains("Pemupukan").not());
}

#[test]
fn test_search_is_case_insensitive_and_literal() {
    cargo_bin_cmd!()
        .arg(fixture_path("jagung.md"))
        .args(["--search", "sp-36"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**SP-36**"))
        .stdout(predicate::str::contains("Syarat Tumbuh").not());

    // "(dosis" is not a valid pattern, but literal mode matches it as text
    cargo_bin_cmd!()
        .arg(fixture_path("jagung.md"))
        .args(["--search", "(dosis"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**(dosis**"));
}

#[test]
fn test_search_without_matches() {
    cargo_bin_cmd!()
        .arg(fixture_path("jagung.md"))
        .args(["--search", "zzz-no-match"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No sections match"));
}

#[test]
fn test_search_json_output() {
    let output = cargo_bin_cmd!()
        .arg(fixture_path("jagung.md"))
        .args(["--search", "jagung", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["query"], "jagung");
    assert_eq!(report["match_mode"], "literal");
    assert_eq!(report["visible"], 1);
    assert_eq!(report["hidden"], 3);
    assert_eq!(report["sections"].as_array().unwrap().len(), 4);
    assert_eq!(report["sections"][0]["id"], "jenis-jagung");
    assert_eq!(report["sections"][0]["visible"], true);
    assert_eq!(report["sections"][1]["visible"], false);
}

#[test]
fn test_pattern_mode() {
    cargo_bin_cmd!()
        .arg(fixture_path("jagung.md"))
        .args(["--search", "ulat|bulai", "--match-mode", "pattern"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Ulat**"))
        .stdout(predicate::str::contains("**bulai**"));

    // An invalid pattern matches nothing
    cargo_bin_cmd!()
        .arg(fixture_path("jagung.md"))
        .args(["--search", "(dosis", "--match-mode", "pattern"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_plain_page_when_not_a_terminal() {
    cargo_bin_cmd!()
        .arg(fixture_path("jagung.md"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Informasi Umum Jagung"))
        .stdout(predicate::str::contains("Ulat grayak"));
}

#[test]
fn test_reads_stdin() {
    cargo_bin_cmd!()
        .args(["-", "--list"])
        .write_stdin("## Panen\nUmur 100 hari.\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("#panen"));
}

#[test]
fn test_nonexistent_file() {
    cargo_bin_cmd!()
        .arg("/nonexistent/jagung.md")
        .arg("--list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read"));
}

#[test]
fn test_missing_file_argument() {
    cargo_bin_cmd!()
        .assert()
        .failure()
        .stderr(predicate::str::contains("markdown file argument is required"));
}

#[test]
fn test_predict_defaults() {
    cargo_bin_cmd!()
        .arg("predict")
        .assert()
        .success()
        .stdout(predicate::str::contains("ARIMA    6,20 ton/ha"))
        .stdout(predicate::str::contains("Model terbaik: ARIMA"))
        .stdout(predicate::str::contains("MAPE: ARIMA 6,5%"));
}

#[test]
fn test_predict_json() {
    let output = cargo_bin_cmd!()
        .args(["predict", "--soil", "baik", "--month", "6", "--area", "2", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let arima = report["arima"].as_f64().unwrap();
    assert!((arima - (5.8 + 0.2) * 1.05).abs() < 1e-9);
    assert_eq!(report["best_model"], "ARIMA");
    assert_eq!(report["month_label"], "Jun");
    assert_eq!(report["input"]["soil"], "baik");
    assert_eq!(report["projection"].as_array().unwrap().len(), 12);
    assert!((report["total_harvest"].as_f64().unwrap() - arima * 2.0).abs() < 1e-9);
}

#[test]
fn test_predict_rejects_invalid_month() {
    cargo_bin_cmd!()
        .args(["predict", "--month", "13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 12"));
}

#[test]
fn test_predict_rejects_unknown_soil() {
    cargo_bin_cmd!()
        .args(["predict", "--soil", "subur"])
        .assert()
        .failure();
}

#[cfg(target_os = "linux")]
#[test]
fn test_dark_mode_persists() {
    let config_home = tempfile::TempDir::new().unwrap();

    cargo_bin_cmd!()
        .env("XDG_CONFIG_HOME", config_home.path())
        .arg("dark-mode")
        .assert()
        .success()
        .stdout(predicate::str::contains("dark mode: off"));

    cargo_bin_cmd!()
        .env("XDG_CONFIG_HOME", config_home.path())
        .args(["dark-mode", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dark mode: on"));

    let saved =
        std::fs::read_to_string(config_home.path().join("jagung").join("config.toml")).unwrap();
    assert!(saved.contains("dark_mode = true"));

    cargo_bin_cmd!()
        .env("XDG_CONFIG_HOME", config_home.path())
        .arg("dark-mode")
        .assert()
        .success()
        .stdout(predicate::str::contains("dark mode: on"));
}
