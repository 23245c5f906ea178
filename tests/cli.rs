use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn curator() -> Command {
    let mut cmd = Command::cargo_bin("location-curator").unwrap();
    cmd.env_remove("GOOGLE_PLACES_API_KEY");
    cmd
}

fn locations_csv(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("locations.csv");
    fs::write(&path, "Location\nMuir Woods\nPier 39: Sea Lions\n").unwrap();
    path
}

#[test]
fn test_profiles_lists_builtins() {
    let temp = TempDir::new().unwrap();
    curator()
        .args(["profiles", "--config"])
        .arg(temp.path().join("missing.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("* general"))
        .stdout(predicate::str::contains("restaurant"))
        .stdout(predicate::str::contains("trailhead"));
}

#[test]
fn test_profiles_include_configured() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("curator.yaml");
    fs::write(
        &config,
        "profile: museums\nprofiles:\n  museums:\n    categories: [gallery, facade]\n",
    )
    .unwrap();

    curator()
        .args(["profiles", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configured profiles:"))
        .stdout(predicate::str::contains("* museums"));
}

#[test]
fn test_schema_describes_config() {
    curator()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("max_candidates"))
        .stdout(predicate::str::contains("select_count"));
}

#[test]
fn test_dry_run_prints_plan() {
    let temp = TempDir::new().unwrap();
    let csv = locations_csv(&temp);
    let output = temp.path().join("out");

    curator()
        .arg("run")
        .arg(&csv)
        .arg(&output)
        .args(["--dry-run", "--config"])
        .arg(temp.path().join("missing.yaml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Execution Plan"))
        .stdout(predicate::str::contains("Muir Woods -> Muir_Woods"))
        .stdout(predicate::str::contains("Pier_39_Sea_Lions"));

    assert!(!output.exists());
}

#[test]
fn test_run_requires_api_key() {
    let temp = TempDir::new().unwrap();
    let csv = locations_csv(&temp);

    curator()
        .arg("run")
        .arg(&csv)
        .arg(temp.path().join("out"))
        .args(["--skip-preflight", "--config"])
        .arg(temp.path().join("missing.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Google Places API key"));
}

#[test]
fn test_run_rejects_unknown_profile() {
    let temp = TempDir::new().unwrap();
    let csv = locations_csv(&temp);

    curator()
        .arg("run")
        .arg(&csv)
        .args(["--dry-run", "--profile", "zoo", "--config"])
        .arg(temp.path().join("missing.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("zoo"));
}

#[test]
fn test_run_reports_missing_column() {
    let temp = TempDir::new().unwrap();
    let csv = temp.path().join("places.csv");
    fs::write(&csv, "Name\nAlcatraz\n").unwrap();

    curator()
        .arg("run")
        .arg(&csv)
        .args(["--dry-run", "--config"])
        .arg(temp.path().join("missing.yaml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Column 'Location' not found"));
}
