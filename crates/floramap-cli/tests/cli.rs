// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_help_lists_subcommands() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("floramap")?;
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("scan"))
        .stdout(predicates::str::contains("instances"))
        .stdout(predicates::str::contains("verify"))
        .stdout(predicates::str::contains("duplicates"))
        .stdout(predicates::str::contains("map"));
    Ok(())
}

#[test]
fn test_scan_reports_files_without_gps() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("redclover12.jpg"), b"not an image")?;
    fs::write(dir.path().join(".hidden.jpg"), b"skip")?;

    let mut cmd = Command::cargo_bin("floramap")?;
    cmd.arg("scan").arg(dir.path());
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("redclover12.jpg"))
        .stdout(predicates::str::contains("no GPS location"))
        .stdout(predicates::str::contains("[redclover]"))
        .stdout(predicates::str::contains("1 images scanned, 0 with GPS locations"));
    Ok(())
}

#[test]
fn test_verify_empty_survey_passes() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    let mut cmd = Command::cargo_bin("floramap")?;
    cmd.arg("verify").arg(dir.path());
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Instances (unique plants): 0"))
        .stdout(predicates::str::contains("single species"));
    Ok(())
}

#[test]
fn test_duplicates_without_gps_records() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("thistle1.jpg"), b"not an image")?;

    let mut cmd = Command::cargo_bin("floramap")?;
    cmd.arg("duplicates").arg(dir.path());
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("No duplicate latitude values"));
    Ok(())
}

#[test]
fn test_map_writes_output_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let output = dir.path().join("maps").join("flower_map.html");

    let mut cmd = Command::cargo_bin("floramap")?;
    cmd.arg("map").arg(dir.path()).arg("--output").arg(&output);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Rendered 0 markers"));

    let html = fs::read_to_string(&output)?;
    assert!(html.contains("L.map"));
    Ok(())
}

#[test]
fn test_instances_json_export() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    fs::write(dir.path().join("aster1.jpg"), b"not an image")?;
    let output = dir.path().join("locations.json");

    let mut cmd = Command::cargo_bin("floramap")?;
    cmd.arg("instances")
        .arg(dir.path())
        .arg("--output")
        .arg(&output);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("0 plant instances"))
        .stdout(predicates::str::contains("Exported location table"));

    let rows: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output)?)?;
    assert!(rows.as_array().unwrap().is_empty());
    Ok(())
}

#[test]
fn test_duplicates_rejects_unknown_column() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;

    let mut cmd = Command::cargo_bin("floramap")?;
    cmd.arg("duplicates")
        .arg(dir.path())
        .arg("--column")
        .arg("altitude");
    cmd.assert().failure();
    Ok(())
}
