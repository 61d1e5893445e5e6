//! End-to-end CLI tests: compute, save, list, export.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const FULL_INPUTS: &[&str] = &[
    "--cycletime-loader",
    "30",
    "--waktu-kerja",
    "120",
    "--jumlah-passing",
    "4",
    "--cycletime-hauler",
    "10",
    "--konversi-jarak",
    "2",
    "--jumlah-hd",
    "5",
];

fn ctmon() -> Command {
    Command::cargo_bin("ctmon").unwrap()
}

#[test]
fn compute_prints_the_derived_metrics() {
    ctmon()
        .arg("compute")
        .args(FULL_INPUTS)
        .assert()
        .success()
        .stdout(predicate::str::contains("2520.00"))
        .stdout(predicate::str::contains("126.00"))
        .stdout(predicate::str::contains("0.25"));
}

#[test]
fn compute_with_empty_form_yields_zeros() {
    ctmon()
        .arg("compute")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.00"));
}

#[test]
fn save_list_export_roundtrip() {
    let tmp = TempDir::new().unwrap();

    ctmon()
        .current_dir(tmp.path())
        .arg("save")
        .args(FULL_INPUTS)
        .args(["--pit", "Pit 13HW", "--unit", "EX1827"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Record saved"));

    ctmon()
        .current_dir(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pit 13HW"))
        .stdout(predicate::str::contains("EX1827"));

    ctmon()
        .current_dir(tmp.path())
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("monitoring_ct_data.csv"));

    let csv = std::fs::read(tmp.path().join("monitoring_ct_data.csv")).unwrap();
    assert!(csv.starts_with(b"\xef\xbb\xbf"));
    let text = String::from_utf8(csv[3..].to_vec()).unwrap();
    assert!(text.starts_with("Waktu dan Tanggal;Lokasi Pit;Unit Loader"));
    assert!(text.contains(";2520.00;"));
}

#[test]
fn save_with_empty_pit_is_rejected() {
    let tmp = TempDir::new().unwrap();

    ctmon()
        .current_dir(tmp.path())
        .arg("save")
        .args(FULL_INPUTS)
        .args(["--pit", "", "--unit", "EX1827"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("complete all monitoring data"));

    // Nothing was persisted.
    ctmon()
        .current_dir(tmp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No records"));
}

#[test]
fn export_with_no_history_produces_no_file() {
    let tmp = TempDir::new().unwrap();

    ctmon()
        .current_dir(tmp.path())
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no records to export"));

    assert!(!tmp.path().join("monitoring_ct_data.csv").exists());
}

#[test]
fn pits_lists_the_equipment_catalog() {
    ctmon()
        .arg("pits")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pit 13HW"))
        .stdout(predicate::str::contains("EX1827"));
}
