use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn synthetic_scenario_reports_total_cycles() {
    let mut cmd = Command::cargo_bin("tomasulo_sim").unwrap();
    cmd.args(["--synthetic", "single-add"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("total cycles: 8"));
}

#[test]
fn unknown_synthetic_scenario_fails_with_message() {
    let mut cmd = Command::cargo_bin("tomasulo_sim").unwrap();
    cmd.args(["--synthetic", "not-a-scenario"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown synthetic scenario"));
}

#[test]
fn trace_and_synthetic_are_mutually_exclusive() {
    let mut cmd = Command::cargo_bin("tomasulo_sim").unwrap();
    cmd.args(["--synthetic", "single-add", "--trace", "whatever.json"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("mutually exclusive"));
}

#[test]
fn missing_trace_and_synthetic_fails() {
    let mut cmd = Command::cargo_bin("tomasulo_sim").unwrap();
    cmd.assert().failure().stderr(predicate::str::contains("required"));
}

#[test]
fn json_trace_file_drives_the_engine() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"index": 0, "op": "add", "category": {{"icomp": true, "fcomp": false, "load": false, "store": false, "cond": false, "uncond": false, "trap": false}}, "r_in": [2, 3, null], "r_out": [1, null]}}
        ]"#
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("tomasulo_sim").unwrap();
    cmd.args(["--trace", file.path().to_str().unwrap()]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("total cycles: 8"));
}

#[test]
fn fu_int_override_changes_structural_hazard_timing() {
    let mut cmd = Command::cargo_bin("tomasulo_sim").unwrap();
    cmd.args(["--synthetic", "independent", "--fu-int", "1"]);
    cmd.assert().success();
}
