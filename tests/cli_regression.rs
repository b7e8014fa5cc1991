// Regression tests: CLI renders plans deterministically and reports
// errors as miette diagnostics with lattice:: codes.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::fs;

use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn plan_renders_every_invocation_name() {
    let file = "tests/plan_demo.matrix.yaml";
    fs::write(
        file,
        r#"
- method: "pairs"
  parameters:
    - name: a
      type: int
      values: [1, 2]
    - name: b
      type: str
      values: [x, y]
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("lattice").unwrap();
    cmd.arg("plan").arg(file);
    cmd.assert()
        .success()
        .stdout(contains("pairs (4 invocations)"))
        .stdout(contains("[1] 1, x"))
        .stdout(contains("[4] 2, y"));

    let _ = fs::remove_file(file);
}

#[test]
fn count_totals_across_methods() {
    let file = "tests/count_demo.matrix.yaml";
    fs::write(
        file,
        r#"
- method: "three"
  parameters:
    - name: n
      type: int
      range: { from: 1, to: 3, closed: true }
- method: "two"
  parameters:
    - name: s
      type: str
      values: [a, b]
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("lattice").unwrap();
    cmd.arg("count").arg(file);
    cmd.assert()
        .success()
        .stdout(contains("three: 3 invocations"))
        .stdout(contains("two: 2 invocations"))
        .stdout(contains("total: 5"));

    let _ = fs::remove_file(file);
}

#[test]
fn json_plan_is_machine_readable() {
    let file = "tests/json_demo.matrix.yaml";
    fs::write(
        file,
        r#"
- method: "solo"
  parameters:
    - name: n
      type: int
      values: [7]
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("lattice").unwrap();
    cmd.arg("plan").arg(file).arg("--json");
    let output = cmd.assert().success().get_output().stdout.clone();
    let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(parsed[0]["method"], "solo");
    assert_eq!(parsed[0]["total"], 1);
    assert_eq!(parsed[0]["invocations"][0]["name"], "[1] 7");

    let _ = fs::remove_file(file);
}

#[test]
fn cli_reports_miette_diagnostics_on_misconfiguration() {
    // A parameter with two sources is the canonical configuration error.
    let bad_file = "tests/bad_config.matrix.yaml";
    fs::write(
        bad_file,
        r#"
- method: "conflict"
  parameters:
    - name: n
      type: int
      values: [1]
      range: { from: 1, to: 3 }
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("lattice").unwrap();
    cmd.arg("check").arg(bad_file);
    cmd.assert()
        .failure()
        .stderr(contains("lattice::configuration::ambiguous_sources"));

    let _ = fs::remove_file(bad_file);
}

#[test]
fn check_passes_on_a_clean_file() {
    let file = "tests/clean.matrix.yaml";
    fs::write(
        file,
        r#"
enums:
  Side: [LEFT, RIGHT]
methods:
  - method: "sides"
    parameters:
      - name: side
        type: Side
        enum: {}
"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("lattice").unwrap();
    cmd.arg("check").arg(file);
    cmd.assert()
        .success()
        .stdout(contains("1 methods resolve cleanly"));

    let _ = fs::remove_file(file);
}
