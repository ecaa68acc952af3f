//! Command-level smoke tests for the `solve` subcommand.

use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    Command::cargo_bin("maritime-router").expect("binary exists")
}

fn solve_args() -> Vec<&'static str> {
    vec![
        "solve",
        "--origin-lat", "51.9",
        "--origin-lon", "4.0",
        "--dest-lat", "53.5",
        "--dest-lon", "8.6",
        "--swarm-size", "10",
        "--max-iterations", "50",
        "--n-waypoints", "3",
        "--seed", "1",
    ]
}

#[test]
fn solve_prints_text_output_by_default() {
    cli()
        .args(solve_args())
        .assert()
        .success()
        .stdout(predicate::str::contains("archive holds"));
}

#[test]
fn solve_supports_json_output() {
    let output = cli()
        .arg("--format")
        .arg("json")
        .args(solve_args())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON output");
    assert!(json.get("solutions").is_some());
    assert!(json.get("archive_size").is_some());
    assert!(json["solutions"].as_array().unwrap().len() > 0);
}

#[test]
fn solve_rejects_an_out_of_range_waypoint() {
    cli()
        .args([
            "solve",
            "--origin-lat", "120.0",
            "--origin-lon", "4.0",
            "--dest-lat", "53.5",
            "--dest-lon", "8.6",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid origin waypoint"));
}
