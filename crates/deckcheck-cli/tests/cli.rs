//! Runs the `deckcheck` binary end to end.

use std::process::{Command, Output};

fn deckcheck(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_deckcheck"))
        .args(args)
        .env_remove("DECKCHECK_SEED")
        .env_remove("RUST_LOG")
        .output()
        .expect("run deckcheck")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_engines_lists_registry() {
    let output = deckcheck(&["engines"]);
    assert!(output.status.success());
    let text = stdout(&output);
    for name in ["reference", "reference-legacy", "reference-lenient"] {
        assert!(text.contains(name), "missing {name} in {text}");
    }
}

#[test]
fn test_compliant_engine_exits_zero() {
    let output = deckcheck(&["verify", "reference", "--games", "3"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.starts_with("Engine: reference\n"));
    assert!(text.contains("Games: 4 played, 4 passed\n"));
    assert!(text.contains("Result: FULLY COMPLIANT"));
}

#[test]
fn test_lenient_engine_exits_one() {
    let output = deckcheck(&["verify", "reference-lenient", "--games", "2", "--sequential"]);
    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Result: NON-COMPLIANT (1 violation)"));
    assert!(text.contains("--- [Game 2] Move legality: engine silently accepted an illegal decision"));
}

#[test]
fn test_unknown_engine_fails() {
    let output = deckcheck(&["verify", "no-such-engine"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown engine"), "{stderr}");
}

#[test]
fn test_json_report_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("report.json");
    let path_arg = path.to_str().expect("utf-8 path");

    let output = deckcheck(&[
        "--json", "verify", "reference-legacy", "--games", "2", "--seed", "7", "--output", path_arg,
    ]);
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(report["schema_version"], "1");
    assert_eq!(report["engine"], "reference-legacy");
    assert_eq!(report["seed"], 7);
    assert_eq!(report["summary"]["games_attempted"], 3);
    assert_eq!(report["violations"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_config_file_sets_game_count() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("deckcheck.toml");
    std::fs::write(&path, "games = 1\n").expect("write");
    let path_arg = path.to_str().expect("utf-8 path");

    let output = deckcheck(&["verify", "reference", "--config", path_arg]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Games: 2 played, 2 passed\n"));
}
