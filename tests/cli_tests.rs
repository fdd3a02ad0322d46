mod support;

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

use support::config::Workspace;

fn unimarket() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_unimarket"));
    cmd.env_remove("RUST_LOG")
        .env_remove("GEMINI_API_KEY")
        .env_remove("OPENAI_API_KEY")
        .env_remove("ANTHROPIC_API_KEY");
    cmd
}

/// Payload of the first JSON line of type `kind` on stdout.
fn json_payload(stdout: &[u8], kind: &str) -> Value {
    String::from_utf8_lossy(stdout)
        .lines()
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .find(|value| value["type"] == kind)
        .map(|value| value["payload"].clone())
        .unwrap_or_else(|| panic!("no {kind} line in output"))
}

#[test]
fn run_writes_every_file() {
    let ws = Workspace::offline();

    unimarket()
        .arg("run")
        .arg("-c")
        .arg(&ws.config)
        .assert()
        .success();

    for file in [
        "raw_data.json",
        "unified_data.json",
        "final_products_comprehensive.csv",
        "final_products_simple.csv",
        "summary_statistics.csv",
        "analysis_reports.json",
    ] {
        assert!(ws.output(file).exists(), "missing {file}");
    }
}

#[test]
fn run_json_reports_every_stage() {
    let ws = Workspace::offline();

    let output = unimarket()
        .args(["--json", "run", "-c"])
        .arg(&ws.config)
        .output()
        .expect("run unimarket");
    assert!(output.status.success());

    let summary = json_payload(&output.stdout, "run");
    let collected = summary["collect"]["total_markets"].as_u64().unwrap();
    let grouped = summary["unify"]["unified_groups"].as_u64().unwrap();
    assert!(collected > 0);
    assert!(grouped > 0 && grouped <= collected);
    assert_eq!(summary["unify"]["scorer"], "lexical");
    assert_eq!(
        summary["report"]["total_products"].as_u64().unwrap(),
        grouped
    );
}

#[test]
fn stages_chain_through_the_output_directory() {
    let ws = Workspace::offline();

    for stage in ["collect", "unify", "report", "corpus"] {
        unimarket()
            .arg(stage)
            .arg("-c")
            .arg(&ws.config)
            .assert()
            .success();
    }

    let corpus = fs::read_to_string(ws.output("corpus.jsonl")).expect("corpus file");
    assert!(corpus.lines().count() > 2);
    for line in corpus.lines() {
        let doc: Value = serde_json::from_str(line).expect("one document per line");
        assert!(doc["content"].is_string());
    }
}

#[test]
fn output_dir_flag_overrides_config() {
    let ws = Workspace::offline();
    let elsewhere = ws.dir.path().join("elsewhere");

    unimarket()
        .arg("collect")
        .arg("-c")
        .arg(&ws.config)
        .arg("-o")
        .arg(&elsewhere)
        .assert()
        .success();

    assert!(elsewhere.join("raw_data.json").exists());
    assert!(!ws.output("raw_data.json").exists());
}

#[test]
fn unify_without_collect_explains_what_is_missing() {
    let ws = Workspace::offline();

    unimarket()
        .arg("unify")
        .arg("-c")
        .arg(&ws.config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn score_json_breaks_down_the_lexical_verdict() {
    let ws = Workspace::offline();

    let output = unimarket()
        .args([
            "--json",
            "score",
            "Trump wins 2024 election",
            "Donald Trump victory in the 2024 election",
            "-c",
        ])
        .arg(&ws.config)
        .output()
        .expect("run unimarket");
    assert!(output.status.success());

    let view = json_payload(&output.stdout, "score");
    assert_eq!(view["scorer"], "lexical");
    assert_eq!(view["keyword_similarity"].as_f64(), Some(1.0));
    assert_eq!(view["verdict"]["same_event"], true);
    assert_eq!(view["accepted"], true);
}

#[test]
fn score_prints_human_readable_sections() {
    let ws = Workspace::offline();

    unimarket()
        .args(["--color", "never", "score", "Bitcoin above $100k", "Fed cuts rates", "-c"])
        .arg(&ws.config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Verdict"))
        .stdout(predicate::str::contains("Not merged"));
}

#[test]
fn config_validate_warns_about_demo_mode() {
    let ws = Workspace::offline();

    let output = unimarket()
        .args(["--json", "config", "validate", "-c"])
        .arg(&ws.config)
        .output()
        .expect("run unimarket");
    assert!(output.status.success());

    let report = json_payload(&output.stdout, "validation");
    let warnings: Vec<&str> = report["warnings"]
        .as_array()
        .expect("warnings array")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(warnings.iter().any(|w| w.contains("Demo mode")));
}

#[test]
fn config_show_reflects_the_file() {
    let ws = Workspace::offline();

    let output = unimarket()
        .args(["--json", "config", "show", "-c"])
        .arg(&ws.config)
        .output()
        .expect("run unimarket");
    assert!(output.status.success());

    let view = json_payload(&output.stdout, "config");
    assert_eq!(view["sources"]["demo"], true);
    assert_eq!(view["matching"]["semantic"], false);
    assert_eq!(view["matching"]["threshold"].as_f64(), Some(0.65));
}

#[test]
fn config_init_writes_the_template_once() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("config.toml");

    unimarket()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    unimarket()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn malformed_config_exits_nonzero() {
    let ws = Workspace::with_config("[matching\nthreshold = 0.5\n");

    unimarket()
        .args(["config", "validate", "-c"])
        .arg(&ws.config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn out_of_range_threshold_names_the_key() {
    let ws = Workspace::with_config("[matching]\nthreshold = 1.5\n");

    unimarket()
        .args(["config", "validate", "-c"])
        .arg(&ws.config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("matching.threshold"));
}

#[test]
fn json_errors_are_machine_readable() {
    let ws = Workspace::with_config("[matching]\nthreshold = 1.5\n");

    let output = unimarket()
        .args(["--json", "config", "validate", "-c"])
        .arg(&ws.config)
        .output()
        .expect("run unimarket");
    assert!(!output.status.success());

    let line = String::from_utf8_lossy(&output.stderr)
        .lines()
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .find(|value| value["type"] == "error")
        .expect("json error line");
    assert!(line["payload"]["message"]
        .as_str()
        .unwrap()
        .contains("matching.threshold"));
}
