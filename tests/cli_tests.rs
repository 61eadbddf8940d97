use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
    request_path: PathBuf,
}

impl TestContext {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let request_path = dir.path().join("request.json");
        fs::write(
            &request_path,
            r#"{
                "gridSize": {"width": 4, "height": 3},
                "groups": [
                    {"name": "A", "nb": 3, "constraint": {"name": "front-row", "nb": 1}},
                    {"name": "B", "nb": 2}
                ],
                "forbiddenSeats": [{"line": 1, "col": 1}],
                "constraints": [{"id": "front-row", "seats": [{"line": 0, "col": 0}, {"line": 0, "col": 1}]}],
                "nbPlans": 10,
                "nbGenerations": 20
            }"#,
        )
        .unwrap();
        Self { dir, request_path }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn run(&self, extra: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_seatforge"));
        cmd.arg("run").arg("--request").arg(&self.request_path).args(extra);
        cmd.output().expect("Failed to execute binary")
    }
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

#[test]
fn test_run_writes_result_and_summary() {
    let ctx = TestContext::new();
    let result_path = ctx.path("result.json");
    let out = ctx.run(&["--seed", "5", "--output", result_path.to_str().unwrap()]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let text = stdout(&out);
    let re = Regex::new(r"Best Score\s*\|\s*(-?\d+)").unwrap();
    let printed: i64 = re
        .captures(&text)
        .and_then(|c| c[1].parse().ok())
        .expect("summary table should print the best score");

    let json: Value = serde_json::from_str(&fs::read_to_string(&result_path).unwrap()).unwrap();
    assert_eq!(json["bestPlan"]["score"].as_i64(), Some(printed));
    assert!(json["error"].is_null());
    assert_eq!(json["bestPlan"]["placement"].as_array().unwrap().len(), 5);
    assert!(text.contains("##"), "forbidden seat should be drawn");
}

#[test]
fn test_same_seed_same_result() {
    let ctx = TestContext::new();
    let a = ctx.path("a.json");
    let b = ctx.path("b.json");
    assert!(ctx.run(&["-S", "77", "-o", a.to_str().unwrap()]).status.success());
    assert!(ctx.run(&["-S", "77", "-o", b.to_str().unwrap()]).status.success());

    let load = |p: &PathBuf| -> Value { serde_json::from_str(&fs::read_to_string(p).unwrap()).unwrap() };
    let (a, b) = (load(&a), load(&b));
    assert_eq!(a["bestPlan"], b["bestPlan"]);
    assert_eq!(a["genOfBestPlan"], b["genOfBestPlan"]);
    assert_eq!(a["averageScore"], b["averageScore"]);
}

#[test]
fn test_event_stream_with_cli_override() {
    let ctx = TestContext::new();
    let events_path = ctx.path("events.ndjson");
    let out = ctx.run(&[
        "--seed",
        "1",
        "--nb-generations",
        "12",
        "--crossover",
        "two-parent",
        "--events",
        events_path.to_str().unwrap(),
    ]);
    assert!(out.status.success());

    let events: Vec<Value> = fs::read_to_string(&events_path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let kinds: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();

    assert_eq!(kinds.iter().filter(|k| **k == "loading").count(), 12);
    assert_eq!(kinds.iter().filter(|k| **k == "current-gen").count(), 1);
    assert_eq!(kinds.last(), Some(&"done"));
    // The snapshot follows the 10th progress event.
    assert_eq!(kinds[10], "current-gen");
    let last_loading = &events[kinds.len() - 2];
    assert_eq!(last_loading["current"], 12);
    assert_eq!(last_loading["total"], 12);
}

#[test]
fn test_config_file_then_cli_flags() {
    let ctx = TestContext::new();
    let config_path = ctx.path("config.json");
    fs::write(&config_path, r#"{"ga": {"nbGenerations": 3, "nbPlans": 4}}"#).unwrap();
    let events_path = ctx.path("events.ndjson");

    let out = ctx.run(&[
        "--config",
        config_path.to_str().unwrap(),
        "--events",
        events_path.to_str().unwrap(),
    ]);
    assert!(out.status.success());
    let loading = fs::read_to_string(&events_path)
        .unwrap()
        .lines()
        .filter(|l| l.contains(r#""event":"loading""#))
        .count();
    assert_eq!(loading, 3);
}

#[test]
fn test_verify_accepts_and_rejects() {
    let ctx = TestContext::new();
    let result_path = ctx.path("result.json");
    assert!(ctx
        .run(&["--seed", "9", "--output", result_path.to_str().unwrap()])
        .status
        .success());

    let verify = |path: &PathBuf| {
        Command::new(env!("CARGO_BIN_EXE_seatforge"))
            .arg("verify")
            .arg("--request")
            .arg(&ctx.request_path)
            .arg("--result")
            .arg(path)
            .output()
            .expect("Failed to execute binary")
    };

    let ok = verify(&result_path);
    assert!(ok.status.success());
    assert!(Regex::new(r"VERIFIED: score -?\d+").unwrap().is_match(&stdout(&ok)));

    let mut json: Value = serde_json::from_str(&fs::read_to_string(&result_path).unwrap()).unwrap();
    let score = json["bestPlan"]["score"].as_i64().unwrap();
    json["bestPlan"]["score"] = Value::from(score + 3);
    let tampered = ctx.path("tampered.json");
    fs::write(&tampered, serde_json::to_string(&json).unwrap()).unwrap();

    let bad = verify(&tampered);
    assert!(!bad.status.success());
}

#[test]
fn test_bad_request_fails_cleanly() {
    let ctx = TestContext::new();
    fs::write(
        &ctx.request_path,
        r#"{"gridSize": {"width": 2, "height": 2}, "groups": [{"name": "A", "nb": 0}]}"#,
    )
    .unwrap();
    let out = ctx.run(&[]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("at least one member"), "stderr: {}", stderr);
}
