use std::fs;
use std::path::{Path, PathBuf};

use taskboard_bench::config::BenchConfig;
use taskboard_bench::runner::{BenchRunner, RunnerError};
use tempfile::tempdir;

fn sample_board() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../bench/boards/sample.json")
}

fn load_config(output_dir: &Path, board: &Path) -> BenchConfig {
    let yaml = format!(
        r#"
run_id: "test_smoke"
inputs:
  boards:
    - "{board}"
clock:
  now: "2026-10-18T12:00:00Z"
outputs:
  jsonl: "{jsonl}"
  summary_md: "{summary}"
logging:
  enable_structured: false
"#,
        board = board.display(),
        jsonl = output_dir.join("{run_id}").join("rows.jsonl").display(),
        summary = output_dir.join("{run_id}").join("summary.md").display(),
    );

    let mut cfg: BenchConfig = serde_yaml::from_str(&yaml).expect("valid yaml");
    cfg.validate().expect("config validates");
    cfg
}

#[test]
fn sample_board_produces_expected_rows() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), &sample_board());
    let outputs = config.resolved_outputs();

    let runner = BenchRunner::new(config, outputs).expect("runner created");
    let summary = runner.run().expect("run completes");

    assert_eq!(summary.boards_analyzed, 1);
    assert_eq!(summary.rows_written, 7);
    assert!(summary.jsonl_path.ends_with("test_smoke/rows.jsonl"));

    let jsonl = fs::read_to_string(&summary.jsonl_path).expect("jsonl readable");
    let rows: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).expect("row decodes to JSON"))
        .collect();
    let shape: Vec<(String, String)> = rows
        .iter()
        .map(|row| {
            (
                row["type"].as_str().unwrap_or_default().to_string(),
                row["priority"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    let expected = [
        ("overdue", "critical"),
        ("dueDate", "high"),
        ("move", "high"),
        ("move", "high"),
        ("attention", "high"),
        ("dueDate", "medium"),
        ("related", "low"),
    ];
    assert_eq!(
        shape,
        expected
            .iter()
            .map(|(kind, priority)| (kind.to_string(), priority.to_string()))
            .collect::<Vec<_>>()
    );

    assert_eq!(rows[0]["reason"], "3 days past due date");
    assert_eq!(rows[1]["suggestion"], "Set due date to 10/20/2026");
    assert_eq!(rows[6]["reason"], "Common themes: database, migration");
    assert!(rows.iter().all(|row| row["run_id"] == "test_smoke"));

    let markdown = fs::read_to_string(&summary.summary_path).expect("summary readable");
    assert!(markdown.contains("| Website relaunch | 6 | 7 | 1 |"));
    assert!(summary.summary_json_path.exists(), "summary json missing");
}

#[test]
fn undecodable_board_file_is_reported_with_path() {
    let dir = tempdir().expect("temp dir");
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{\"name\": \"missing ids\"}").expect("write fixture");

    let config = load_config(dir.path(), &broken);
    let outputs = config.resolved_outputs();
    let runner = BenchRunner::new(config, outputs).expect("runner created");
    match runner.run() {
        Err(RunnerError::Snapshot { path, .. }) => assert_eq!(path, broken),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("broken board should not load"),
    }
}

#[test]
fn missing_board_file_fails_before_running() {
    let dir = tempdir().expect("temp dir");
    let config = load_config(dir.path(), &dir.path().join("absent.json"));
    let outputs = config.resolved_outputs();
    assert!(matches!(
        BenchRunner::new(config, outputs),
        Err(RunnerError::MissingInput { .. })
    ));
}
