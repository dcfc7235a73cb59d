use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;
use taskboard_advisor::{Clock, Recommendation, RecommendationEngine};
use taskboard_core::model::board::Board;
use taskboard_core::snapshot::BoardDocument;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{BenchConfig, ResolvedOutputs};
use crate::summary::{RunTotals, SummaryCollector, SummaryError};

/// Runs the recommendation engine over every configured board file.
pub struct BenchRunner {
    config: BenchConfig,
    outputs: ResolvedOutputs,
    engine: RecommendationEngine,
    clock: Box<dyn Clock>,
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub boards_analyzed: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub summary_json_path: PathBuf,
    pub totals: RunTotals,
}

#[derive(Serialize)]
struct RecommendationRow<'a> {
    run_id: &'a str,
    board_id: &'a str,
    board_name: &'a str,
    rank: usize,
    #[serde(flatten)]
    recommendation: &'a Recommendation,
}

impl BenchRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchConfig, outputs: ResolvedOutputs) -> Result<Self, RunnerError> {
        for path in &config.inputs.boards {
            if !path.is_file() {
                return Err(RunnerError::MissingInput { path: path.clone() });
            }
        }

        Ok(Self {
            engine: RecommendationEngine::new(config.engine.options()),
            clock: config.clock.clock(),
            config,
            outputs,
        })
    }

    /// Analyse every board, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let now = self.clock.now();
        let mut collector = SummaryCollector::new(&self.config.run_id, now);
        let mut boards_analyzed = 0usize;
        let mut rows_written = 0usize;

        for path in &self.config.inputs.boards {
            for board in load_boards(path)? {
                let started = Instant::now();
                let recommendations = self.engine.generate(board.snapshot(), now);
                let elapsed_us = started.elapsed().as_micros() as u64;

                rows_written +=
                    write_board_rows(&mut writer, &self.config.run_id, &board, &recommendations)?;
                collector.record_board(&board, &recommendations);
                boards_analyzed += 1;

                event!(
                    target: "taskboard_bench::board",
                    Level::INFO,
                    run_id = %self.config.run_id,
                    board_id = %board.id,
                    cards = board.card_count(),
                    recommendations = recommendations.len(),
                    elapsed_us,
                );
            }
        }

        writer.flush()?;

        let totals = collector.finish();
        let summary_json_path = self.outputs.summary_json();
        totals.write_markdown(&self.outputs.summary_md)?;
        totals.write_json(&summary_json_path)?;

        Ok(RunSummary {
            boards_analyzed,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            summary_json_path,
            totals,
        })
    }
}

fn load_boards(path: &Path) -> Result<Vec<Board>, RunnerError> {
    let json = fs::read_to_string(path)?;
    BoardDocument::from_json(&json).map_err(|source| RunnerError::Snapshot {
        path: path.to_path_buf(),
        source,
    })
}

fn write_board_rows(
    writer: &mut impl Write,
    run_id: &str,
    board: &Board,
    recommendations: &[Recommendation],
) -> Result<usize, RunnerError> {
    for (rank, recommendation) in recommendations.iter().enumerate() {
        let row = RecommendationRow {
            run_id,
            board_id: board.id.as_str(),
            board_name: &board.name,
            rank,
            recommendation,
        };
        serde_json::to_writer(&mut *writer, &row)?;
        writer.write_all(b"\n")?;
    }
    Ok(recommendations.len())
}

fn ensure_parent(parent: Option<&Path>) -> Result<(), RunnerError> {
    if let Some(dir) = parent.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("board file {path:?} does not exist")]
    MissingInput { path: PathBuf },
    #[error("failed to decode board file {path:?}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to encode row: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use taskboard_advisor::generate;

    #[test]
    fn rows_flatten_recommendation_fields() {
        let json = r#"{"_id":"b1","name":"Ops","lists":[
            {"_id":"l1","title":"To Do","cards":[{"_id":"c1","title":"asap: rotate keys"}]}
        ]}"#;
        let boards = BoardDocument::from_json(json).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
        let recs = generate(boards[0].snapshot(), now);

        let mut buffer = Vec::new();
        let written = write_board_rows(&mut buffer, "run", &boards[0], &recs).unwrap();
        assert_eq!(written, 1);

        let line = String::from_utf8(buffer).unwrap();
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["run_id"], "run");
        assert_eq!(value["board_id"], "b1");
        assert_eq!(value["rank"], 0);
        assert_eq!(value["type"], "dueDate");
        assert_eq!(value["cardId"], "c1");
    }
}
