use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use taskboard_advisor::{Priority, Recommendation, RecommendationType};
use taskboard_core::model::board::Board;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode summary JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BoardSummary {
    pub board_id: String,
    pub board_name: String,
    pub cards: usize,
    pub recommendations: usize,
    pub critical: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RunTotals {
    pub run_id: String,
    pub now: DateTime<Utc>,
    pub boards: Vec<BoardSummary>,
    pub by_type: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
    pub total: usize,
}

/// Accumulates per-board counts while a run is in progress.
#[derive(Debug)]
pub struct SummaryCollector {
    totals: RunTotals,
}

impl SummaryCollector {
    pub fn new(run_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            totals: RunTotals {
                run_id: run_id.to_string(),
                now,
                boards: Vec::new(),
                by_type: BTreeMap::new(),
                by_priority: BTreeMap::new(),
                total: 0,
            },
        }
    }

    pub fn record_board(&mut self, board: &Board, recommendations: &[Recommendation]) {
        for rec in recommendations {
            *self
                .totals
                .by_type
                .entry(rec.kind.as_str().to_string())
                .or_insert(0) += 1;
            *self
                .totals
                .by_priority
                .entry(rec.priority.as_str().to_string())
                .or_insert(0) += 1;
        }
        self.totals.total += recommendations.len();
        self.totals.boards.push(BoardSummary {
            board_id: board.id.to_string(),
            board_name: board.name.clone(),
            cards: board.card_count(),
            recommendations: recommendations.len(),
            critical: recommendations
                .iter()
                .filter(|rec| rec.priority == Priority::Critical)
                .count(),
        });
    }

    pub fn finish(self) -> RunTotals {
        self.totals
    }
}

impl RunTotals {
    pub fn count_for_type(&self, kind: RecommendationType) -> usize {
        self.by_type.get(kind.as_str()).copied().unwrap_or(0)
    }

    pub fn count_for_priority(&self, priority: Priority) -> usize {
        self.by_priority.get(priority.as_str()).copied().unwrap_or(0)
    }

    pub fn write_markdown(&self, path: &Path) -> Result<(), SummaryError> {
        std::fs::write(path, self.render_markdown()).map_err(|source| SummaryError::Io {
            context: "writing summary markdown",
            source,
        })
    }

    pub fn write_json(&self, path: &Path) -> Result<(), SummaryError> {
        let encoded = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, encoded).map_err(|source| SummaryError::Io {
            context: "writing summary json",
            source,
        })
    }

    pub fn render_markdown(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("# Recommendation Summary: {}\n\n", self.run_id));
        output.push_str(&format!("- Evaluated at: {}\n", self.now.to_rfc3339()));
        output.push_str(&format!("- Boards: {}\n", self.boards.len()));
        output.push_str(&format!("- Recommendations: {}\n\n", self.total));

        output.push_str("## By Priority\n");
        for priority in Priority::ALL {
            output.push_str(&format!(
                "- {}: {}\n",
                priority,
                self.count_for_priority(priority)
            ));
        }
        output.push('\n');

        output.push_str("## By Type\n");
        for kind in RecommendationType::ALL {
            output.push_str(&format!("- {}: {}\n", kind, self.count_for_type(kind)));
        }
        output.push('\n');

        output.push_str("## Boards\n");
        if self.boards.is_empty() {
            output.push_str("- <none>\n");
            return output;
        }
        output.push_str("| Board | Cards | Recommendations | Critical |\n");
        output.push_str("|-------|------:|----------------:|---------:|\n");
        for board in &self.boards {
            let label = if board.board_name.is_empty() {
                board.board_id.as_str()
            } else {
                board.board_name.as_str()
            };
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                label, board.cards, board.recommendations, board.critical
            ));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use taskboard_advisor::generate;
    use taskboard_core::snapshot::BoardDocument;

    const BOARD: &str = r#"{
        "_id": "b1",
        "name": "Ops",
        "lists": [
            {"_id": "l1", "title": "In Progress", "cards": [
                {"_id": "c1", "title": "Patch servers", "description": "fixed but waiting on reboot",
                 "dueDate": "2026-10-10T00:00:00Z"}
            ]}
        ]
    }"#;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn collected() -> RunTotals {
        let boards = BoardDocument::from_json(BOARD).unwrap();
        let recs = generate(boards[0].snapshot(), now());
        let mut collector = SummaryCollector::new("ops_check", now());
        collector.record_board(&boards[0], &recs);
        collector.finish()
    }

    #[test]
    fn counts_by_type_and_priority() {
        let totals = collected();
        assert_eq!(totals.total, 3);
        assert_eq!(totals.count_for_priority(Priority::Critical), 1);
        assert_eq!(totals.count_for_priority(Priority::High), 2);
        assert_eq!(totals.count_for_type(RecommendationType::Move), 1);
        assert_eq!(totals.count_for_type(RecommendationType::Attention), 1);
        assert_eq!(totals.count_for_type(RecommendationType::Overdue), 1);
        assert_eq!(totals.count_for_type(RecommendationType::Related), 0);
        assert_eq!(totals.boards[0].critical, 1);
        assert_eq!(totals.boards[0].cards, 1);
    }

    #[test]
    fn markdown_lists_every_priority_and_board() {
        let markdown = collected().render_markdown();
        assert!(markdown.contains("# Recommendation Summary: ops_check"));
        assert!(markdown.contains("- critical: 1"));
        assert!(markdown.contains("- medium: 0"));
        assert!(markdown.contains("- dueDate: 0"));
        assert!(markdown.contains("| Ops | 1 | 3 | 1 |"));
    }

    #[test]
    fn empty_run_renders_placeholder() {
        let totals = SummaryCollector::new("empty", now()).finish();
        assert!(totals.render_markdown().contains("- <none>"));
    }

    #[test]
    fn writes_json_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        collected().write_json(&path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["by_priority"]["high"], 2);
    }
}
