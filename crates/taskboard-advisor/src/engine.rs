use crate::clock::Clock;
use crate::recommendation::{Recommendation, RecommendationType};
use crate::rules;
use crate::text::card_text;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use taskboard_core::snapshot::BoardSnapshot;
use tracing::{Level, event};

/// Month/day/year without padding, e.g. `10/20/2026`.
pub const DEFAULT_DUE_DATE_FORMAT: &str = "%-m/%-d/%Y";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    due_date_format: String,
    related_limit: Option<usize>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            due_date_format: DEFAULT_DUE_DATE_FORMAT.to_string(),
            related_limit: None,
        }
    }
}

impl EngineOptions {
    /// `chrono` strftime pattern for suggested due dates. Unparseable patterns
    /// fall back to [`DEFAULT_DUE_DATE_FORMAT`] at render time.
    pub fn with_due_date_format(mut self, format: impl Into<String>) -> Self {
        self.due_date_format = format.into();
        self
    }

    /// Only the first `limit` cards (board order) take part in relatedness checks.
    pub fn with_related_limit(mut self, limit: Option<usize>) -> Self {
        self.related_limit = limit;
        self
    }

    pub fn due_date_format(&self) -> &str {
        &self.due_date_format
    }

    pub fn related_limit(&self) -> Option<usize> {
        self.related_limit
    }
}

pub fn is_valid_date_format(format: &str) -> bool {
    !format.trim().is_empty()
        && StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

/// Rule-based recommendation generator. Stateless; share freely across threads.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    options: EngineOptions,
}

impl RecommendationEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Analyse every card and card pair, returning recommendations ordered by
    /// priority. Equal priorities keep their emission order.
    pub fn generate(&self, snapshot: BoardSnapshot<'_>, now: DateTime<Utc>) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        for (list, card) in snapshot.cards() {
            let text = card_text(card);
            if let Some(rec) =
                rules::due_date(list, card, &text, now, &self.options.due_date_format)
            {
                recommendations.push(rec);
            }
            rules::movement(list, card, &text, &mut recommendations);
            if let Some(rec) = rules::overdue(list, card, now) {
                recommendations.push(rec);
            }
        }

        let total_cards = snapshot.card_count();
        let limit = self.options.related_limit.unwrap_or(total_cards);
        if limit < total_cards {
            event!(
                target: "taskboard_advisor::recommend",
                Level::DEBUG,
                limit,
                total_cards,
                "relatedness check capped"
            );
        }
        let candidates: Vec<_> = snapshot.cards().take(limit).collect();
        recommendations.extend(rules::related(&candidates));

        recommendations.sort_by_key(|rec| rec.priority.rank());
        log_generation(&snapshot, &recommendations, now);
        recommendations
    }

    /// Same as [`generate`](Self::generate), reading "now" once from `clock`.
    pub fn generate_with_clock(
        &self,
        snapshot: BoardSnapshot<'_>,
        clock: &dyn Clock,
    ) -> Vec<Recommendation> {
        self.generate(snapshot, clock.now())
    }
}

/// Generate with default options.
pub fn generate(snapshot: BoardSnapshot<'_>, now: DateTime<Utc>) -> Vec<Recommendation> {
    RecommendationEngine::default().generate(snapshot, now)
}

fn details_logging_enabled() -> bool {
    std::env::var("TASKBOARD_RECOMMEND_DETAILS")
        .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
        .unwrap_or(false)
}

fn log_generation(
    snapshot: &BoardSnapshot<'_>,
    recommendations: &[Recommendation],
    now: DateTime<Utc>,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let count_of = |kind: RecommendationType| {
        recommendations
            .iter()
            .filter(|rec| rec.kind == kind)
            .count()
    };

    event!(
        target: "taskboard_advisor::recommend",
        Level::INFO,
        lists = snapshot.lists().len(),
        cards = snapshot.card_count(),
        total = recommendations.len(),
        due_date = count_of(RecommendationType::DueDate),
        moves = count_of(RecommendationType::Move),
        attention = count_of(RecommendationType::Attention),
        overdue = count_of(RecommendationType::Overdue),
        related = count_of(RecommendationType::Related),
        now = %now.to_rfc3339(),
    );

    if !details_logging_enabled() {
        return;
    }

    for (rank, rec) in recommendations.iter().enumerate() {
        event!(
            target: "taskboard_advisor::recommend_detail",
            Level::INFO,
            rank,
            kind = %rec.kind,
            priority = %rec.priority,
            card_id = %rec.card_id,
            list_id = %rec.list_id,
            reason = %rec.reason,
        );
    }
}
