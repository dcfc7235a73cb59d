use crate::engine::DEFAULT_DUE_DATE_FORMAT;
use crate::recommendation::{Priority, Recommendation, RecommendationType};
use crate::text::{card_text, compact_title, meaningful_words, shared_words};
use crate::vocabulary::{
    BLOCKED_KEYWORDS, DONE_KEYWORDS, PROGRESS_KEYWORDS, URGENT_KEYWORDS, WEEK_PHRASES,
    contains_any,
};
use chrono::{DateTime, Duration, Utc};
use std::fmt::Write as _;
use taskboard_core::model::card::Card;
use taskboard_core::model::list::List;

pub(crate) const URGENT_LEAD_DAYS: i64 = 2;
const MILLIS_PER_DAY: i64 = 86_400_000;
const MIN_SHARED_WORDS: usize = 2;
const MAX_THEMES: usize = 3;

/// Suggest a due date for undated cards whose text sounds urgent or time-boxed.
pub(crate) fn due_date(
    list: &List,
    card: &Card,
    text: &str,
    now: DateTime<Utc>,
    date_format: &str,
) -> Option<Recommendation> {
    if card.due_date.is_some() {
        return None;
    }

    if contains_any(text, URGENT_KEYWORDS) {
        let suggested = render_date(now + Duration::days(URGENT_LEAD_DAYS), date_format);
        Some(Recommendation::for_card(
            RecommendationType::DueDate,
            list,
            card,
            format!("Set due date to {suggested}"),
            "Contains urgent keywords",
            Priority::High,
        ))
    } else if contains_any(text, WEEK_PHRASES) {
        Some(Recommendation::for_card(
            RecommendationType::DueDate,
            list,
            card,
            "Set due date within 7 days",
            "Contains time-related phrases",
            Priority::Medium,
        ))
    } else {
        None
    }
}

/// List-movement and blocked-card hints. The done and blocked checks are independent.
pub(crate) fn movement(list: &List, card: &Card, text: &str, out: &mut Vec<Recommendation>) {
    let compact = compact_title(&list.title);

    if is_todo_list(&list.title, &compact) && contains_any(text, PROGRESS_KEYWORDS) {
        out.push(
            Recommendation::for_card(
                RecommendationType::Move,
                list,
                card,
                "Move to In Progress",
                "Description indicates work has started",
                Priority::High,
            )
            .in_list(list),
        );
    }

    if is_in_progress_list(&list.title, &compact) {
        if contains_any(text, DONE_KEYWORDS) {
            out.push(
                Recommendation::for_card(
                    RecommendationType::Move,
                    list,
                    card,
                    "Move to Done",
                    "Description indicates completion",
                    Priority::High,
                )
                .in_list(list),
            );
        }

        if contains_any(text, BLOCKED_KEYWORDS) {
            out.push(Recommendation::for_card(
                RecommendationType::Attention,
                list,
                card,
                "Card may be blocked - needs attention",
                "Contains blocking keywords",
                Priority::High,
            ));
        }
    }
}

/// Flag cards past their due date unless they sit in a done/complete list.
pub(crate) fn overdue(list: &List, card: &Card, now: DateTime<Utc>) -> Option<Recommendation> {
    let due = card.due_date?;
    if due >= now {
        return None;
    }

    let title = list.title.to_lowercase();
    if title.contains("done") || title.contains("complete") {
        return None;
    }

    let days = (now - due).num_milliseconds() / MILLIS_PER_DAY;
    let plural = if days > 1 { "s" } else { "" };
    Some(Recommendation::for_card(
        RecommendationType::Overdue,
        list,
        card,
        "This card is overdue",
        format!("{days} day{plural} past due date"),
        Priority::Critical,
    ))
}

/// Pairwise comparison of cards from different lists; O(n²) in card count.
pub(crate) fn related(cards: &[(&List, &Card)]) -> Vec<Recommendation> {
    let texts: Vec<String> = cards.iter().map(|(_, card)| card_text(card)).collect();
    let words: Vec<Vec<&str>> = texts.iter().map(|text| meaningful_words(text)).collect();

    let mut out = Vec::new();
    for (i, (list_a, card_a)) in cards.iter().enumerate() {
        for (j, (list_b, card_b)) in cards.iter().enumerate().skip(i + 1) {
            if list_a.id == list_b.id {
                continue;
            }

            let shared = shared_words(&words[i], &words[j]);
            if shared.len() < MIN_SHARED_WORDS {
                continue;
            }

            let themes = shared
                .iter()
                .take(MAX_THEMES)
                .copied()
                .collect::<Vec<_>>()
                .join(", ");
            out.push(
                Recommendation::for_card(
                    RecommendationType::Related,
                    list_a,
                    card_a,
                    "These cards may be related",
                    format!("Common themes: {themes}"),
                    Priority::Low,
                )
                .related_to(list_b, card_b),
            );
        }
    }
    out
}

fn is_todo_list(title: &str, compact: &str) -> bool {
    compact.contains("todo") || compact.contains("backlog") || title == "To Do"
}

fn is_in_progress_list(title: &str, compact: &str) -> bool {
    compact.contains("progress") || title == "In Progress"
}

fn render_date(date: DateTime<Utc>, format: &str) -> String {
    let mut rendered = String::new();
    if write!(rendered, "{}", date.format(format)).is_err() {
        return date.format(DEFAULT_DUE_DATE_FORMAT).to_string();
    }
    rendered
}
