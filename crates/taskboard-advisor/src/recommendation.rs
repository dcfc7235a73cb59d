use core::fmt;
use serde::{Deserialize, Serialize};
use taskboard_core::model::card::Card;
use taskboard_core::model::id::{CardId, ListId};
use taskboard_core::model::list::List;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecommendationType {
    DueDate,
    Move,
    Attention,
    Overdue,
    Related,
}

impl RecommendationType {
    pub const ALL: [RecommendationType; 5] = [
        RecommendationType::DueDate,
        RecommendationType::Move,
        RecommendationType::Attention,
        RecommendationType::Overdue,
        RecommendationType::Related,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            RecommendationType::DueDate => "dueDate",
            RecommendationType::Move => "move",
            RecommendationType::Attention => "attention",
            RecommendationType::Overdue => "overdue",
            RecommendationType::Related => "related",
        }
    }
}

impl fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    /// Most urgent first.
    pub const ALL: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Medium,
        Priority::Low,
    ];

    pub const fn rank(self) -> u8 {
        match self {
            Priority::Critical => 0,
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated suggestion about one card (or a pair of cards for `related`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub card_id: CardId,
    pub list_id: ListId,
    pub card_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_card_id: Option<CardId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_list_id: Option<ListId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_card_title: Option<String>,
    pub suggestion: String,
    pub reason: String,
    pub priority: Priority,
}

impl Recommendation {
    pub(crate) fn for_card(
        kind: RecommendationType,
        list: &List,
        card: &Card,
        suggestion: impl Into<String>,
        reason: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            kind,
            card_id: card.id.clone(),
            list_id: list.id.clone(),
            card_title: card.title.clone(),
            current_list: None,
            related_card_id: None,
            related_list_id: None,
            related_card_title: None,
            suggestion: suggestion.into(),
            reason: reason.into(),
            priority,
        }
    }

    pub(crate) fn in_list(mut self, list: &List) -> Self {
        self.current_list = Some(list.title.clone());
        self
    }

    pub(crate) fn related_to(mut self, list: &List, card: &Card) -> Self {
        self.related_card_id = Some(card.id.clone());
        self.related_list_id = Some(list.id.clone());
        self.related_card_title = Some(card.title.clone());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_ranks_follow_urgency() {
        let ranks: Vec<u8> = Priority::ALL.iter().map(|p| p.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
    }

    #[test]
    fn serializes_with_wire_names() {
        let list = List::new(ListId::new("l1"), "In Progress", 1);
        let card = Card::new(CardId::new("c1"), "Fix login");
        let rec = Recommendation::for_card(
            RecommendationType::Move,
            &list,
            &card,
            "Move to Done",
            "Description indicates completion",
            Priority::High,
        )
        .in_list(&list);

        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["type"], "move");
        assert_eq!(value["cardId"], "c1");
        assert_eq!(value["listId"], "l1");
        assert_eq!(value["currentList"], "In Progress");
        assert_eq!(value["priority"], "high");
        assert!(value.get("relatedCardId").is_none());
    }

    #[test]
    fn due_date_type_uses_camel_case() {
        assert_eq!(
            serde_json::to_string(&RecommendationType::DueDate).unwrap(),
            "\"dueDate\""
        );
        assert_eq!(RecommendationType::DueDate.to_string(), "dueDate");
    }
}
