use crate::model::board::Board;
use crate::model::card::Card;
use crate::model::list::List;
use serde::Deserialize;

/// Read-only view of a board's lists and cards, as handed to analysers.
#[derive(Debug, Clone, Copy)]
pub struct BoardSnapshot<'a> {
    lists: &'a [List],
}

impl<'a> BoardSnapshot<'a> {
    pub fn new(lists: &'a [List]) -> Self {
        Self { lists }
    }

    pub fn lists(&self) -> &'a [List] {
        self.lists
    }

    /// Every card paired with its list, in board order then card order.
    pub fn cards(&self) -> impl Iterator<Item = (&'a List, &'a Card)> + 'a {
        self.lists
            .iter()
            .flat_map(|list| list.cards.iter().map(move |card| (list, card)))
    }

    pub fn card_count(&self) -> usize {
        self.lists.iter().map(List::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.card_count() == 0
    }
}

impl Board {
    pub fn snapshot(&self) -> BoardSnapshot<'_> {
        BoardSnapshot::new(&self.lists)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentShape {
    Many(Vec<Board>),
    One(Box<Board>),
}

/// JSON codec for exported board documents.
pub struct BoardDocument;

impl BoardDocument {
    /// Decode either a single board object or an array of boards.
    pub fn from_json(json: &str) -> serde_json::Result<Vec<Board>> {
        match serde_json::from_str::<DocumentShape>(json) {
            Ok(DocumentShape::Many(boards)) => Ok(boards),
            Ok(DocumentShape::One(board)) => Ok(vec![*board]),
            // Re-decode as a single board so the caller sees a precise error.
            Err(_) => serde_json::from_str::<Board>(json).map(|board| vec![board]),
        }
    }

    pub fn to_json(boards: &[Board]) -> serde_json::Result<String> {
        serde_json::to_string_pretty(boards)
    }
}
