use crate::model::card::Card;
use crate::model::id::{CardId, ListId};
use crate::model::null_as_default;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    #[serde(alias = "_id")]
    pub id: ListId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub position: u32,
}

impl List {
    pub fn new(id: ListId, title: impl Into<String>, position: u32) -> Self {
        Self {
            id,
            title: title.into(),
            cards: Vec::new(),
            position,
        }
    }

    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    pub fn card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| &card.id == id)
    }

    pub(crate) fn take_card(&mut self, id: &CardId) -> Option<Card> {
        let index = self.cards.iter().position(|card| &card.id == id)?;
        Some(self.cards.remove(index))
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
