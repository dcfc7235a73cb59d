use crate::model::id::{BoardId, CardId, ListId};
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    BoardNotFound(BoardId),
    ListNotFound(ListId),
    CardNotFound(CardId),
    AlreadyMember(String),
    AccessDenied,
    NotOwner,
    EmptyField(&'static str),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BoardNotFound(id) => write!(f, "board {id} not found"),
            BoardError::ListNotFound(id) => write!(f, "list {id} not found"),
            BoardError::CardNotFound(id) => write!(f, "card {id} not found"),
            BoardError::AlreadyMember(email) => write!(f, "{email} is already a member"),
            BoardError::AccessDenied => f.write_str("access denied"),
            BoardError::NotOwner => f.write_str("only the board owner may do this"),
            BoardError::EmptyField(field) => write!(f, "{field} must not be empty"),
        }
    }
}

impl std::error::Error for BoardError {}
