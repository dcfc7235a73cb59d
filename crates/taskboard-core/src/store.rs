use crate::model::board::Board;
use crate::model::error::BoardError;
use crate::model::id::{BoardId, UserId};
use std::collections::BTreeMap;

/// In-memory board collection keyed by id.
#[derive(Debug, Clone, Default)]
pub struct BoardStore {
    boards: BTreeMap<BoardId, Board>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_boards(boards: impl IntoIterator<Item = Board>) -> Self {
        Self {
            boards: boards
                .into_iter()
                .map(|board| (board.id.clone(), board))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    pub fn insert(&mut self, board: Board) -> Option<Board> {
        self.boards.insert(board.id.clone(), board)
    }

    pub fn get(&self, id: &BoardId) -> Result<&Board, BoardError> {
        self.boards
            .get(id)
            .ok_or_else(|| BoardError::BoardNotFound(id.clone()))
    }

    pub fn get_mut(&mut self, id: &BoardId) -> Result<&mut Board, BoardError> {
        self.boards
            .get_mut(id)
            .ok_or_else(|| BoardError::BoardNotFound(id.clone()))
    }

    /// Look up a board on behalf of `user`, enforcing membership.
    pub fn get_for(&self, id: &BoardId, user: &UserId) -> Result<&Board, BoardError> {
        let board = self.get(id)?;
        if board.has_access(user) {
            Ok(board)
        } else {
            Err(BoardError::AccessDenied)
        }
    }

    /// Boards the user owns or belongs to.
    pub fn boards_for<'a>(&'a self, user: &'a UserId) -> impl Iterator<Item = &'a Board> + 'a {
        self.boards.values().filter(move |board| board.has_access(user))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Board> {
        self.boards.values()
    }

    /// Only the owner may delete a board.
    pub fn remove(&mut self, id: &BoardId, requester: &UserId) -> Result<Board, BoardError> {
        self.get(id)?.ensure_can_delete(requester)?;
        self.boards
            .remove(id)
            .ok_or_else(|| BoardError::BoardNotFound(id.clone()))
    }
}
