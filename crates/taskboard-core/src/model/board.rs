use crate::model::card::{Card, CardDraft, CardPatch};
use crate::model::error::BoardError;
use crate::model::id::{BoardId, CardId, IdGenerator, ListId, MemberId, UserId};
use crate::model::list::List;
use crate::model::member::{Member, MemberRole};
use crate::model::{flexible_instant, null_as_default};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Titles of the lists every new board starts with, in order.
pub const DEFAULT_LISTS: [&str; 3] = ["To Do", "In Progress", "Done"];
pub const DEFAULT_BACKGROUND: &str = "blue";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    #[serde(alias = "_id")]
    pub id: BoardId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub members: Vec<Member>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lists: Vec<List>,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(
        default,
        deserialize_with = "flexible_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "flexible_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_background() -> String {
    DEFAULT_BACKGROUND.to_string()
}

impl Board {
    /// Create a board owned by `owner`, seeded with the default lists.
    pub fn new(
        name: &str,
        description: &str,
        owner: UserId,
        owner_email: &str,
        ids: &mut IdGenerator,
        now: DateTime<Utc>,
    ) -> Result<Self, BoardError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BoardError::EmptyField("name"));
        }

        let lists = DEFAULT_LISTS
            .iter()
            .enumerate()
            .map(|(position, title)| List::new(ids.list(), *title, position as u32))
            .collect();

        Ok(Self {
            id: ids.board(),
            name: name.to_string(),
            description: description.to_string(),
            members: vec![Member {
                id: ids.member(),
                user: Some(owner.clone()),
                email: owner_email.to_string(),
                role: MemberRole::Owner,
            }],
            owner: Some(owner),
            lists,
            background: default_background(),
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    pub fn is_owner(&self, user: &UserId) -> bool {
        self.owner.as_ref() == Some(user)
    }

    pub fn has_access(&self, user: &UserId) -> bool {
        self.is_owner(user) || self.members.iter().any(|member| member.is_user(user))
    }

    pub fn card_count(&self) -> usize {
        self.lists.iter().map(List::len).sum()
    }

    pub fn list(&self, id: &ListId) -> Result<&List, BoardError> {
        self.lists
            .iter()
            .find(|list| &list.id == id)
            .ok_or_else(|| BoardError::ListNotFound(id.clone()))
    }

    fn list_mut(&mut self, id: &ListId) -> Result<&mut List, BoardError> {
        self.lists
            .iter_mut()
            .find(|list| &list.id == id)
            .ok_or_else(|| BoardError::ListNotFound(id.clone()))
    }

    /// Rename the board when `name` is non-empty; replace the description when given.
    pub fn update(&mut self, name: Option<&str>, description: Option<&str>, now: DateTime<Utc>) {
        if let Some(name) = name.map(str::trim).filter(|name| !name.is_empty()) {
            self.name = name.to_string();
        }
        if let Some(description) = description {
            self.description = description.to_string();
        }
        self.touch(now);
    }

    pub fn ensure_can_delete(&self, requester: &UserId) -> Result<(), BoardError> {
        if self.is_owner(requester) {
            Ok(())
        } else {
            Err(BoardError::NotOwner)
        }
    }

    pub fn add_member(
        &mut self,
        email: &str,
        user: Option<UserId>,
        ids: &mut IdGenerator,
        now: DateTime<Utc>,
    ) -> Result<MemberId, BoardError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(BoardError::EmptyField("email"));
        }
        if self.members.iter().any(|member| member.email == email) {
            return Err(BoardError::AlreadyMember(email.to_string()));
        }

        let id = ids.member();
        self.members.push(Member {
            id: id.clone(),
            user,
            email: email.to_string(),
            role: MemberRole::Member,
        });
        self.touch(now);
        Ok(id)
    }

    /// Only the owner may remove members. Unknown ids leave the board unchanged.
    pub fn remove_member(
        &mut self,
        requester: &UserId,
        member: &MemberId,
        now: DateTime<Utc>,
    ) -> Result<(), BoardError> {
        if !self.is_owner(requester) {
            return Err(BoardError::NotOwner);
        }
        self.members.retain(|existing| &existing.id != member);
        self.touch(now);
        Ok(())
    }

    pub fn add_list(
        &mut self,
        title: &str,
        ids: &mut IdGenerator,
        now: DateTime<Utc>,
    ) -> Result<ListId, BoardError> {
        if title.trim().is_empty() {
            return Err(BoardError::EmptyField("title"));
        }
        let id = ids.list();
        let position = self.lists.len() as u32;
        self.lists.push(List::new(id.clone(), title, position));
        self.touch(now);
        Ok(id)
    }

    pub fn rename_list(
        &mut self,
        id: &ListId,
        title: &str,
        now: DateTime<Utc>,
    ) -> Result<(), BoardError> {
        let list = self.list_mut(id)?;
        if !title.trim().is_empty() {
            list.title = title.to_string();
        }
        self.touch(now);
        Ok(())
    }

    /// Deleting an unknown list is a no-op.
    pub fn delete_list(&mut self, id: &ListId, now: DateTime<Utc>) {
        self.lists.retain(|list| &list.id != id);
        self.touch(now);
    }

    pub fn add_card(
        &mut self,
        list: &ListId,
        draft: CardDraft,
        created_by: Option<UserId>,
        ids: &mut IdGenerator,
        now: DateTime<Utc>,
    ) -> Result<CardId, BoardError> {
        if draft.title.trim().is_empty() {
            return Err(BoardError::EmptyField("title"));
        }
        let id = ids.card();
        let card = Card {
            id: id.clone(),
            title: draft.title,
            description: draft.description.unwrap_or_default(),
            due_date: draft.due_date,
            created_by,
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.list_mut(list)?.cards.push(card);
        self.touch(now);
        Ok(id)
    }

    pub fn update_card(
        &mut self,
        list: &ListId,
        card: &CardId,
        patch: CardPatch,
        now: DateTime<Utc>,
    ) -> Result<(), BoardError> {
        let target = self
            .list_mut(list)?
            .card_mut(card)
            .ok_or_else(|| BoardError::CardNotFound(card.clone()))?;
        patch.apply(target, now);
        self.touch(now);
        Ok(())
    }

    pub fn delete_card(
        &mut self,
        list: &ListId,
        card: &CardId,
        now: DateTime<Utc>,
    ) -> Result<Card, BoardError> {
        let removed = self
            .list_mut(list)?
            .take_card(card)
            .ok_or_else(|| BoardError::CardNotFound(card.clone()))?;
        self.touch(now);
        Ok(removed)
    }

    /// Move a card to `index` in `to` (clamped to the end of the target list).
    pub fn move_card(
        &mut self,
        from: &ListId,
        card: &CardId,
        to: &ListId,
        index: usize,
        now: DateTime<Utc>,
    ) -> Result<(), BoardError> {
        self.list(to)?;
        let moving = self
            .list_mut(from)?
            .take_card(card)
            .ok_or_else(|| BoardError::CardNotFound(card.clone()))?;
        let target = self.list_mut(to)?;
        let index = index.min(target.cards.len());
        target.cards.insert(index, moving);
        self.touch(now);
        Ok(())
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}
