//! Board aggregate: top-level container of columns and tasks.

use super::{BoardDomainError, BoardId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Top-level container of columns and tasks, optionally bound to one
/// organisational area.
///
/// Boards carrying an `area_key` are protected: ordinary operators cannot
/// delete them, since the binding is owned by the area setup process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    name: String,
    description: Option<String>,
    area_key: Option<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted board identifier.
    pub id: BoardId,
    /// Persisted board name.
    pub name: String,
    /// Persisted board description, if any.
    pub description: Option<String>,
    /// Persisted organisational-area binding, if any.
    pub area_key: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Board {
    /// Creates a new board with a validated name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyBoardName`] when the name is empty
    /// after trimming.
    pub fn new(name: impl Into<String>, clock: &impl Clock) -> Result<Self, BoardDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyBoardName);
        }

        Ok(Self {
            id: BoardId::new(),
            name: trimmed.to_owned(),
            description: None,
            area_key: None,
            created_at: clock.utc(),
        })
    }

    /// Sets the board description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Binds the board to an organisational area.
    #[must_use]
    pub fn with_area_key(mut self, area_key: impl Into<String>) -> Self {
        self.area_key = Some(area_key.into());
        self
    }

    /// Reconstructs a board from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            area_key: data.area_key,
            created_at: data.created_at,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the board name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the board description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the organisational-area binding, if any.
    #[must_use]
    pub fn area_key(&self) -> Option<&str> {
        self.area_key.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true when the board is bound to an area and therefore
    /// shielded from operator deletion.
    #[must_use]
    pub const fn is_protected(&self) -> bool {
        self.area_key.is_some()
    }

    /// Checks that the board may be deleted by an ordinary operator.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::ProtectedBoard`] when the board carries
    /// an area binding.
    pub const fn ensure_deletable(&self) -> Result<(), BoardDomainError> {
        if self.is_protected() {
            return Err(BoardDomainError::ProtectedBoard(self.id));
        }
        Ok(())
    }
}
