//! Column aggregate: an ordered stage lane within a board.

use super::{BoardDomainError, BoardId, ColumnId};
use serde::{Deserialize, Serialize};

/// Ordered bucket of tasks within a board.
///
/// A column optionally declares a canonical `stage_key` (machine-readable
/// workflow meaning, preferred over its free-text name), an approval SLA
/// window in hours, and a work-in-progress limit. `position` is the dense
/// zero-based rank of the column within its board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    board_id: BoardId,
    name: String,
    color: String,
    position: u32,
    stage_key: Option<String>,
    sla_hours: Option<u32>,
    wip_limit: Option<u32>,
}

/// Parameter object for reconstructing a persisted column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedColumnData {
    /// Persisted column identifier.
    pub id: ColumnId,
    /// Owning board identifier.
    pub board_id: BoardId,
    /// Persisted display name.
    pub name: String,
    /// Persisted display colour.
    pub color: String,
    /// Persisted dense position within the board.
    pub position: u32,
    /// Persisted canonical stage key, if any.
    pub stage_key: Option<String>,
    /// Persisted approval SLA window in hours, if any.
    pub sla_hours: Option<u32>,
    /// Persisted work-in-progress limit, if any.
    pub wip_limit: Option<u32>,
}

impl Column {
    /// Creates a new column with a validated name.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnName`] when the name is empty
    /// after trimming.
    pub fn new(
        board_id: BoardId,
        name: impl Into<String>,
        color: impl Into<String>,
        position: u32,
    ) -> Result<Self, BoardDomainError> {
        let validated = validate_name(name.into())?;
        Ok(Self {
            id: ColumnId::new(),
            board_id,
            name: validated,
            color: color.into(),
            position,
            stage_key: None,
            sla_hours: None,
            wip_limit: None,
        })
    }

    /// Declares the canonical stage key for this column.
    #[must_use]
    pub fn with_stage_key(mut self, stage_key: impl Into<String>) -> Self {
        self.stage_key = Some(stage_key.into());
        self
    }

    /// Configures the approval SLA window in hours.
    #[must_use]
    pub const fn with_sla_hours(mut self, sla_hours: u32) -> Self {
        self.sla_hours = Some(sla_hours);
        self
    }

    /// Configures the work-in-progress limit.
    #[must_use]
    pub const fn with_wip_limit(mut self, wip_limit: u32) -> Self {
        self.wip_limit = Some(wip_limit);
        self
    }

    /// Reconstructs a column from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedColumnData) -> Self {
        Self {
            id: data.id,
            board_id: data.board_id,
            name: data.name,
            color: data.color,
            position: data.position,
            stage_key: data.stage_key,
            sla_hours: data.sla_hours,
            wip_limit: data.wip_limit,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the owning board identifier.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the column display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column display colour.
    #[must_use]
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Returns the dense position of the column within its board.
    #[must_use]
    pub const fn position(&self) -> u32 {
        self.position
    }

    /// Returns the canonical stage key, if declared.
    #[must_use]
    pub fn stage_key(&self) -> Option<&str> {
        self.stage_key.as_deref()
    }

    /// Returns the approval SLA window in hours, if configured.
    #[must_use]
    pub const fn sla_hours(&self) -> Option<u32> {
        self.sla_hours
    }

    /// Returns the work-in-progress limit, if configured.
    #[must_use]
    pub const fn wip_limit(&self) -> Option<u32> {
        self.wip_limit
    }

    /// Renames the column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyColumnName`] when the new name is
    /// empty after trimming.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), BoardDomainError> {
        self.name = validate_name(name.into())?;
        Ok(())
    }

    /// Re-ranks the column within its board's lane order.
    pub const fn set_position(&mut self, position: u32) {
        self.position = position;
    }
}

/// Trims and validates a column name.
fn validate_name(raw: String) -> Result<String, BoardDomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyColumnName);
    }
    Ok(trimmed.to_owned())
}
