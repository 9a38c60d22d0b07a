//! Attachment metadata records. Binary content is stored externally; the
//! engine only tracks the descriptor and a storage pointer.

use super::{AttachmentId, BoardDomainError, TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Metadata for a file attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    id: AttachmentId,
    task_id: TaskId,
    file_name: String,
    size_bytes: u64,
    mime_type: String,
    uploaded_by: UserId,
    storage_pointer: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted attachment record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAttachmentData {
    /// Persisted attachment identifier.
    pub id: AttachmentId,
    /// Owning task identifier.
    pub task_id: TaskId,
    /// Original file name.
    pub file_name: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Declared MIME type.
    pub mime_type: String,
    /// Uploading user.
    pub uploaded_by: UserId,
    /// Opaque pointer into the external binary store.
    pub storage_pointer: String,
    /// Persisted upload timestamp.
    pub created_at: DateTime<Utc>,
}

impl Attachment {
    /// Creates a new attachment metadata record.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyAttachmentName`] when the file name
    /// is empty after trimming.
    pub fn new(
        task_id: TaskId,
        file_name: impl Into<String>,
        size_bytes: u64,
        mime_type: impl Into<String>,
        uploaded_by: UserId,
        storage_pointer: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let raw = file_name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyAttachmentName);
        }

        Ok(Self {
            id: AttachmentId::new(),
            task_id,
            file_name: trimmed.to_owned(),
            size_bytes,
            mime_type: mime_type.into(),
            uploaded_by,
            storage_pointer: storage_pointer.into(),
            created_at: clock.utc(),
        })
    }

    /// Reconstructs an attachment record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAttachmentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            file_name: data.file_name,
            size_bytes: data.size_bytes,
            mime_type: data.mime_type,
            uploaded_by: data.uploaded_by,
            storage_pointer: data.storage_pointer,
            created_at: data.created_at,
        }
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the owning task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub const fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Returns the declared MIME type.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the uploading user.
    #[must_use]
    pub const fn uploaded_by(&self) -> UserId {
        self.uploaded_by
    }

    /// Returns the pointer into the external binary store.
    #[must_use]
    pub fn storage_pointer(&self) -> &str {
        &self.storage_pointer
    }

    /// Returns the upload timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
