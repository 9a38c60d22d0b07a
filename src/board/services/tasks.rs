//! Task service: task CRUD, comments, attachments, and approval
//! resolution.

use crate::board::{
    domain::{
        ApprovalStatus, Attachment, BoardDomainError, BoardId, Column, ColumnId, Comment, Task,
        TaskId, TaskPriority, UserId, resolve_status,
    },
    ports::{BoardRepository, BoardRepositoryError, TaskRepository, TaskRepositoryError},
};
use crate::history::{
    domain::{HistoryAction, HistoryEntry},
    ports::HistoryRepository,
    services::{HistoryRecorder, HistoryRecorderError, RecordEntryRequest},
};
use crate::notification::{
    domain::NotificationKind,
    ports::NotificationRepository,
    services::{NotificationDispatcher, NotifyRequest},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by the task service.
#[derive(Debug, Clone, Error)]
pub enum TaskServiceError {
    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The column was not found on the given board.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// A domain rule rejected the operation.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),

    /// The board store failed.
    #[error(transparent)]
    BoardStore(#[from] BoardRepositoryError),

    /// The task store failed.
    #[error(transparent)]
    TaskStore(#[from] TaskRepositoryError),

    /// The history trail failed during a cascade.
    #[error(transparent)]
    History(#[from] HistoryRecorderError),
}

/// Request to create a task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    board_id: BoardId,
    column_id: ColumnId,
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    assignee: Option<UserId>,
    tags: Vec<String>,
    due_date: Option<DateTime<Utc>>,
    actor: UserId,
}

impl CreateTaskRequest {
    /// Creates a request for a task with the given title, defaulting to
    /// medium priority.
    #[must_use]
    pub fn new(
        board_id: BoardId,
        column_id: ColumnId,
        title: impl Into<String>,
        actor: UserId,
    ) -> Self {
        Self {
            board_id,
            column_id,
            title: title.into(),
            description: None,
            priority: TaskPriority::Medium,
            assignee: None,
            tags: Vec::new(),
            due_date: None,
            actor,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the task priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }

    /// Sets the initial tag set.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the initial due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Request to update a task's editable fields.
///
/// Absent fields are left untouched. Moving a task between columns is the
/// ordering engine's job, never an update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    actor: UserId,
    title: Option<String>,
    description: Option<Option<String>>,
    priority: Option<TaskPriority>,
    tags: Option<Vec<String>>,
    due_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateTaskRequest {
    /// Creates an empty update for the given task.
    #[must_use]
    pub const fn new(task_id: TaskId, actor: UserId) -> Self {
        Self {
            task_id,
            actor,
            title: None,
            description: None,
            priority: None,
            tags: None,
            due_date: None,
        }
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the tag set.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Replaces or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Request to append a comment to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentRequest {
    task_id: TaskId,
    author: UserId,
    body: String,
}

impl AddCommentRequest {
    /// Creates a request for the given task, author, and body.
    #[must_use]
    pub fn new(task_id: TaskId, author: UserId, body: impl Into<String>) -> Self {
        Self {
            task_id,
            author,
            body: body.into(),
        }
    }
}

/// Request to register attachment metadata on a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddAttachmentRequest {
    task_id: TaskId,
    file_name: String,
    size_bytes: u64,
    mime_type: String,
    uploaded_by: UserId,
    storage_pointer: String,
}

impl AddAttachmentRequest {
    /// Creates a request describing one uploaded file.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        file_name: impl Into<String>,
        size_bytes: u64,
        mime_type: impl Into<String>,
        uploaded_by: UserId,
        storage_pointer: impl Into<String>,
    ) -> Self {
        Self {
            task_id,
            file_name: file_name.into(),
            size_bytes,
            mime_type: mime_type.into(),
            uploaded_by,
            storage_pointer: storage_pointer.into(),
        }
    }
}

/// Application service for task lifecycle outside of moves.
#[derive(Debug)]
pub struct TaskService<S, H, N, C> {
    store: Arc<S>,
    history: HistoryRecorder<H, C>,
    notifier: NotificationDispatcher<N, C>,
    clock: Arc<C>,
}

impl<S, H, N, C> Clone for TaskService<S, H, N, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            history: self.history.clone(),
            notifier: self.notifier.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S, H, N, C> TaskService<S, H, N, C>
where
    S: BoardRepository + TaskRepository,
    H: HistoryRepository,
    N: NotificationRepository,
    C: Clock + Send + Sync,
{
    /// Creates a task service over the given store and side-effect
    /// services.
    #[must_use]
    pub const fn new(
        store: Arc<S>,
        history: HistoryRecorder<H, C>,
        notifier: NotificationDispatcher<N, C>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            store,
            history,
            notifier,
            clock,
        }
    }

    /// Creates a task at the end of its column.
    ///
    /// The task's status is resolved from the column it lands in, and its
    /// position is the next dense rank. Creation is recorded in the history
    /// trail, and an initial assignee other than the actor is notified;
    /// both side effects are best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ColumnNotFound`] when the column does not
    /// exist on the given board and [`TaskServiceError::Domain`] when the
    /// title is empty.
    pub async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, TaskServiceError> {
        let column = self.column_on_board(request.board_id, request.column_id).await?;
        let status = resolve_status(&column);
        let siblings = self.store.tasks_of_column(column.id()).await?;
        let position = u32::try_from(siblings.len()).unwrap_or(u32::MAX);

        let mut task = Task::new(
            request.board_id,
            column.id(),
            request.title,
            request.priority,
            status,
            position,
            self.clock.as_ref(),
        )?;
        if let Some(description) = request.description {
            task = task.with_description(description);
        }
        if let Some(assignee) = request.assignee {
            task = task.with_assignee(assignee);
        }
        if !request.tags.is_empty() {
            task = task.with_tags(request.tags);
        }
        if let Some(due_date) = request.due_date {
            task = task.with_due_date(due_date);
        }

        self.store.create_task(&task).await?;
        self.history
            .record_best_effort(RecordEntryRequest::new(
                task.id(),
                request.actor,
                HistoryAction::Created,
            ))
            .await;
        if let Some(assignee) = task.assigned_to()
            && assignee != request.actor
        {
            self.notifier
                .notify_best_effort(
                    NotifyRequest::new(
                        assignee,
                        request.actor,
                        NotificationKind::Assignment,
                        format!("Assigned: {}", task.title()),
                    )
                    .with_task(task.id())
                    .with_board(task.board_id()),
                )
                .await;
        }

        Ok(task)
    }

    /// Returns one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn task(&self, id: TaskId) -> Result<Task, TaskServiceError> {
        self.store
            .find_task(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    /// Applies an update to a task's editable fields.
    ///
    /// Each changed field is recorded in the history trail best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist and [`TaskServiceError::Domain`] when a new title is empty.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> Result<Task, TaskServiceError> {
        let mut task = self.task(request.task_id).await?;
        let clock = self.clock.as_ref();
        let mut records = Vec::new();

        if let Some(title) = request.title {
            let old = task.title().to_owned();
            task.rename(title, clock)?;
            records.push(
                RecordEntryRequest::new(task.id(), request.actor, HistoryAction::Updated)
                    .with_field("title")
                    .with_change(Some(old), Some(task.title().to_owned())),
            );
        }
        if let Some(description) = request.description {
            let old = task.description().map(str::to_owned);
            task.describe(description, clock);
            records.push(
                RecordEntryRequest::new(task.id(), request.actor, HistoryAction::Updated)
                    .with_field("description")
                    .with_change(old, task.description().map(str::to_owned)),
            );
        }
        if let Some(priority) = request.priority {
            let old = task.priority();
            if old != priority {
                task.set_priority(priority, clock);
                records.push(
                    RecordEntryRequest::new(
                        task.id(),
                        request.actor,
                        HistoryAction::PriorityChanged,
                    )
                    .with_field("priority")
                    .with_change(
                        Some(old.as_str().to_owned()),
                        Some(priority.as_str().to_owned()),
                    ),
                );
            }
        }
        if let Some(tags) = request.tags {
            task.set_tags(tags, clock);
            records.push(
                RecordEntryRequest::new(task.id(), request.actor, HistoryAction::Updated)
                    .with_field("tags"),
            );
        }
        if let Some(due_date) = request.due_date {
            let old = task.due_date();
            task.set_due_date(due_date, clock);
            records.push(
                RecordEntryRequest::new(task.id(), request.actor, HistoryAction::DueDateChanged)
                    .with_field("due_date")
                    .with_change(
                        old.map(|date| date.to_rfc3339()),
                        due_date.map(|date| date.to_rfc3339()),
                    ),
            );
        }

        self.store.update_task(&task).await?;
        for record in records {
            self.history.record_best_effort(record).await;
        }
        Ok(task)
    }

    /// Assigns or unassigns a task.
    ///
    /// The change is recorded in the history trail, and a new assignee
    /// other than the actor is notified; both side effects are best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn assign_task(
        &self,
        task_id: TaskId,
        assignee: Option<UserId>,
        actor: UserId,
    ) -> Result<Task, TaskServiceError> {
        let mut task = self.task(task_id).await?;
        let old = task.assigned_to();
        task.assign(assignee, self.clock.as_ref());
        self.store.update_task(&task).await?;

        self.history
            .record_best_effort(
                RecordEntryRequest::new(task_id, actor, HistoryAction::Assigned)
                    .with_field("assigned_to")
                    .with_change(
                        old.map(|user| user.to_string()),
                        assignee.map(|user| user.to_string()),
                    ),
            )
            .await;
        if let Some(new_assignee) = assignee
            && new_assignee != actor
        {
            self.notifier
                .notify_best_effort(
                    NotifyRequest::new(
                        new_assignee,
                        actor,
                        NotificationKind::Assignment,
                        format!("Assigned: {}", task.title()),
                    )
                    .with_task(task_id)
                    .with_board(task.board_id()),
                )
                .await;
        }
        Ok(task)
    }

    /// Records the external decision on a task's approval window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist and [`TaskServiceError::Domain`] when it has never entered an
    /// approval stage.
    pub async fn resolve_approval(
        &self,
        task_id: TaskId,
        status: ApprovalStatus,
        actor: UserId,
    ) -> Result<Task, TaskServiceError> {
        let mut task = self.task(task_id).await?;
        task.resolve_approval(status, self.clock.as_ref())?;
        self.store.update_task(&task).await?;

        self.history
            .record_best_effort(
                RecordEntryRequest::new(task_id, actor, HistoryAction::Updated)
                    .with_field("client_approval")
                    .with_change(None, Some(status.as_str().to_owned())),
            )
            .await;
        Ok(task)
    }

    /// Deletes a task, cascading to its comments, attachment metadata, and
    /// history trail.
    ///
    /// Surviving tasks in the column are renumbered so their positions stay
    /// dense.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist and [`TaskServiceError::History`] when the trail purge fails.
    pub async fn delete_task(&self, id: TaskId) -> Result<(), TaskServiceError> {
        let task = self.task(id).await?;
        self.store.delete_task(id).await?;
        self.history.purge_for_task(id).await?;
        self.renumber_column(task.column_id()).await
    }

    /// Closes the position gap left behind by a removed task.
    async fn renumber_column(&self, column: ColumnId) -> Result<(), TaskServiceError> {
        let survivors = self.store.tasks_of_column(column).await?;
        for (index, mut survivor) in survivors.into_iter().enumerate() {
            let position = u32::try_from(index).unwrap_or(u32::MAX);
            if survivor.position() != position {
                survivor.set_position(position);
                self.store.update_task(&survivor).await?;
            }
        }
        Ok(())
    }

    /// Appends a comment to a task.
    ///
    /// The comment is recorded in the history trail, and the task's
    /// assignee is notified unless they wrote it; both side effects are
    /// best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist and [`TaskServiceError::Domain`] when the body is empty.
    pub async fn add_comment(
        &self,
        request: AddCommentRequest,
    ) -> Result<Comment, TaskServiceError> {
        let task = self.task(request.task_id).await?;
        let comment = Comment::new(
            task.id(),
            request.author,
            request.body,
            self.clock.as_ref(),
        )?;
        self.store.add_comment(&comment).await?;

        self.history
            .record_best_effort(
                RecordEntryRequest::new(task.id(), request.author, HistoryAction::Updated)
                    .with_field("comment"),
            )
            .await;
        if let Some(assignee) = task.assigned_to()
            && assignee != request.author
        {
            self.notifier
                .notify_best_effort(
                    NotifyRequest::new(
                        assignee,
                        request.author,
                        NotificationKind::Comment,
                        format!("New comment on: {}", task.title()),
                    )
                    .with_task(task.id())
                    .with_board(task.board_id()),
                )
                .await;
        }
        Ok(comment)
    }

    /// Returns the comments of a task in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn comments_of(&self, task: TaskId) -> Result<Vec<Comment>, TaskServiceError> {
        self.task(task).await?;
        Ok(self.store.comments_of_task(task).await?)
    }

    /// Registers attachment metadata on a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist and [`TaskServiceError::Domain`] when the file name is empty.
    pub async fn add_attachment(
        &self,
        request: AddAttachmentRequest,
    ) -> Result<Attachment, TaskServiceError> {
        let task = self.task(request.task_id).await?;
        let attachment = Attachment::new(
            task.id(),
            request.file_name,
            request.size_bytes,
            request.mime_type,
            request.uploaded_by,
            request.storage_pointer,
            self.clock.as_ref(),
        )?;
        self.store.add_attachment(&attachment).await?;

        self.history
            .record_best_effort(
                RecordEntryRequest::new(task.id(), request.uploaded_by, HistoryAction::Updated)
                    .with_field("attachment")
                    .with_change(None, Some(attachment.file_name().to_owned())),
            )
            .await;
        Ok(attachment)
    }

    /// Returns the attachment metadata of a task in upload order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn attachments_of(&self, task: TaskId) -> Result<Vec<Attachment>, TaskServiceError> {
        self.task(task).await?;
        Ok(self.store.attachments_of_task(task).await?)
    }

    /// Returns the full audit trail of a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn audit_trail(
        &self,
        task: TaskId,
    ) -> Result<Vec<HistoryEntry>, TaskServiceError> {
        self.task(task).await?;
        Ok(self.history.audit_trail(task).await?)
    }

    /// Loads a column and checks it belongs to the given board.
    async fn column_on_board(
        &self,
        board: BoardId,
        column: ColumnId,
    ) -> Result<Column, TaskServiceError> {
        let found = self
            .store
            .find_column(column)
            .await?
            .ok_or(TaskServiceError::ColumnNotFound(column))?;
        if found.board_id() != board {
            return Err(TaskServiceError::ColumnNotFound(column));
        }
        Ok(found)
    }
}
