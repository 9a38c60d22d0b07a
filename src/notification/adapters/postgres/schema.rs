//! Diesel schema for notification persistence.

diesel::table! {
    /// Per-user notifications with read receipts.
    notifications (id) {
        /// Notification identifier.
        id -> Uuid,
        /// Recipient user.
        recipient -> Uuid,
        /// User whose action triggered the notification.
        triggered_by -> Uuid,
        /// Announced event kind.
        #[max_length = 32]
        kind -> Varchar,
        /// Notification title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional body text.
        body -> Nullable<Text>,
        /// Related task, if any.
        task_id -> Nullable<Uuid>,
        /// Related board, if any.
        board_id -> Nullable<Uuid>,
        /// Read receipt timestamp, null while unread.
        read_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
