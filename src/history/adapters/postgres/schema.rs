//! Diesel schema for history persistence.

diesel::table! {
    /// Append-only task history entries.
    history_entries (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Task the entry belongs to.
        task_id -> Uuid,
        /// User who made the change.
        actor -> Uuid,
        /// Kind of change recorded.
        #[max_length = 32]
        action -> Varchar,
        /// Changed field name, if the action names one.
        #[max_length = 100]
        field -> Nullable<Varchar>,
        /// Value before the change.
        old_value -> Nullable<Text>,
        /// Value after the change.
        new_value -> Nullable<Text>,
        /// When the change was recorded.
        recorded_at -> Timestamptz,
        /// Database-assigned append order, tiebreaker for equal timestamps.
        seq -> BigInt,
    }
}
