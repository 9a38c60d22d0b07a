//! Diesel schema for board-context persistence.

diesel::table! {
    /// Board records.
    boards (id) {
        /// Board identifier.
        id -> Uuid,
        /// Board name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional board description.
        description -> Nullable<Text>,
        /// Optional organisational-area binding.
        #[max_length = 100]
        area_key -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Column records, densely positioned within their board.
    columns (id) {
        /// Column identifier.
        id -> Uuid,
        /// Owning board.
        board_id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Display colour.
        #[max_length = 32]
        color -> Varchar,
        /// Dense position within the board.
        position -> Integer,
        /// Optional canonical stage key.
        #[max_length = 100]
        stage_key -> Nullable<Varchar>,
        /// Optional approval SLA window in hours.
        sla_hours -> Nullable<Integer>,
        /// Optional work-in-progress limit.
        wip_limit -> Nullable<Integer>,
    }
}

diesel::table! {
    /// Task records, densely positioned within their column.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning board.
        board_id -> Uuid,
        /// Owning column.
        column_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Task priority.
        #[max_length = 20]
        priority -> Varchar,
        /// Column-derived status.
        #[max_length = 20]
        status -> Varchar,
        /// Optional assignee.
        assigned_to -> Nullable<Uuid>,
        /// Tag set as a JSON array.
        tags -> Jsonb,
        /// Dense position within the column.
        position -> Integer,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Schemaless reference-links blob; the engine interprets only the
        /// `client_approval` key.
        reference_links -> Jsonb,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only task comments.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Comment author.
        author -> Uuid,
        /// Comment body.
        body -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Attachment metadata; binary content lives in external storage.
    attachments (id) {
        /// Attachment identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Original file name.
        #[max_length = 255]
        file_name -> Varchar,
        /// File size in bytes.
        size_bytes -> BigInt,
        /// Declared MIME type.
        #[max_length = 100]
        mime_type -> Varchar,
        /// Uploading user.
        uploaded_by -> Uuid,
        /// Opaque pointer into the external binary store.
        storage_pointer -> Text,
        /// Upload timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(columns -> boards (board_id));
diesel::joinable!(tasks -> columns (column_id));
diesel::joinable!(comments -> tasks (task_id));
diesel::joinable!(attachments -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(boards, columns, tasks, comments, attachments);
