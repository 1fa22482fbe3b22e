//! Diesel schema for task and audit-event persistence.

diesel::table! {
    /// Task records with lifecycle state and optimistic-lock version.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 200]
        title -> Varchar,
        /// Task description.
        description -> Text,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Priority.
        #[max_length = 10]
        priority -> Varchar,
        /// Owner identifier.
        #[max_length = 64]
        owner_id -> Varchar,
        /// Assignee identifier, if any.
        #[max_length = 64]
        assignee_id -> Nullable<Varchar>,
        /// Due date, if any.
        due_date -> Nullable<Timestamptz>,
        /// Soft-deletion flag.
        is_deleted -> Bool,
        /// Optimistic-lock version.
        version -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only task audit events; `seq` breaks timestamp ties.
    task_events (seq) {
        /// Monotonic insertion sequence.
        seq -> Int8,
        /// Event identifier.
        id -> Uuid,
        /// Identifier of the task the event belongs to.
        task_id -> Uuid,
        /// Event timestamp.
        recorded_at -> Timestamptz,
        /// Event category.
        #[max_length = 20]
        event_type -> Varchar,
        /// Free-form payload.
        meta -> Jsonb,
    }
}
