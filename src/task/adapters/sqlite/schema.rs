//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Store-assigned task identifier.
        id -> BigInt,
        /// Task title.
        title -> Text,
        /// Free-text description.
        description -> Text,
        /// Assignee label.
        assignee -> Text,
        /// Category label.
        category -> Text,
        /// Lifecycle status.
        status -> Text,
        /// Creation timestamp (UTC).
        created_at -> Timestamp,
        /// Completion timestamp (UTC), set once the task is completed.
        completed_at -> Nullable<Timestamp>,
    }
}

diesel::table! {
    /// Append-only journal of task mutations.
    task_activity (id) {
        /// Journal entry identifier.
        id -> BigInt,
        /// When the action happened (UTC).
        occurred_at -> Timestamp,
        /// Action name.
        action -> Text,
        /// Affected task identifier.
        task_id -> BigInt,
        /// Task title snapshot.
        title -> Text,
        /// Assignee snapshot.
        assignee -> Text,
        /// Category snapshot.
        category -> Text,
    }
}
