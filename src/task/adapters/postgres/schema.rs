//! Diesel schema for task persistence.

diesel::table! {
    /// Task records for scheduling and daily planning.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional task description.
        description -> Nullable<Text>,
        /// Completion status.
        #[max_length = 50]
        status -> Varchar,
        /// Priority level.
        #[max_length = 50]
        priority -> Varchar,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Optional assignee reference.
        assigned_to -> Nullable<Uuid>,
        /// Optional team reference.
        team_id -> Nullable<Uuid>,
        /// Creator reference.
        created_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
