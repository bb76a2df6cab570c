//! Diesel schema for coursework persistence.

diesel::table! {
    /// Registered platform users.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        name -> Text,
        /// Unique lower-case email.
        email -> Text,
        /// Role name.
        #[max_length = 20]
        role -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Course projects and their lifecycle status.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Project name.
        name -> Text,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// First day of the project.
        start_date -> Date,
        /// Last day of the project, if known.
        end_date -> Nullable<Date>,
        /// Lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Creating user.
        created_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Teams working on a project.
    teams (id) {
        /// Team identifier.
        id -> Uuid,
        /// Team name.
        name -> Text,
        /// Owning project.
        project_id -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Team membership relation.
    user_teams (user_id, team_id) {
        /// Member user.
        user_id -> Uuid,
        /// Team joined.
        team_id -> Uuid,
    }
}

diesel::table! {
    /// Tasks inside projects.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Creating user.
        created_by -> Uuid,
        /// Task title.
        title -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Task status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Submissions made against tasks.
    submissions (id) {
        /// Submission identifier.
        id -> Uuid,
        /// Submitted content.
        content -> Text,
        /// Optional reference to an uploaded file.
        file_ref -> Nullable<Text>,
        /// Server-side acceptance timestamp.
        submitted_at -> Timestamptz,
        /// Task submitted against.
        task_id -> Uuid,
        /// Submitting user.
        user_id -> Uuid,
    }
}

diesel::table! {
    /// Notifications addressed to users.
    notifications (id) {
        /// Notification identifier.
        id -> Uuid,
        /// Recipient user.
        user_id -> Uuid,
        /// Message text.
        message -> Text,
        /// Free-form type tag.
        kind -> Text,
        /// Read flag.
        is_read -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Feedback left on submissions.
    feedback (id) {
        /// Feedback identifier.
        id -> Uuid,
        /// Submission the feedback refers to.
        submission_id -> Uuid,
        /// Feedback text.
        content -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Replies to feedback.
    feedback_responses (id) {
        /// Response identifier.
        id -> Uuid,
        /// Parent feedback.
        feedback_id -> Uuid,
        /// Response text.
        content -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> users (created_by));
diesel::joinable!(teams -> projects (project_id));
diesel::joinable!(user_teams -> users (user_id));
diesel::joinable!(user_teams -> teams (team_id));
diesel::joinable!(tasks -> projects (project_id));
diesel::joinable!(submissions -> tasks (task_id));
diesel::joinable!(notifications -> users (user_id));
diesel::joinable!(feedback -> submissions (submission_id));
diesel::joinable!(feedback_responses -> feedback (feedback_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    projects,
    teams,
    user_teams,
    tasks,
    submissions,
    notifications,
    feedback,
    feedback_responses,
);
