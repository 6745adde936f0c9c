use chrono::{DateTime, NaiveDateTime, Utc};

pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct Timer {
    pub id: i64,
    pub task_name: String,
    pub start_time: NaiveDateTime,
    // Nullable in storage, but always written by this service.
    pub end_time: Option<NaiveDateTime>,
    pub duration: i64,
}
