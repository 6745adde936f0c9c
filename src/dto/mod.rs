use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Note, Timer};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note title
    pub title: String,
    /// Note content, empty when omitted
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    /// Note title
    pub title: String,
    /// Note content, empty when omitted
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BulkDeleteNotesRequest {
    /// IDs of the notes to delete; missing IDs are ignored
    pub ids: Vec<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteSearchParams {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteCountResponse {
    /// Total number of stored notes
    pub total_notes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimerResponse {
    /// Timer ID
    pub id: i64,
    /// Name of the tracked task
    pub task_name: String,
    /// Interval start
    pub start_time: NaiveDateTime,
    /// Interval end; null only for rows written outside this service
    pub end_time: Option<NaiveDateTime>,
    /// Interval length in whole seconds
    pub duration: i64,
}

impl From<Timer> for TimerResponse {
    fn from(timer: Timer) -> Self {
        Self {
            id: timer.id,
            task_name: timer.task_name,
            start_time: timer.start_time,
            end_time: timer.end_time,
            duration: timer.duration,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTimerRequest {
    /// Name of the tracked task
    pub task_name: String,
    /// Interval start
    pub start_time: NaiveDateTime,
    /// Interval end
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateTimerRequest {
    /// Name of the tracked task
    pub task_name: String,
    /// Interval start
    pub start_time: NaiveDateTime,
    /// Interval end
    pub end_time: NaiveDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TotalDurationParams {
    pub task_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TotalDurationResponse {
    /// Summed duration in seconds; null when no timer matches the task
    pub total_duration_seconds: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AverageDurationResponse {
    /// Mean duration in seconds; null when no timers exist
    pub average_duration_seconds: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimerRangeParams {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_note_request_defaults_to_empty_content() {
        let request: CreateNoteRequest = serde_json::from_str(r#"{"title": "Foo"}"#).unwrap();
        assert_eq!(request.title, "Foo");
        assert_eq!(request.content, "");
    }

    #[test]
    fn create_timer_request_accepts_naive_timestamps() {
        let request: CreateTimerRequest = serde_json::from_str(
            r#"{"task_name": "writing", "start_time": "2024-01-01T00:00:00", "end_time": "2024-01-01T00:05:30"}"#,
        )
        .unwrap();
        assert_eq!(request.task_name, "writing");
        assert_eq!((request.end_time - request.start_time).num_seconds(), 330);
    }

    #[test]
    fn absent_total_duration_serializes_as_null() {
        let response = TotalDurationResponse {
            total_duration_seconds: None,
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({ "total_duration_seconds": null })
        );
    }

    #[test]
    fn timer_response_keeps_missing_end_time_as_null() {
        let response = TimerResponse {
            id: 1,
            task_name: "reading".to_string(),
            start_time: "2024-01-01T08:00:00".parse().unwrap(),
            end_time: None,
            duration: 0,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["end_time"], serde_json::Value::Null);
        assert_eq!(value["start_time"], "2024-01-01T08:00:00");
    }
}
