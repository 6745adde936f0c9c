use crate::{
    dto::{
        CreateNoteRequest, CreateTimerRequest, NoteResponse, TimerResponse, UpdateNoteRequest,
        UpdateTimerRequest,
    },
    repository::Repository,
};

use chrono::NaiveDateTime;

use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(&'static str),

    #[error("record not found")]
    NotFound,

    #[error("storage failure: {0}")]
    Storage(#[from] tokio_postgres::Error),
}

// Whole seconds, truncated toward zero. Negative when end precedes start;
// the store accepts that as-is.
fn duration_seconds(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_seconds()
}

fn check_title(title: &str) -> Result<(), ServiceError> {
    if title.is_empty() {
        return Err(ServiceError::Validation("title must not be empty"));
    }
    Ok(())
}

fn check_task_name(task_name: &str) -> Result<(), ServiceError> {
    if task_name.is_empty() {
        return Err(ServiceError::Validation("task_name must not be empty"));
    }
    Ok(())
}

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<tokio::sync::Mutex<Repository>>,
}

impl NoteService {
    pub const fn new(repo: Arc<tokio::sync::Mutex<Repository>>) -> Self {
        Self { repo }
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<NoteResponse, ServiceError> {
        check_title(&request.title)?;

        let note = self
            .repo
            .lock()
            .await
            .create_note(request.title, request.content)
            .await?;

        Ok(note.into())
    }

    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<NoteResponse, ServiceError> {
        check_title(&request.title)?;

        let note = self
            .repo
            .lock()
            .await
            .update_note(id, request.title, request.content)
            .await?;

        note.map(Into::into).ok_or(ServiceError::NotFound)
    }

    pub async fn delete_note(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(self.repo.lock().await.delete_note(id).await?)
    }

    pub async fn bulk_delete_notes(&self, ids: Vec<i64>) -> Result<u64, ServiceError> {
        Ok(self.repo.lock().await.bulk_delete_notes(&ids).await?)
    }

    pub async fn get_one_note(&self, id: i64) -> Result<NoteResponse, ServiceError> {
        let note = self.repo.lock().await.get_one_note(id).await?;

        note.map(Into::into).ok_or(ServiceError::NotFound)
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, ServiceError> {
        let notes = self.repo.lock().await.get_all_notes().await?;

        Ok(notes.into_iter().map(Into::into).collect())
    }

    pub async fn search_notes(&self, title: &str) -> Result<Vec<NoteResponse>, ServiceError> {
        let notes = self.repo.lock().await.search_notes(title).await?;

        Ok(notes.into_iter().map(Into::into).collect())
    }

    pub async fn count_notes(&self) -> Result<i64, ServiceError> {
        Ok(self.repo.lock().await.count_notes().await?)
    }

    pub async fn recent_notes(&self) -> Result<Vec<NoteResponse>, ServiceError> {
        let notes = self.repo.lock().await.recent_notes().await?;

        Ok(notes.into_iter().map(Into::into).collect())
    }
}

#[derive(Clone)]
pub struct TimerService {
    repo: Arc<tokio::sync::Mutex<Repository>>,
}

impl TimerService {
    pub const fn new(repo: Arc<tokio::sync::Mutex<Repository>>) -> Self {
        Self { repo }
    }

    pub async fn create_timer(
        &self,
        request: CreateTimerRequest,
    ) -> Result<TimerResponse, ServiceError> {
        check_task_name(&request.task_name)?;

        let duration = duration_seconds(request.start_time, request.end_time);
        let timer = self
            .repo
            .lock()
            .await
            .create_timer(
                request.task_name,
                request.start_time,
                request.end_time,
                duration,
            )
            .await?;

        Ok(timer.into())
    }

    pub async fn update_timer(
        &self,
        id: i64,
        request: UpdateTimerRequest,
    ) -> Result<TimerResponse, ServiceError> {
        check_task_name(&request.task_name)?;

        let duration = duration_seconds(request.start_time, request.end_time);
        let timer = self
            .repo
            .lock()
            .await
            .update_timer(
                id,
                request.task_name,
                request.start_time,
                request.end_time,
                duration,
            )
            .await?;

        timer.map(Into::into).ok_or(ServiceError::NotFound)
    }

    pub async fn delete_timer(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(self.repo.lock().await.delete_timer(id).await?)
    }

    pub async fn get_one_timer(&self, id: i64) -> Result<TimerResponse, ServiceError> {
        let timer = self.repo.lock().await.get_one_timer(id).await?;

        timer.map(Into::into).ok_or(ServiceError::NotFound)
    }

    pub async fn get_all_timers(&self) -> Result<Vec<TimerResponse>, ServiceError> {
        let timers = self.repo.lock().await.get_all_timers().await?;

        Ok(timers.into_iter().map(Into::into).collect())
    }

    pub async fn active_timers(&self) -> Result<Vec<TimerResponse>, ServiceError> {
        let timers = self.repo.lock().await.active_timers().await?;

        Ok(timers.into_iter().map(Into::into).collect())
    }

    pub async fn total_duration(&self, task_name: &str) -> Result<Option<i64>, ServiceError> {
        Ok(self.repo.lock().await.total_duration(task_name).await?)
    }

    pub async fn average_duration(&self) -> Result<Option<f64>, ServiceError> {
        Ok(self.repo.lock().await.average_duration().await?)
    }

    pub async fn timers_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<TimerResponse>, ServiceError> {
        let timers = self.repo.lock().await.timers_in_range(start, end).await?;

        Ok(timers.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[test]
    fn five_and_a_half_minutes_is_330_seconds() {
        assert_eq!(
            duration_seconds(ts("2024-01-01T00:00:00"), ts("2024-01-01T00:05:30")),
            330
        );
    }

    #[test]
    fn end_before_start_yields_negative_duration() {
        assert_eq!(
            duration_seconds(ts("2024-01-01T01:00:00"), ts("2024-01-01T00:00:00")),
            -3600
        );
    }

    #[test]
    fn identical_bounds_yield_zero() {
        let t = ts("2024-06-15T12:00:00");
        assert_eq!(duration_seconds(t, t), 0);
    }

    #[test]
    fn sub_second_remainder_is_dropped() {
        assert_eq!(
            duration_seconds(ts("2024-01-01T00:00:00"), ts("2024-01-01T00:00:01.900")),
            1
        );
    }

    #[test]
    fn empty_title_is_rejected() {
        assert!(matches!(
            check_title(""),
            Err(ServiceError::Validation(_))
        ));
        assert!(check_title("Groceries").is_ok());
    }

    #[test]
    fn empty_task_name_is_rejected() {
        assert!(matches!(
            check_task_name(""),
            Err(ServiceError::Validation(_))
        ));
        assert!(check_task_name("writing").is_ok());
    }
}
