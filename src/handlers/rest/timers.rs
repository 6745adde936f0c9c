use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;

use std::sync::Arc;

use crate::{
    dto::{
        AverageDurationResponse, CreateTimerRequest, TimerRangeParams, TimerResponse,
        TotalDurationParams, TotalDurationResponse, UpdateTimerRequest,
    },
    service::{ServiceError, TimerService},
};

#[utoipa::path(
    post,
    path = "/timers",
    request_body = CreateTimerRequest,
    responses(
        (status = 201, description = "Timer created successfully", body = TimerResponse),
        (status = 400, description = "Empty task name"),
        (status = 500, description = "Internal server error")
    ),
    tag = "timers"
)]
#[debug_handler]
pub async fn create_timer(
    State(service): State<Arc<TimerService>>,
    Json(payload): Json<CreateTimerRequest>,
) -> Response {
    match service.create_timer(payload).await {
        Ok(timer) => (StatusCode::CREATED, Json(timer)).into_response(),
        Err(ServiceError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg).into_response(),
        Err(e) => {
            tracing::error!("failed to create timer entry: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create timer").into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/timers/{id}",
    params(
        ("id" = i64, Path, description = "Timer ID")
    ),
    request_body = UpdateTimerRequest,
    responses(
        (status = 200, description = "Timer updated successfully", body = TimerResponse),
        (status = 400, description = "Empty task name"),
        (status = 404, description = "Timer not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "timers"
)]
#[debug_handler]
pub async fn update_timer(
    State(service): State<Arc<TimerService>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTimerRequest>,
) -> Response {
    match service.update_timer(id, payload).await {
        Ok(timer) => (StatusCode::OK, Json(timer)).into_response(),
        Err(ServiceError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg).into_response(),
        Err(ServiceError::NotFound) => (StatusCode::NOT_FOUND, "Timer not found").into_response(),
        Err(e) => {
            tracing::error!("failed to update timer entry: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update timer").into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/timers/{id}",
    params(
        ("id" = i64, Path, description = "Timer ID")
    ),
    responses(
        (status = 204, description = "Timer deleted, or was already absent"),
        (status = 500, description = "Internal server error")
    ),
    tag = "timers"
)]
#[debug_handler]
pub async fn delete_timer(
    State(service): State<Arc<TimerService>>,
    Path(id): Path<i64>,
) -> Response {
    // Deleting an absent timer is not an error.
    match service.delete_timer(id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!("failed to delete timer entry: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete timer").into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/timers/{id}",
    params(
        ("id" = i64, Path, description = "Timer ID")
    ),
    responses(
        (status = 200, description = "Timer found", body = TimerResponse),
        (status = 404, description = "Timer not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "timers"
)]
#[debug_handler]
pub async fn get_one_timer(
    State(service): State<Arc<TimerService>>,
    Path(id): Path<i64>,
) -> Response {
    match service.get_one_timer(id).await {
        Ok(timer) => (StatusCode::OK, Json(timer)).into_response(),
        Err(ServiceError::NotFound) => (StatusCode::NOT_FOUND, "Timer not found").into_response(),
        Err(e) => {
            tracing::error!("failed to get timer entry: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to get timer").into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/timers",
    responses(
        (status = 200, description = "List of all timers", body = Vec<TimerResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "timers"
)]
#[debug_handler]
pub async fn get_all_timers(State(service): State<Arc<TimerService>>) -> Response {
    match service.get_all_timers().await {
        Ok(timers) => (StatusCode::OK, Json(timers)).into_response(),
        Err(e) => {
            tracing::error!("failed to get timer entries: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get all timers",
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/timers/active",
    responses(
        (status = 200, description = "Timers without an end time", body = Vec<TimerResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "timers"
)]
#[debug_handler]
pub async fn active_timers(State(service): State<Arc<TimerService>>) -> Response {
    match service.active_timers().await {
        Ok(timers) => (StatusCode::OK, Json(timers)).into_response(),
        Err(e) => {
            tracing::error!("failed to get active timer entries: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get active timers",
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/timers/duration",
    params(
        ("task_name" = String, Query, description = "Exact task name to sum durations for")
    ),
    responses(
        (status = 200, description = "Summed duration, null when the task has no timers", body = TotalDurationResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "timers"
)]
#[debug_handler]
pub async fn total_duration(
    State(service): State<Arc<TimerService>>,
    Query(params): Query<TotalDurationParams>,
) -> Response {
    match service.total_duration(&params.task_name).await {
        Ok(total) => (
            StatusCode::OK,
            Json(TotalDurationResponse {
                total_duration_seconds: total,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to sum timer durations: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to sum timer durations",
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/timers/average-duration",
    responses(
        (status = 200, description = "Mean duration, null when no timers exist", body = AverageDurationResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "timers"
)]
#[debug_handler]
pub async fn average_duration(State(service): State<Arc<TimerService>>) -> Response {
    match service.average_duration().await {
        Ok(average) => (
            StatusCode::OK,
            Json(AverageDurationResponse {
                average_duration_seconds: average,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to average timer durations: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to average timer durations",
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/timers/range",
    params(
        ("start" = NaiveDateTime, Query, description = "Inclusive lower bound on start_time"),
        ("end" = NaiveDateTime, Query, description = "Inclusive upper bound on start_time")
    ),
    responses(
        (status = 200, description = "Timers whose start_time falls within the bounds", body = Vec<TimerResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "timers"
)]
#[debug_handler]
pub async fn timers_in_range(
    State(service): State<Arc<TimerService>>,
    Query(params): Query<TimerRangeParams>,
) -> Response {
    match service.timers_in_range(params.start, params.end).await {
        Ok(timers) => (StatusCode::OK, Json(timers)).into_response(),
        Err(e) => {
            tracing::error!("failed to get timer entries in range: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get timers in range",
            )
                .into_response()
        }
    }
}
