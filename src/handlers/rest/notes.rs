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
        BulkDeleteNotesRequest, CreateNoteRequest, NoteCountResponse, NoteResponse,
        NoteSearchParams, UpdateNoteRequest,
    },
    service::{NoteService, ServiceError},
};

#[utoipa::path(
    post,
    path = "/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Empty title"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    Json(payload): Json<CreateNoteRequest>,
) -> Response {
    match service.create_note(payload).await {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(ServiceError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg).into_response(),
        Err(e) => {
            tracing::error!("failed to create note entry: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create note").into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 400, description = "Empty title"),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateNoteRequest>,
) -> Response {
    match service.update_note(id, payload).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(ServiceError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg).into_response(),
        Err(ServiceError::NotFound) => (StatusCode::NOT_FOUND, "Note not found").into_response(),
        Err(e) => {
            tracing::error!("failed to update note entry: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update note").into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 204, description = "Note deleted, or was already absent"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(State(service): State<Arc<NoteService>>, Path(id): Path<i64>) -> Response {
    // Deleting an absent note is not an error.
    match service.delete_note(id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            tracing::error!("failed to delete note entry: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete note").into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/notes/bulk-delete",
    request_body = BulkDeleteNotesRequest,
    responses(
        (status = 204, description = "All listed notes that existed were deleted"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn bulk_delete_notes(
    State(service): State<Arc<NoteService>>,
    Json(payload): Json<BulkDeleteNotesRequest>,
) -> Response {
    match service.bulk_delete_notes(payload.ids).await {
        Ok(deleted) => {
            tracing::debug!("bulk delete removed {deleted} notes");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => {
            tracing::error!("failed to bulk delete note entries: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete notes").into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(service): State<Arc<NoteService>>,
    Path(id): Path<i64>,
) -> Response {
    match service.get_one_note(id).await {
        Ok(note) => (StatusCode::OK, Json(note)).into_response(),
        Err(ServiceError::NotFound) => (StatusCode::NOT_FOUND, "Note not found").into_response(),
        Err(e) => {
            tracing::error!("failed to get note entry: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to get note").into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/notes",
    responses(
        (status = 200, description = "List of all notes", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.get_all_notes().await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => {
            tracing::error!("failed to get note entries: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to get all notes").into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/notes/search",
    params(
        ("title" = String, Query, description = "Substring matched anywhere in the title")
    ),
    responses(
        (status = 200, description = "Notes whose title contains the substring", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn search_notes(
    State(service): State<Arc<NoteService>>,
    Query(params): Query<NoteSearchParams>,
) -> Response {
    match service.search_notes(&params.title).await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => {
            tracing::error!("failed to search note entries: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to search notes").into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/notes/count",
    responses(
        (status = 200, description = "Total number of notes", body = NoteCountResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn count_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.count_notes().await {
        Ok(count) => (
            StatusCode::OK,
            Json(NoteCountResponse { total_notes: count }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to count note entries: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to count notes").into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/notes/recent",
    responses(
        (status = 200, description = "Up to five most recently updated notes", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn recent_notes(State(service): State<Arc<NoteService>>) -> Response {
    match service.recent_notes().await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => {
            tracing::error!("failed to get recent note entries: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get recent notes",
            )
                .into_response()
        }
    }
}
