pub mod notes;
pub mod timers;

use utoipa::OpenApi;

use crate::dto::{
    AverageDurationResponse, BulkDeleteNotesRequest, CreateNoteRequest, CreateTimerRequest,
    NoteCountResponse, NoteResponse, TimerResponse, TotalDurationResponse, UpdateNoteRequest,
    UpdateTimerRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        notes::create_note,
        notes::update_note,
        notes::delete_note,
        notes::bulk_delete_notes,
        notes::get_one_note,
        notes::get_all_notes,
        notes::search_notes,
        notes::count_notes,
        notes::recent_notes,
        timers::create_timer,
        timers::update_timer,
        timers::delete_timer,
        timers::get_one_timer,
        timers::get_all_timers,
        timers::active_timers,
        timers::total_duration,
        timers::average_duration,
        timers::timers_in_range
    ),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        BulkDeleteNotesRequest,
        NoteCountResponse,
        TimerResponse,
        CreateTimerRequest,
        UpdateTimerRequest,
        TotalDurationResponse,
        AverageDurationResponse
    )),
    tags(
        (name = "notes", description = "Notes management API"),
        (name = "timers", description = "Task timer management API")
    )
)]
pub struct ApiDoc;
