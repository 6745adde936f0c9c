mod dto;
mod handlers;
mod models;
mod repository;
mod service;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};

use std::{env, sync::Arc};

use handlers::rest;
use repository::Repository;

use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use service::{NoteService, TimerService};

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Fetch env variables
    let database_dsn =
        env::var("PG_DSN").expect("database dsn must be provided as an ENV variable");

    // Repository creation and migration
    let repo = Repository::new(database_dsn).await.unwrap_or_else(|e| {
        tracing::error!("Failed to establish database connection: {e}");
        panic!("failed to establish database connection: {e}");
    });
    let repo_ptr = Arc::new(tokio::sync::Mutex::new(repo));

    repo_ptr.lock().await.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    // Service creation
    let note_service = Arc::new(NoteService::new(repo_ptr.clone()));
    let timer_service = Arc::new(TimerService::new(repo_ptr.clone()));

    // Notes router config
    let notes_router = Router::new()
        .route("/notes", post(rest::notes::create_note))
        .route("/notes", get(rest::notes::get_all_notes))
        .route("/notes/search", get(rest::notes::search_notes))
        .route("/notes/count", get(rest::notes::count_notes))
        .route("/notes/recent", get(rest::notes::recent_notes))
        .route("/notes/bulk-delete", delete(rest::notes::bulk_delete_notes))
        .route("/notes/{id}", get(rest::notes::get_one_note))
        .route("/notes/{id}", put(rest::notes::update_note))
        .route("/notes/{id}", delete(rest::notes::delete_note))
        .with_state(note_service);

    // Timers router config
    let timers_router = Router::new()
        .route("/timers", post(rest::timers::create_timer))
        .route("/timers", get(rest::timers::get_all_timers))
        .route("/timers/active", get(rest::timers::active_timers))
        .route("/timers/duration", get(rest::timers::total_duration))
        .route(
            "/timers/average-duration",
            get(rest::timers::average_duration),
        )
        .route("/timers/range", get(rest::timers::timers_in_range))
        .route("/timers/{id}", get(rest::timers::get_one_timer))
        .route("/timers/{id}", put(rest::timers::update_timer))
        .route("/timers/{id}", delete(rest::timers::delete_timer))
        .with_state(timer_service);

    // Router config
    let router = Router::new()
        .route("/", get(root))
        .merge(notes_router)
        .merge(timers_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await.unwrap();

    // Starting router
    tracing::info!("Started listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, router)
        .await
        .expect("failed to start server");
}

async fn root() -> Response {
    (StatusCode::OK, "Hello world!").into_response()
}
