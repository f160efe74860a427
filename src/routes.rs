use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // HTML page
        .route("/", get(handlers::index))
        .route("/sessions/:session_id", get(handlers::show_page))
        .route("/sessions/:session_id/translate", post(handlers::submit_translation_form))
        .route("/sessions/:session_id/clear", post(handlers::submit_clear_form))

        // Health check
        .route("/api/health", get(handlers::health_check))

        // REST API routes
        .route("/api/languages", get(handlers::list_languages))
        .route("/api/translate", post(handlers::translate))
        .route("/api/sessions", post(handlers::create_session))
        .route("/api/sessions/:session_id", get(handlers::get_session))
        .route("/api/sessions/:session_id/translate", post(handlers::translate_in_session))
        .route("/api/sessions/:session_id/clear", post(handlers::clear_session))
        .route("/api/sessions/:session_id/cancel", post(handlers::cancel_translation))
}

pub fn build_app(state: AppState) -> Router {
    create_routes()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
