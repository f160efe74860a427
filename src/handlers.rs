use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use crate::error::{BackendError, SessionError, TranslationError};
use crate::page::render_page;
use crate::session::{Notice, SessionState};
use crate::state::AppState;
use crate::translate::{
    Language, LanguagePair, TranslateRequest, TranslateResponse, TranslationRequest,
};

type ApiError = (StatusCode, Json<Value>);

/// Fields posted by the page's translate form and the session JSON API.
#[derive(Debug, Deserialize)]
pub struct TranslateForm {
    pub input_language: String,
    pub output_language: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    #[serde(flatten)]
    pub state: SessionState,
}

fn translation_error(err: &TranslationError) -> ApiError {
    let (status, kind) = match err {
        TranslationError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation"),
        TranslationError::Backend(BackendError::Timeout) => (StatusCode::GATEWAY_TIMEOUT, "backend"),
        TranslationError::Backend(_) => (StatusCode::BAD_GATEWAY, "backend"),
    };
    (status, Json(json!({ "error": err.to_string(), "kind": kind })))
}

fn session_error(err: &SessionError) -> ApiError {
    let status = match err {
        SessionError::NotFound(_) => StatusCode::NOT_FOUND,
        SessionError::Busy => StatusCode::CONFLICT,
    };
    (status, Json(json!({ "error": err.to_string() })))
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let settings = state.translator.settings();
    Json(json!({
        "status": "ok",
        "provider": state.config.llm_config.provider,
        "model": state.config.llm_config.model,
        "temperature": settings.temperature,
        "max_tokens": settings.max_tokens,
    }))
}

pub async fn list_languages() -> Json<Vec<Language>> {
    Json(Language::ALL.to_vec())
}

async fn run_translation(
    state: &AppState,
    payload: TranslateRequest,
) -> Result<TranslateResponse, TranslationError> {
    let pair = LanguagePair::parse(&payload.input_language, &payload.output_language)?;
    let request = TranslationRequest::new(pair, payload.text)?;
    let translated_text = state.translator.translate(&request).await?;
    Ok(TranslateResponse {
        translated_text,
        input_language: pair.input_language,
        output_language: pair.output_language,
    })
}

/// Stateless translation; nothing is remembered between calls.
pub async fn translate(
    State(state): State<AppState>,
    Json(payload): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    run_translation(&state, payload).await.map(Json).map_err(|e| {
        warn!("Translation request failed: {}", e);
        translation_error(&e)
    })
}

pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), ApiError> {
    let session_id = state.create_session();
    let session = state.session(session_id).map_err(|e| session_error(&e))?;
    Ok((
        StatusCode::CREATED,
        Json(SessionView {
            session_id,
            state: session,
        }),
    ))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state.session(session_id).map_err(|e| session_error(&e))?;
    Ok(Json(SessionView {
        session_id,
        state: session,
    }))
}

pub async fn translate_in_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<TranslateForm>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state
        .translate_in_session(
            session_id,
            &payload.input_language,
            &payload.output_language,
            &payload.text,
        )
        .await
        .map_err(|e| session_error(&e))?;
    Ok(Json(SessionView {
        session_id,
        state: session,
    }))
}

pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state.clear_session(session_id).map_err(|e| session_error(&e))?;
    Ok(Json(SessionView {
        session_id,
        state: session,
    }))
}

pub async fn cancel_translation(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let cancelled = state
        .cancel_translation(session_id)
        .map_err(|e| session_error(&e))?;
    Ok(Json(json!({ "cancelled": cancelled })))
}

// HTML pages

fn session_page_url(session_id: Uuid) -> String {
    format!("/sessions/{}", session_id)
}

pub async fn index(State(state): State<AppState>) -> Redirect {
    Redirect::to(&session_page_url(state.create_session()))
}

pub async fn show_page(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Response {
    match state.session(session_id) {
        Ok(session) => Html(render_page(session_id, &session)).into_response(),
        // Stale bookmark: start over with a fresh session.
        Err(SessionError::NotFound(_)) => index(State(state)).await.into_response(),
        Err(e) => session_error(&e).into_response(),
    }
}

pub async fn submit_translation_form(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Form(form): Form<TranslateForm>,
) -> Response {
    let result = state
        .translate_in_session(session_id, &form.input_language, &form.output_language, &form.text)
        .await;

    match result {
        Ok(_) => Redirect::to(&session_page_url(session_id)).into_response(),
        Err(SessionError::Busy) => match state.session(session_id) {
            Ok(mut view) => {
                view.notice = Some(Notice::Warning(SessionError::Busy.to_string()));
                (StatusCode::CONFLICT, Html(render_page(session_id, &view))).into_response()
            }
            Err(e) => session_error(&e).into_response(),
        },
        Err(e) => session_error(&e).into_response(),
    }
}

pub async fn submit_clear_form(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Response {
    match state.clear_session(session_id) {
        Ok(_) => Redirect::to(&session_page_url(session_id)).into_response(),
        Err(e) => session_error(&e).into_response(),
    }
}
