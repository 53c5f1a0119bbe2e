use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::ParticipantProfile;
use super::recorder::ResultSink;
use super::repository::{RepositoryError, SessionId, SessionRepository};
use super::scoring::ScoringError;
use super::service::{ScreeningService, ScreeningServiceError};
use super::session::SessionProgress;

/// Router builder exposing the screening session endpoints.
pub fn screening_router<R, S>(service: Arc<ScreeningService<R, S>>) -> Router
where
    R: SessionRepository + 'static,
    S: ResultSink + 'static,
{
    Router::new()
        .route("/api/v1/instruments", get(instruments_handler::<R, S>))
        .route("/api/v1/screenings", post(start_handler::<R, S>))
        .route(
            "/api/v1/screenings/:session_id",
            get(progress_handler::<R, S>).delete(abandon_handler::<R, S>),
        )
        .route(
            "/api/v1/screenings/:session_id/answers",
            post(answer_handler::<R, S>),
        )
        .route(
            "/api/v1/screenings/:session_id/navigate",
            post(navigate_handler::<R, S>),
        )
        .route(
            "/api/v1/screenings/:session_id/submit",
            post(submit_handler::<R, S>),
        )
        .with_state(service)
}

#[derive(Debug, Serialize)]
struct InstrumentView {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    question_count: usize,
    max_score: u32,
    answer_labels: Vec<&'static str>,
    polarity: &'static str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StartScreeningRequest {
    pub(crate) instrument: String,
    pub(crate) participant: ParticipantProfile,
}

#[derive(Debug, Serialize)]
struct SessionView {
    session_id: String,
    #[serde(flatten)]
    progress: SessionProgress,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerRequest {
    pub(crate) question: usize,
    pub(crate) answer: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum NavigationDirection {
    Next,
    Previous,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NavigateRequest {
    pub(crate) direction: NavigationDirection,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SubmitRequest {
    #[serde(default)]
    pub(crate) recorded_on: Option<NaiveDate>,
}

pub(crate) async fn instruments_handler<R, S>(
    State(service): State<Arc<ScreeningService<R, S>>>,
) -> Response
where
    R: SessionRepository + 'static,
    S: ResultSink + 'static,
{
    let views: Vec<InstrumentView> = service
        .catalog()
        .instruments()
        .iter()
        .map(|instrument| InstrumentView {
            id: instrument.id,
            name: instrument.name,
            description: instrument.description,
            question_count: instrument.question_count(),
            max_score: instrument.max_score(),
            answer_labels: instrument.scale.labels(),
            polarity: instrument.polarity.label(),
        })
        .collect();

    (StatusCode::OK, Json(views)).into_response()
}

pub(crate) async fn start_handler<R, S>(
    State(service): State<Arc<ScreeningService<R, S>>>,
    Json(request): Json<StartScreeningRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    S: ResultSink + 'static,
{
    match service.start(&request.instrument, request.participant) {
        Ok(record) => {
            let view = SessionView {
                session_id: record.id.0.clone(),
                progress: record.session.progress(),
            };
            (StatusCode::ACCEPTED, Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn progress_handler<R, S>(
    State(service): State<Arc<ScreeningService<R, S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    S: ResultSink + 'static,
{
    let id = SessionId(session_id);
    match service.progress(&id) {
        Ok(progress) => {
            let view = SessionView {
                session_id: id.0,
                progress,
            };
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn answer_handler<R, S>(
    State(service): State<Arc<ScreeningService<R, S>>>,
    Path(session_id): Path<String>,
    Json(request): Json<AnswerRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    S: ResultSink + 'static,
{
    let id = SessionId(session_id);
    match service.record_answer(&id, request.question, &request.answer) {
        Ok(progress) => {
            let view = SessionView {
                session_id: id.0,
                progress,
            };
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn navigate_handler<R, S>(
    State(service): State<Arc<ScreeningService<R, S>>>,
    Path(session_id): Path<String>,
    Json(request): Json<NavigateRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    S: ResultSink + 'static,
{
    let id = SessionId(session_id);
    let moved = match request.direction {
        NavigationDirection::Next => service.advance(&id),
        NavigationDirection::Previous => service.retreat(&id),
    };

    match moved {
        Ok(progress) => {
            let view = SessionView {
                session_id: id.0,
                progress,
            };
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R, S>(
    State(service): State<Arc<ScreeningService<R, S>>>,
    Path(session_id): Path<String>,
    Json(request): Json<SubmitRequest>,
) -> Response
where
    R: SessionRepository + 'static,
    S: ResultSink + 'static,
{
    let id = SessionId(session_id);
    let recorded_on = request
        .recorded_on
        .unwrap_or_else(|| Local::now().date_naive());

    match service.submit(&id, recorded_on) {
        Ok(outcome) => {
            let report_text = outcome.summary.render_text();
            let payload = json!({
                "session_id": id.0,
                "summary": outcome.summary,
                "persisted": outcome.persisted,
                "report_text": report_text,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn abandon_handler<R, S>(
    State(service): State<Arc<ScreeningService<R, S>>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: SessionRepository + 'static,
    S: ResultSink + 'static,
{
    let id = SessionId(session_id);
    match service.abandon(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ScreeningServiceError) -> Response {
    match &error {
        ScreeningServiceError::Scoring(ScoringError::Incomplete { missing }) => {
            let payload = json!({
                "error": error.to_string(),
                "missing_questions": missing,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        ScreeningServiceError::UnknownInstrument { .. }
        | ScreeningServiceError::Session(_)
        | ScreeningServiceError::Scoring(_) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        ScreeningServiceError::Repository(RepositoryError::NotFound) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        ScreeningServiceError::Repository(RepositoryError::Conflict) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
        ScreeningServiceError::Repository(_) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
