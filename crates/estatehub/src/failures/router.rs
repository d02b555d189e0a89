use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde::Serialize;

use super::classifier::{ApiFailure, ErrorHandler, ErrorOutcome};
use super::notifier::{RecordingNotifier, Toast};

#[derive(Debug, Serialize)]
pub(crate) struct ClassifiedFailure {
    pub(crate) outcome: ErrorOutcome,
    pub(crate) toasts: Vec<Toast>,
}

/// Endpoint that lets thin clients reuse the server-side failure wording.
pub fn failure_router() -> Router {
    Router::new().route("/api/v1/errors/classify", post(classify_handler))
}

pub(crate) async fn classify_handler(Json(failure): Json<ApiFailure>) -> impl IntoResponse {
    let notifier = RecordingNotifier::default();
    let outcome = ErrorHandler::handle_api_error(&failure, &notifier);
    let body = ClassifiedFailure {
        outcome,
        toasts: notifier.toasts(),
    };
    (StatusCode::OK, Json(body))
}
