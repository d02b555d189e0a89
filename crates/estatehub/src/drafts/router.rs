use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use super::review::ReviewDraftKeeper;
use super::store::DraftError;
use crate::reviews::PropertyReviewForm;

/// Pending-review draft endpoints backed by the configured store.
pub fn draft_router(keeper: ReviewDraftKeeper) -> Router {
    Router::new()
        .route(
            "/api/v1/drafts/review",
            get(restore_handler)
                .put(save_handler)
                .delete(clear_handler),
        )
        .with_state(keeper)
}

pub(crate) async fn restore_handler(State(keeper): State<ReviewDraftKeeper>) -> Response {
    match keeper.restore() {
        Ok(Some(draft)) => (StatusCode::OK, Json(draft)).into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => storage_failure(error),
    }
}

pub(crate) async fn save_handler(
    State(keeper): State<ReviewDraftKeeper>,
    Json(form): Json<PropertyReviewForm>,
) -> Response {
    match keeper.save(&form) {
        Ok(draft) => (StatusCode::OK, Json(draft)).into_response(),
        Err(error) => storage_failure(error),
    }
}

pub(crate) async fn clear_handler(State(keeper): State<ReviewDraftKeeper>) -> Response {
    match keeper.clear() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => storage_failure(error),
    }
}

fn storage_failure(error: DraftError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
