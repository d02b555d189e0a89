use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use super::form::ListingFormState;
use super::service::{ListingSubmissionService, SubmissionError};
use crate::claims::{validate_claim, ClaimPropertyForm};
use crate::reviews::{validate_review, PropertyReviewForm};

/// Router for checking and shaping wizard submissions.
pub fn listing_router() -> Router {
    Router::new()
        .route("/api/v1/listings/validate", post(validate_listing_handler))
        .route("/api/v1/listings/payload", post(payload_handler))
        .route("/api/v1/listings/form-data", post(form_data_handler))
        .route("/api/v1/claims/validate", post(validate_claim_handler))
        .route("/api/v1/reviews/validate", post(validate_review_handler))
        .with_state(ListingSubmissionService::new())
}

pub(crate) async fn validate_listing_handler(
    State(service): State<ListingSubmissionService>,
    Json(state): Json<ListingFormState>,
) -> Response {
    (StatusCode::OK, Json(service.validate(&state))).into_response()
}

pub(crate) async fn payload_handler(
    State(service): State<ListingSubmissionService>,
    Json(state): Json<ListingFormState>,
) -> Response {
    match service.prepare(&state) {
        Ok(prepared) => (StatusCode::OK, Json(prepared.payload)).into_response(),
        Err(error) => rejected(error),
    }
}

pub(crate) async fn form_data_handler(
    State(service): State<ListingSubmissionService>,
    Json(state): Json<ListingFormState>,
) -> Response {
    match service.prepare(&state) {
        Ok(prepared) => (StatusCode::OK, Json(prepared.form_data)).into_response(),
        Err(error) => rejected(error),
    }
}

pub(crate) async fn validate_claim_handler(Json(form): Json<ClaimPropertyForm>) -> Response {
    (StatusCode::OK, Json(validate_claim(&form))).into_response()
}

pub(crate) async fn validate_review_handler(Json(form): Json<PropertyReviewForm>) -> Response {
    (StatusCode::OK, Json(validate_review(&form))).into_response()
}

fn rejected(error: SubmissionError) -> Response {
    let payload = json!({
        "error": error.to_string(),
        "errors": error.errors(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
}
