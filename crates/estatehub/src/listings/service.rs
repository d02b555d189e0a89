use serde::Serialize;
use tracing::{debug, warn};

use super::form::ListingFormState;
use super::multipart::{create_form_data_payload, FormDataPayload};
use super::payload::{transform_form_data_to_payload, PropertyListingPayload};
use super::validation::{validate_form_data, ValidationReport};

/// Validated listing in both shapes the backend accepts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedListing {
    pub payload: PropertyListingPayload,
    pub form_data: FormDataPayload,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission failed validation with {} problem(s)", .report.errors.len())]
    Invalid { report: ValidationReport },
}

impl SubmissionError {
    pub fn errors(&self) -> &[String] {
        match self {
            SubmissionError::Invalid { report } => &report.errors,
        }
    }
}

/// Validate-then-shape pipeline run when the wizard's final step is confirmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListingSubmissionService;

impl ListingSubmissionService {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, state: &ListingFormState) -> ValidationReport {
        validate_form_data(state)
    }

    /// Build the JSON payload and multipart form, or return every validation failure.
    pub fn prepare(&self, state: &ListingFormState) -> Result<PreparedListing, SubmissionError> {
        let report = validate_form_data(state);
        if !report.is_valid {
            warn!(
                problems = report.errors.len(),
                category = ?state.category,
                "listing submission rejected"
            );
            return Err(SubmissionError::Invalid { report });
        }

        let payload = transform_form_data_to_payload(state);
        let form_data = create_form_data_payload(state);
        debug!(
            category = ?payload.category,
            parts = form_data.len(),
            "listing submission prepared"
        );

        Ok(PreparedListing { payload, form_data })
    }
}
