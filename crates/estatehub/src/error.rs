use crate::config::ConfigError;
use crate::drafts::DraftError;
use crate::listings::{MultipartError, SubmissionError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Input(serde_json::Error),
    Draft(DraftError),
    Submission(SubmissionError),
    Multipart(MultipartError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Input(err) => write!(f, "unreadable form input: {}", err),
            AppError::Draft(err) => write!(f, "draft error: {}", err),
            AppError::Submission(err) => write!(f, "{}", err),
            AppError::Multipart(err) => write!(f, "multipart error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Input(err) => Some(err),
            AppError::Draft(err) => Some(err),
            AppError::Submission(err) => Some(err),
            AppError::Multipart(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, errors) = match &self {
            AppError::Submission(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.errors().to_vec()),
            AppError::Input(_) => (StatusCode::BAD_REQUEST, Vec::new()),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Draft(_)
            | AppError::Multipart(_) => (StatusCode::INTERNAL_SERVER_ERROR, Vec::new()),
        };

        let body = if errors.is_empty() {
            Json(json!({ "error": self.to_string() }))
        } else {
            Json(json!({ "error": self.to_string(), "errors": errors }))
        };
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Input(value)
    }
}

impl From<DraftError> for AppError {
    fn from(value: DraftError) -> Self {
        Self::Draft(value)
    }
}

impl From<SubmissionError> for AppError {
    fn from(value: SubmissionError) -> Self {
        Self::Submission(value)
    }
}

impl From<MultipartError> for AppError {
    fn from(value: MultipartError) -> Self {
        Self::Multipart(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::ValidationReport;

    #[test]
    fn submission_errors_map_to_unprocessable() {
        let err = AppError::from(SubmissionError::Invalid {
            report: ValidationReport::from_errors(vec!["City is required".to_string()]),
        });
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn listener_failures_surface_as_io() {
        let err = AppError::from(std::io::Error::new(
            std::io::ErrorKind::AddrInUse,
            "address in use",
        ));
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn draft_errors_map_to_internal() {
        let err = AppError::from(DraftError::Unavailable("offline".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
