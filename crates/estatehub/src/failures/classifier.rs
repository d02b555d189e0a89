use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::notifier::{Notifier, Toast, ToastLevel};

/// Failure reported by the marketplace API or the transport in front of it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiFailure {
    pub status: Option<u16>,
    pub message: Option<String>,
    pub code: Option<String>,
}

impl ApiFailure {
    pub fn with_status(status: u16) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Transport-level failure with no HTTP response.
    pub fn transport(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: Some(message.into()),
            code: Some(code.into()),
        }
    }

    /// Read the server's explanation from a JSON error body (`message`, then `error`).
    pub fn from_response(status: u16, body: &Value) -> Self {
        let message = ["message", "error"]
            .iter()
            .find_map(|field| body.get(field).and_then(Value::as_str))
            .map(str::to_string);
        let code = body.get("code").and_then(Value::as_str).map(str::to_string);
        Self {
            status: Some(status),
            message,
            code,
        }
    }

    fn server_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Validation,
    RateLimited,
    Server,
    Network,
    Timeout,
    Unknown,
}

impl ErrorCategory {
    pub const fn default_message(self) -> &'static str {
        match self {
            ErrorCategory::BadRequest => "Invalid request. Please check your input and try again.",
            ErrorCategory::Unauthorized => "Your session has expired. Please log in again.",
            ErrorCategory::Forbidden => "You do not have permission to perform this action.",
            ErrorCategory::NotFound => "The requested resource was not found.",
            ErrorCategory::Conflict => "This resource conflicts with existing data.",
            ErrorCategory::Validation => "Some fields are invalid. Please review the form.",
            ErrorCategory::RateLimited => "Too many requests. Please wait a moment and try again.",
            ErrorCategory::Server => "Server error. Please try again later.",
            ErrorCategory::Network => "Network error. Please check your internet connection.",
            ErrorCategory::Timeout => "The request timed out. Please try again.",
            ErrorCategory::Unknown => "An unexpected error occurred. Please try again.",
        }
    }

    /// Categories where the server's own wording is more useful than ours.
    const fn prefers_server_message(self) -> bool {
        matches!(
            self,
            ErrorCategory::BadRequest | ErrorCategory::Conflict | ErrorCategory::Validation
        )
    }

    pub const fn redirect(self) -> Option<&'static str> {
        match self {
            ErrorCategory::Unauthorized => Some("/login"),
            ErrorCategory::Forbidden => Some("/unauthorized"),
            _ => None,
        }
    }
}

const TIMEOUT_MARKERS: [&str; 4] = ["timeout", "timed out", "econnaborted", "etimedout"];
const NETWORK_MARKERS: [&str; 4] = ["network", "failed to fetch", "err_network", "econnrefused"];

/// Where a handled failure leaves the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorOutcome {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

/// Classify-and-display. Nothing here retries; every failure is terminal for the action.
pub struct ErrorHandler;

impl ErrorHandler {
    pub fn classify(failure: &ApiFailure) -> ErrorCategory {
        if let Some(status) = failure.status {
            match status {
                400 => return ErrorCategory::BadRequest,
                401 => return ErrorCategory::Unauthorized,
                403 => return ErrorCategory::Forbidden,
                404 => return ErrorCategory::NotFound,
                409 => return ErrorCategory::Conflict,
                422 => return ErrorCategory::Validation,
                429 => return ErrorCategory::RateLimited,
                500..=599 => return ErrorCategory::Server,
                402..=499 => return ErrorCategory::BadRequest,
                _ => {}
            }
        }

        let haystack = [failure.code.as_deref(), failure.message.as_deref()]
            .into_iter()
            .flatten()
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join(" ");

        if TIMEOUT_MARKERS.iter().any(|marker| haystack.contains(marker)) {
            ErrorCategory::Timeout
        } else if NETWORK_MARKERS.iter().any(|marker| haystack.contains(marker)) {
            ErrorCategory::Network
        } else {
            ErrorCategory::Unknown
        }
    }

    /// User-facing text for a failure. Never empty.
    pub fn get_error_message(failure: &ApiFailure) -> String {
        let category = Self::classify(failure);
        match failure.server_message() {
            Some(message) if category.prefers_server_message() => message.to_string(),
            _ => category.default_message().to_string(),
        }
    }

    pub fn handle_api_error(failure: &ApiFailure, notifier: &dyn Notifier) -> ErrorOutcome {
        let category = Self::classify(failure);
        let message = Self::get_error_message(failure);
        warn!(
            status = failure.status,
            code = failure.code.as_deref(),
            ?category,
            "request failed"
        );
        notifier.notify(Toast::new(ToastLevel::Error, message.clone()));

        ErrorOutcome {
            category,
            message,
            redirect: category.redirect(),
        }
    }

    pub fn handle_validation_errors(errors: &[String], notifier: &dyn Notifier) {
        for error in errors {
            notifier.notify(Toast::new(ToastLevel::Warning, error.clone()));
        }
    }

    pub fn handle_success(message: &str, notifier: &dyn Notifier) {
        notifier.notify(Toast::new(ToastLevel::Success, message));
    }
}
