//! Turn API and transport failures into user-facing messages and toasts.

pub mod classifier;
pub mod notifier;
pub mod router;

pub use classifier::{ApiFailure, ErrorCategory, ErrorHandler, ErrorOutcome};
pub use notifier::{Notifier, RecordingNotifier, Toast, ToastLevel, TracingNotifier};
pub use router::failure_router;
