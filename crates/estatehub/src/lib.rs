pub mod claims;
pub mod config;
pub mod drafts;
pub mod error;
pub mod failures;
pub mod listings;
pub mod reviews;
pub mod telemetry;
pub mod wizard;
