use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::form::{Category, ListingFormState};
use super::payload::price_details;

pub const MIN_DESCRIPTION_CHARS: usize = 20;

/// Result of a checklist pass. `is_valid` mirrors `errors.is_empty()`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn contains(&self, message: &str) -> bool {
        self.errors.iter().any(|error| error == message)
    }
}

/// Collects messages in check order.
#[derive(Debug, Default)]
pub(crate) struct Checklist {
    errors: Vec<String>,
}

impl Checklist {
    pub(crate) fn require(&mut self, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.errors.push(message.to_string());
        }
    }

    pub(crate) fn check(&mut self, ok: bool, message: impl Into<String>) {
        if !ok {
            self.errors.push(message.into());
        }
    }

    /// Required e-mail: one message when blank, another when malformed.
    pub(crate) fn email(&mut self, value: &str, missing: &str, malformed: &str) {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            self.errors.push(missing.to_string());
        } else if !is_valid_email(trimmed) {
            self.errors.push(malformed.to_string());
        }
    }

    pub(crate) fn finish(self) -> ValidationReport {
        ValidationReport::from_errors(self.errors)
    }
}

pub fn is_valid_email(candidate: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
        .is_match(candidate)
}

/// Run every listing check without stopping at the first failure.
pub fn validate_form_data(state: &ListingFormState) -> ValidationReport {
    let mut checks = Checklist::default();

    checks.check(state.category.is_some(), "Category is required");
    checks.require(&state.property_type, "Property type is required");
    checks.require(&state.condition, "Property condition is required");
    checks.require(&state.country, "Country is required");
    checks.require(&state.city, "City is required");
    checks.require(&state.street_address, "Street address is required");
    checks.check(state.price_amount() > 0.0, "Price must be greater than 0");
    checks.check(price_details(state).is_finite(), "Price is too large");

    if state.category == Some(Category::Swap) {
        checks.require(
            &state.listing_duration,
            "Listing duration is required for Swap category",
        );
    }

    checks.check(state.cover_photo.is_some(), "Cover photo is required");
    for upload in &state.uploads {
        checks.check(
            upload.is_image_or_video(),
            format!("Unsupported media type for {}", upload.file_name),
        );
    }

    checks.check(
        state.description.trim().chars().count() >= MIN_DESCRIPTION_CHARS,
        format!("Description must be at least {MIN_DESCRIPTION_CHARS} characters"),
    );

    checks.require(&state.contact_name, "Contact name is required");
    checks.email(
        &state.contact_email,
        "Contact email is required",
        "Contact email is invalid",
    );
    checks.require(&state.contact_phone, "Contact phone is required");

    checks.finish()
}
