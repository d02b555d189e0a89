use serde::{Deserialize, Serialize};

use crate::listings::validation::{Checklist, ValidationReport};

pub const MIN_COMMENT_CHARS: usize = 10;

/// Review left by a tenant or buyer. This is the shape kept as a pending draft.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyReviewForm {
    pub property_id: String,
    pub rating: u8,
    pub title: String,
    pub comment: String,
    pub would_recommend: bool,
}

pub fn validate_review(form: &PropertyReviewForm) -> ValidationReport {
    let mut checks = Checklist::default();
    checks.require(&form.property_id, "Property is required");
    checks.check(
        (1..=5).contains(&form.rating),
        "Rating must be between 1 and 5",
    );
    checks.require(&form.title, "Review title is required");
    checks.check(
        form.comment.trim().chars().count() >= MIN_COMMENT_CHARS,
        format!("Review comment must be at least {MIN_COMMENT_CHARS} characters"),
    );
    checks.finish()
}
