//! Claim-property workflow: an owner or representative asserts control of an existing listing
//! and attaches proof of ownership.

use serde::{Deserialize, Serialize};

use crate::listings::multipart::FormDataPayload;
use crate::listings::validation::{Checklist, ValidationReport};
use crate::listings::MediaFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimRelationship {
    Owner,
    Agent,
    PropertyManager,
}

impl ClaimRelationship {
    pub const fn label(self) -> &'static str {
        match self {
            ClaimRelationship::Owner => "Owner",
            ClaimRelationship::Agent => "Agent",
            ClaimRelationship::PropertyManager => "Property Manager",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClaimPropertyForm {
    pub property_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub relationship: Option<ClaimRelationship>,
    pub documents: Vec<MediaFile>,
    pub notes: String,
}

pub fn validate_claim(form: &ClaimPropertyForm) -> ValidationReport {
    let mut checks = Checklist::default();
    checks.require(&form.property_id, "Property is required");
    checks.require(&form.full_name, "Full name is required");
    checks.email(&form.email, "Email is required", "Email is invalid");
    checks.require(&form.phone, "Phone number is required");
    checks.check(
        form.relationship.is_some(),
        "Relationship to property is required",
    );
    checks.check(
        !form.documents.is_empty(),
        "At least one ownership document is required",
    );
    checks.finish()
}

pub fn create_claim_form_data(form: &ClaimPropertyForm) -> FormDataPayload {
    let mut payload = FormDataPayload::new();
    payload.append_present("propertyId", &form.property_id);
    payload.append_present("claimant.fullName", &form.full_name);
    payload.append_present("claimant.email", &form.email);
    payload.append_present("claimant.phone", &form.phone);
    if let Some(relationship) = form.relationship {
        payload.append_text("relationship", relationship.label());
    }
    for document in &form.documents {
        payload.append_file("documents[]", document);
    }
    payload.append_present("notes", &form.notes);
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim() -> ClaimPropertyForm {
        ClaimPropertyForm {
            property_id: "prop-88".to_string(),
            full_name: "Tomás Ortega".to_string(),
            email: "tomas@example.org".to_string(),
            phone: "+34 600 000 000".to_string(),
            relationship: Some(ClaimRelationship::PropertyManager),
            documents: vec![MediaFile::new("title-deed.pdf", b"%PDF".to_vec())],
            notes: String::new(),
        }
    }

    #[test]
    fn complete_claim_is_valid() {
        assert!(validate_claim(&claim()).is_valid);
    }

    #[test]
    fn empty_claim_lists_all_problems() {
        let report = validate_claim(&ClaimPropertyForm::default());
        assert_eq!(
            report.errors,
            vec![
                "Property is required",
                "Full name is required",
                "Email is required",
                "Phone number is required",
                "Relationship to property is required",
                "At least one ownership document is required",
            ]
        );
    }

    #[test]
    fn form_data_uses_claimant_paths() {
        let form = create_claim_form_data(&claim());
        assert_eq!(form.get("claimant.fullName"), Some("Tomás Ortega"));
        assert_eq!(form.get("relationship"), Some("Property Manager"));
        assert_eq!(form.get_all("documents[]").len(), 1);
        assert!(!form.contains_key("notes"));
    }
}
