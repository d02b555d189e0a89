use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::store::{DraftError, DraftKey, DraftStore};
use crate::reviews::PropertyReviewForm;

/// Review form captured mid-edit, e.g. before a login redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub form: PropertyReviewForm,
    pub saved_at: DateTime<Utc>,
}

/// Save-on-change, restore-on-mount, clear-on-success for the pending review.
#[derive(Clone)]
pub struct ReviewDraftKeeper {
    store: Arc<dyn DraftStore>,
}

impl ReviewDraftKeeper {
    pub fn new(store: Arc<dyn DraftStore>) -> Self {
        Self { store }
    }

    pub fn save(&self, form: &PropertyReviewForm) -> Result<ReviewDraft, DraftError> {
        self.save_at(form, Utc::now())
    }

    pub fn save_at(
        &self,
        form: &PropertyReviewForm,
        saved_at: DateTime<Utc>,
    ) -> Result<ReviewDraft, DraftError> {
        let draft = ReviewDraft {
            form: form.clone(),
            saved_at,
        };
        let encoded = serde_json::to_string(&draft)?;
        self.store.set(DraftKey::PendingReviewData, encoded)?;
        debug!(property_id = %form.property_id, "review draft saved");
        Ok(draft)
    }

    /// Unreadable drafts are dropped rather than surfaced.
    pub fn restore(&self) -> Result<Option<ReviewDraft>, DraftError> {
        let Some(raw) = self.store.get(DraftKey::PendingReviewData)? else {
            return Ok(None);
        };

        match serde_json::from_str::<ReviewDraft>(&raw) {
            Ok(draft) => Ok(Some(draft)),
            Err(err) => {
                warn!(error = %err, "discarding unreadable review draft");
                self.store.remove(DraftKey::PendingReviewData)?;
                Ok(None)
            }
        }
    }

    pub fn clear(&self) -> Result<(), DraftError> {
        self.store.remove(DraftKey::PendingReviewData)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Buyer,
    Seller,
    Agent,
    Admin,
}

impl UserRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            UserRole::Buyer => "buyer",
            UserRole::Seller => "seller",
            UserRole::Agent => "agent",
            UserRole::Admin => "admin",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "buyer" => Some(UserRole::Buyer),
            "seller" => Some(UserRole::Seller),
            "agent" => Some(UserRole::Agent),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// Small session flags kept next to the review draft.
#[derive(Clone)]
pub struct SessionPreferences {
    store: Arc<dyn DraftStore>,
}

impl SessionPreferences {
    pub fn new(store: Arc<dyn DraftStore>) -> Self {
        Self { store }
    }

    pub fn user_role(&self) -> Result<Option<UserRole>, DraftError> {
        Ok(self
            .store
            .get(DraftKey::UserRole)?
            .as_deref()
            .and_then(UserRole::parse))
    }

    pub fn set_user_role(&self, role: UserRole) -> Result<(), DraftError> {
        self.store.set(DraftKey::UserRole, role.as_str().to_string())
    }

    pub fn has_completed_onboarding(&self) -> Result<bool, DraftError> {
        Ok(self
            .store
            .get(DraftKey::HasCompletedOnboarding)?
            .is_some_and(|flag| flag.trim() == "true"))
    }

    pub fn set_onboarding_complete(&self, complete: bool) -> Result<(), DraftError> {
        self.store
            .set(DraftKey::HasCompletedOnboarding, complete.to_string())
    }

    pub fn admin_profile_picture(&self) -> Result<Option<String>, DraftError> {
        self.store.get(DraftKey::AdminProfilePicture)
    }

    pub fn set_admin_profile_picture(&self, url: &str) -> Result<(), DraftError> {
        self.store
            .set(DraftKey::AdminProfilePicture, url.trim().to_string())
    }

    pub fn clear_admin_profile_picture(&self) -> Result<(), DraftError> {
        self.store.remove(DraftKey::AdminProfilePicture)
    }
}
