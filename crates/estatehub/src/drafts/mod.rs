//! Client-side save points: the pending review draft plus a few session flags, stored as
//! plain strings under fixed keys. No versioning; the last write wins.

pub mod review;
pub mod router;
pub mod store;

use std::sync::Arc;

use crate::config::DraftConfig;

pub use review::{ReviewDraft, ReviewDraftKeeper, SessionPreferences, UserRole};
pub use router::draft_router;
pub use store::{DraftError, DraftKey, DraftStore, FileDraftStore, MemoryDraftStore};

/// Pick the backing store from configuration.
pub fn store_from_config(config: &DraftConfig) -> Arc<dyn DraftStore> {
    match &config.path {
        Some(path) => Arc::new(FileDraftStore::new(path.clone())),
        None => Arc::new(MemoryDraftStore::default()),
    }
}
