use estatehub::error::AppError;
use estatehub::listings::{ListingFormState, MediaFile};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load wizard state saved as JSON. Media file names are resolved next to the JSON file so
/// the multipart body carries real bytes.
pub(crate) fn read_listing_state(path: &Path) -> Result<ListingFormState, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let mut state = parse_listing_state(&raw)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    hydrate_media(&mut state, base)?;
    Ok(state)
}

pub(crate) fn parse_listing_state(raw: &str) -> Result<ListingFormState, AppError> {
    Ok(serde_json::from_str(raw)?)
}

/// Missing files are left empty; the backend decides whether a name-only part is acceptable.
fn hydrate_media(state: &mut ListingFormState, base: &Path) -> Result<(), AppError> {
    let files = state.cover_photo.iter_mut().chain(state.uploads.iter_mut());
    for file in files {
        load_bytes(file, base)?;
    }
    Ok(())
}

fn load_bytes(file: &mut MediaFile, base: &Path) -> Result<(), AppError> {
    let candidate = base.join(&file.file_name);
    if candidate.is_file() {
        file.bytes = std::fs::read(&candidate)?;
    }
    Ok(())
}
