use std::sync::Arc;
use updrop_storage::StorageBackend;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub(super) storage: Arc<dyn StorageBackend>,
    pub(super) default_extension: Arc<String>,
    pub(super) upload_dir: Arc<String>,
    pub(super) echo_backend_errors: bool,
    pub(super) streaming_threshold_bytes: u64,
}
