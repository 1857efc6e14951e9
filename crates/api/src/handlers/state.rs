use super::models::AppState;
use std::sync::Arc;
use updrop_storage::StorageBackend;

impl AppState {
    pub fn new(
        storage: Arc<dyn StorageBackend>,
        default_extension: String,
        upload_dir: String,
        echo_backend_errors: bool,
        streaming_threshold_mb: u64,
    ) -> Self {
        Self {
            storage,
            default_extension: Arc::new(default_extension),
            upload_dir: Arc::new(upload_dir),
            echo_backend_errors,
            streaming_threshold_bytes: streaming_threshold_mb * 1024 * 1024,
        }
    }
}
