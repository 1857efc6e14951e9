use crate::handlers::{health_check, serve_upload, upload_file, AppState};
use async_trait::async_trait;
use axum::{
    routing::{get, post},
    Router,
};
use axum_test::TestServer;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use updrop_storage::{PublicUrl, RequestOrigin, StorageBackend, StorageError};

/// How the in-memory backend should misbehave
pub(crate) enum FailMode {
    None,
    MissingConfig,
    Broken,
}

/// In-memory storage backend with deterministic keys
pub(crate) struct MemoryBackend {
    pub(crate) objects: Mutex<HashMap<String, (String, Bytes)>>,
    counter: AtomicU64,
    fail: FailMode,
    warn_on_url: bool,
}

impl MemoryBackend {
    pub(crate) fn new() -> Self {
        Self::with(FailMode::None, false)
    }

    pub(crate) fn failing(fail: FailMode) -> Self {
        Self::with(fail, false)
    }

    pub(crate) fn warning() -> Self {
        Self::with(FailMode::None, true)
    }

    fn with(fail: FailMode, warn_on_url: bool) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            counter: AtomicU64::new(0),
            fail,
            warn_on_url,
        }
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    fn new_key(&self, original_filename: Option<&str>, default_ext: &str) -> String {
        let ext = updrop_utils::derive_extension(original_filename, default_ext);
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("uploads/{}.{}", n, ext)
    }

    async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), StorageError> {
        match self.fail {
            FailMode::MissingConfig => Err(StorageError::MissingConfig("storage.s3.bucket_name")),
            FailMode::Broken => Err(StorageError::UploadError(
                key.to_string(),
                "bucket unreachable".to_string(),
            )),
            FailMode::None => {
                self.objects
                    .lock()
                    .unwrap()
                    .insert(key.to_string(), (content_type.to_string(), data));
                Ok(())
            }
        }
    }

    fn public_url(&self, key: &str, origin: &RequestOrigin) -> PublicUrl {
        if self.warn_on_url {
            PublicUrl::with_warning(key.to_string(), "public base url not configured")
        } else {
            PublicUrl::new(format!("{}/{}", origin.base(), key))
        }
    }

    fn describe(&self) -> &'static str {
        "memory storage"
    }
}

/// Builds a test server exposing every route the service serves
pub(crate) fn test_server(
    backend: Arc<MemoryBackend>,
    echo_backend_errors: bool,
    upload_dir: &str,
) -> TestServer {
    let state = AppState::new(
        backend,
        "jpg".to_string(),
        upload_dir.to_string(),
        echo_backend_errors,
        100,
    );

    let app = Router::new()
        .route("/", get(health_check))
        .route("/upload", post(upload_file))
        .route("/uploads/*path", get(serve_upload))
        .with_state(state);

    TestServer::new(app).unwrap()
}
