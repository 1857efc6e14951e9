use crate::StorageError;
use bytes::Bytes;

/// Storage backend trait for upload persistence
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Generate a fresh storage key for the given client filename
    fn new_key(&self, original_filename: Option<&str>, default_ext: &str) -> String;

    /// Persist the upload body under `key`
    async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), StorageError>;

    /// Public URL for a stored key
    fn public_url(&self, key: &str, origin: &RequestOrigin) -> PublicUrl;

    /// Backend label for status output
    fn describe(&self) -> &'static str;
}

/// Scheme and host of the request a URL is built for
#[derive(Debug, Clone)]
pub struct RequestOrigin {
    scheme: String,
    host: String,
}

impl RequestOrigin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
        }
    }

    pub fn base(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

/// Resolved public URL for a stored object
#[derive(Debug, Clone)]
pub struct PublicUrl {
    pub url: String,
    pub warning: Option<String>,
}

impl PublicUrl {
    pub fn new(url: String) -> Self {
        Self { url, warning: None }
    }

    pub fn with_warning(url: String, warning: impl Into<String>) -> Self {
        Self {
            url,
            warning: Some(warning.into()),
        }
    }
}
