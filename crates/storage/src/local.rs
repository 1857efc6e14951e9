use crate::backend::{PublicUrl, RequestOrigin, StorageBackend};
use crate::StorageError;
use bytes::Bytes;
use std::path::PathBuf;

/// Local filesystem storage backend
pub struct LocalBackend {
    root: PathBuf,
    mount_path: String,
}

impl LocalBackend {
    /// `root` must already exist. `mount_path` is the URL path the stored
    /// files are served under.
    pub fn new(root: PathBuf, mount_path: impl Into<String>) -> Self {
        Self {
            root,
            mount_path: mount_path.into().trim_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl StorageBackend for LocalBackend {
    fn new_key(&self, original_filename: Option<&str>, default_ext: &str) -> String {
        updrop_utils::local_filename(original_filename, default_ext)
    }

    async fn put_object(
        &self,
        key: &str,
        _content_type: &str,
        data: Bytes,
    ) -> Result<(), StorageError> {
        let path = self.root.join(key);
        tokio::fs::write(&path, &data).await?;
        tracing::debug!("Wrote {} ({} bytes)", path.display(), data.len());
        Ok(())
    }

    fn public_url(&self, key: &str, origin: &RequestOrigin) -> PublicUrl {
        PublicUrl::new(format!("{}/{}/{}", origin.base(), self.mount_path, key))
    }

    fn describe(&self) -> &'static str {
        "local disk storage"
    }
}
