use crate::backend::{PublicUrl, RequestOrigin, StorageBackend};
use crate::StorageError;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_s3::{primitives::ByteStream, Client};
use bytes::Bytes;

/// S3-compatible storage backend
/// Compatible with: Cloudflare R2, AWS S3, MinIO, DigitalOcean Spaces, etc.
pub struct S3Backend {
    state: ClientState,
    bucket_name: String,
    public_base_url: Option<String>,
    key_prefix: String,
}

/// A backend with incomplete settings still accepts requests; uploads fail
/// with the name of the first missing setting until it is filled in.
enum ClientState {
    Ready(Client),
    Missing(&'static str),
}

impl S3Backend {
    pub async fn new(
        endpoint_url: String,
        region: String,
        access_key_id: String,
        secret_access_key: String,
        bucket_name: String,
        public_base_url: String,
        key_prefix: String,
    ) -> Self {
        let state = match first_missing(
            &endpoint_url,
            &bucket_name,
            &access_key_id,
            &secret_access_key,
        ) {
            Some(setting) => ClientState::Missing(setting),
            None => {
                let credentials = Credentials::new(
                    access_key_id,
                    secret_access_key,
                    None,
                    None,
                    "updrop-s3",
                );

                let config = aws_config::defaults(BehaviorVersion::latest())
                    .credentials_provider(credentials)
                    .region(Region::new(region))
                    .endpoint_url(endpoint_url)
                    .load()
                    .await;

                ClientState::Ready(Client::new(&config))
            }
        };

        Self {
            state,
            bucket_name,
            public_base_url: Some(public_base_url).filter(|url| !url.is_empty()),
            key_prefix,
        }
    }

    pub fn missing_setting(&self) -> Option<&'static str> {
        match self.state {
            ClientState::Missing(setting) => Some(setting),
            ClientState::Ready(_) => None,
        }
    }
}

fn first_missing(
    endpoint_url: &str,
    bucket_name: &str,
    access_key_id: &str,
    secret_access_key: &str,
) -> Option<&'static str> {
    if endpoint_url.is_empty() {
        return Some("storage.s3.endpoint_url");
    }
    if bucket_name.is_empty() {
        return Some("storage.s3.bucket_name");
    }
    if access_key_id.is_empty() {
        return Some("storage.s3.access_key_id");
    }
    if secret_access_key.is_empty() {
        return Some("storage.s3.secret_access_key");
    }
    None
}

#[async_trait::async_trait]
impl StorageBackend for S3Backend {
    fn new_key(&self, original_filename: Option<&str>, default_ext: &str) -> String {
        updrop_utils::object_key(&self.key_prefix, original_filename, default_ext)
    }

    async fn put_object(
        &self,
        key: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), StorageError> {
        let client = match &self.state {
            ClientState::Ready(client) => client,
            ClientState::Missing(setting) => return Err(StorageError::MissingConfig(setting)),
        };

        tracing::info!("Uploading {} to S3 bucket {}", key, self.bucket_name);

        client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| StorageError::UploadError(key.to_string(), e.to_string()))?;

        tracing::info!("Upload complete: {}", key);
        Ok(())
    }

    fn public_url(&self, key: &str, _origin: &RequestOrigin) -> PublicUrl {
        match &self.public_base_url {
            Some(base) => PublicUrl::new(format!("{}/{}", base.trim_end_matches('/'), key)),
            None => PublicUrl::with_warning(
                key.to_string(),
                "storage.s3.public_base_url is not set; returning the raw object key",
            ),
        }
    }

    fn describe(&self) -> &'static str {
        "s3 storage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn configured_backend(public_base_url: &str) -> S3Backend {
        S3Backend::new(
            "https://example.invalid".to_string(),
            "auto".to_string(),
            "test-access".to_string(),
            "test-secret".to_string(),
            "test-bucket".to_string(),
            public_base_url.to_string(),
            "uploads".to_string(),
        )
        .await
    }

    #[tokio::test]
    async fn reports_first_missing_setting() {
        let backend = S3Backend::new(
            String::new(),
            "auto".to_string(),
            "test-access".to_string(),
            "test-secret".to_string(),
            "test-bucket".to_string(),
            String::new(),
            "uploads".to_string(),
        )
        .await;

        assert_eq!(backend.missing_setting(), Some("storage.s3.endpoint_url"));
    }

    #[tokio::test]
    async fn uploads_fail_until_configured() {
        let backend = S3Backend::new(
            "https://example.invalid".to_string(),
            "auto".to_string(),
            "test-access".to_string(),
            String::new(),
            "test-bucket".to_string(),
            String::new(),
            "uploads".to_string(),
        )
        .await;

        let err = backend
            .put_object("uploads/a.jpg", "image/jpeg", Bytes::from_static(b"x"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StorageError::MissingConfig("storage.s3.secret_access_key")
        ));
    }

    #[tokio::test]
    async fn joins_public_base_without_double_slash() {
        let backend = configured_backend("https://pub-example.r2.dev/").await;
        let origin = RequestOrigin::new("http", "ignored");

        let resolved = backend.public_url("uploads/a.jpg", &origin);

        assert_eq!(resolved.url, "https://pub-example.r2.dev/uploads/a.jpg");
        assert!(resolved.warning.is_none());
    }

    #[tokio::test]
    async fn warns_when_public_base_is_unset() {
        let backend = configured_backend("").await;
        let origin = RequestOrigin::new("http", "ignored");

        let resolved = backend.public_url("uploads/a.jpg", &origin);

        assert_eq!(resolved.url, "uploads/a.jpg");
        assert!(resolved.warning.is_some());
    }

    #[tokio::test]
    async fn keys_carry_the_prefix() {
        let backend = configured_backend("https://pub-example.r2.dev").await;

        let key = backend.new_key(Some("photo.PNG"), "jpg");

        assert!(key.starts_with("uploads/"));
        assert!(key.ends_with(".png"));
    }
}
