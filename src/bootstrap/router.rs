use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
};
use updrop_api::{health_check, serve_upload, upload_file, AppState};
use updrop_config::{Config, StorageBackend};

pub fn build(config: &Config, app_state: AppState) -> Router {
    let max_upload_size = config.server.max_upload_size_mb * 1024 * 1024;
    let timeout = Duration::from_secs(config.server.timeout_secs);
    let max_concurrent_requests = config.server.max_concurrent_requests;

    let mut router = Router::new()
        .route("/", get(health_check))
        .route("/upload", post(upload_file));

    // Stored files are only served from disk with the local backend
    if config.storage.backend == StorageBackend::Local {
        router = router.route("/uploads/*path", get(serve_upload));
    }

    // The axum default body cap sits below the configured upload cap,
    // so it has to be raised alongside the limit layer
    let mut router = router
        .layer(ConcurrencyLimitLayer::new(max_concurrent_requests))
        .layer(DefaultBodyLimit::max(max_upload_size))
        .layer(RequestBodyLimitLayer::new(max_upload_size))
        .layer(TimeoutLayer::new(timeout));

    // Optionally enable compression based on config
    if config.server.enable_compression {
        router = router.layer(CompressionLayer::new());
    }

    router
        .layer(build_cors_layer(&config.server.allowed_origins))
        .with_state(app_state)
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use std::future::IntoFuture;
    use std::sync::Arc;
    use updrop_api::UploadResponse;
    use updrop_storage::LocalBackend;

    fn test_config(upload_dir: &str) -> Config {
        toml::from_str(&format!(
            r#"
            [server]
            host = "127.0.0.1"
            port = 0

            [upload]
            dir = "{}"

            [storage]
            backend = "local"
            "#,
            upload_dir
        ))
        .unwrap()
    }

    fn build_app(config: &Config) -> Router {
        let backend = Arc::new(LocalBackend::new(
            std::path::PathBuf::from(&config.upload.dir),
            "uploads",
        ));
        let state = AppState::new(
            backend,
            config.upload.default_extension.clone(),
            config.upload.dir.clone(),
            config.upload.echo_backend_errors,
            config.server.streaming_threshold_mb,
        );
        build(config, state)
    }

    #[tokio::test]
    async fn uploads_then_serves_the_same_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path().to_str().unwrap());
        let server = TestServer::new(build_app(&config)).unwrap();

        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(b"round trip".as_slice())
                .file_name("pic.png")
                .mime_type("image/png"),
        );
        let uploaded = server.post("/upload").multipart(form).await;
        uploaded.assert_status_ok();

        let url = uploaded.json::<UploadResponse>().url;
        let file_name = url.splitn(2, "/uploads/").nth(1).unwrap().to_string();

        let served = server.get(&format!("/uploads/{}", file_name)).await;
        served.assert_status_ok();
        assert_eq!(served.as_bytes().as_ref(), b"round trip".as_slice());
    }

    #[tokio::test]
    async fn rejects_bodies_over_the_upload_cap() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path().to_str().unwrap());
        // Real HTTP transport so the request carries a Content-Length header,
        // which the body-limit layer needs to reject the body up front
        let server = TestServer::builder()
            .http_transport()
            .build(build_app(&config))
            .unwrap();

        let response = server
            .post("/upload")
            .bytes(bytes::Bytes::from(vec![0u8; 6 * 1024 * 1024]))
            .content_type("application/octet-stream")
            .await;

        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn concurrent_uploads_get_distinct_urls() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path().to_str().unwrap());
        let server = TestServer::new(build_app(&config)).unwrap();

        let post = |bytes: &'static [u8]| {
            server
                .post("/upload")
                .multipart(MultipartForm::new().add_part(
                    "file",
                    Part::bytes(bytes).file_name("same.jpg").mime_type("image/jpeg"),
                ))
                .into_future()
        };

        let (a, b, c) = tokio::join!(post(b"one"), post(b"two"), post(b"three"));

        let urls: std::collections::HashSet<String> = [a, b, c]
            .iter()
            .map(|response| {
                response.assert_status_ok();
                response.json::<UploadResponse>().url
            })
            .collect();

        assert_eq!(urls.len(), 3);
    }
}
