use super::{disk, validator};
use crate::errors::ApiError;
use crate::handlers::models::AppState;
use axum::{
    extract::{Path, State},
    response::Response,
};
use updrop_filesystem::FileSystem;

/// Serves a stored upload from the local backend's directory
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response, ApiError> {
    tracing::debug!("serve_upload: requested file = '{}'", file_name);

    validator::validate_path_component(&file_name)?;

    let full_path = FileSystem::build_upload_path(&state.upload_dir, &file_name);
    disk::serve_from_disk(full_path, state.streaming_threshold_bytes).await
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::{test_server, MemoryBackend};
    use crate::models::ErrorResponse;
    use axum::http::StatusCode;
    use std::sync::Arc;

    #[tokio::test]
    async fn serves_stored_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("1700000000000-42.png"), b"png bytes").unwrap();
        let server = test_server(
            Arc::new(MemoryBackend::new()),
            false,
            tmp.path().to_str().unwrap(),
        );

        let response = server.get("/uploads/1700000000000-42.png").await;

        response.assert_status_ok();
        let content_type = response.header("content-type");
        assert_eq!(content_type.to_str().unwrap(), "image/png");
        assert_eq!(response.as_bytes().as_ref(), b"png bytes".as_slice());
    }

    #[tokio::test]
    async fn missing_files_return_json_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let server = test_server(
            Arc::new(MemoryBackend::new()),
            false,
            tmp.path().to_str().unwrap(),
        );

        let response = server.get("/uploads/ghost.jpg").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, "Resource not found");
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("present.txt"), b"here").unwrap();
        let server = test_server(
            Arc::new(MemoryBackend::new()),
            false,
            tmp.path().to_str().unwrap(),
        );

        let response = server.get("/uploads/%2E%2E%2Fsecret.txt").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
