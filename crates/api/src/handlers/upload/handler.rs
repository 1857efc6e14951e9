use super::extract;
use crate::errors::ApiError;
use crate::handlers::models::AppState;
use crate::models::UploadResponse;
use axum::extract::{Multipart, State};
use axum::http::{header, HeaderMap};
use axum::response::Json;
use updrop_storage::{RequestOrigin, StorageError};

/// Accepts a multipart upload and stores it through the active backend
pub async fn upload_file(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let Some(file) = extract::read_upload(&mut multipart).await? else {
        return Err(ApiError::MissingFile);
    };

    let key = state
        .storage
        .new_key(file.file_name.as_deref(), &state.default_extension);

    tracing::debug!(
        "Storing upload '{}' ({} bytes, {})",
        key,
        file.data.len(),
        file.content_type
    );

    if let Err(err) = state
        .storage
        .put_object(&key, &file.content_type, file.data)
        .await
    {
        return Err(match err {
            StorageError::MissingConfig(setting) => ApiError::MissingConfig(setting),
            other => {
                tracing::error!("Storing upload '{}' failed: {}", key, other);
                ApiError::UploadFailed {
                    details: state.echo_backend_errors.then(|| other.to_string()),
                }
            }
        });
    }

    let resolved = state.storage.public_url(&key, &request_origin(&headers));
    if let Some(warning) = &resolved.warning {
        tracing::warn!("{}", warning);
    }

    Ok(Json(UploadResponse {
        url: resolved.url,
        warning: resolved.warning,
    }))
}

/// Scheme comes from `X-Forwarded-Proto` when a proxy supplies it.
fn request_origin(headers: &HeaderMap) -> RequestOrigin {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");

    RequestOrigin::new(scheme, host)
}
