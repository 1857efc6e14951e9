use super::models::AppState;
use axum::extract::State;

/// Plain text health check naming the active backend
pub async fn health_check(State(state): State<AppState>) -> String {
    format!("Upload service is running ({})", state.storage.describe())
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::{test_server, MemoryBackend};
    use std::sync::Arc;

    #[tokio::test]
    async fn names_active_backend() {
        let server = test_server(Arc::new(MemoryBackend::new()), false, "uploads");

        let response = server.get("/").await;

        response.assert_status_ok();
        assert_eq!(response.text(), "Upload service is running (memory storage)");
    }
}
