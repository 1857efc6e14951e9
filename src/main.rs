mod bootstrap;

use crate::bootstrap::{config, logging, router, server};
use anyhow::Result;
use std::sync::Arc;
use updrop_api::AppState;
use updrop_config::{Config, StorageBackend as StorageBackendType};
use updrop_events::{AppEvent, EventBus};
#[cfg(feature = "s3")]
use updrop_storage::S3Backend;
use updrop_storage::{LocalBackend, StorageBackend};

#[tokio::main]
async fn main() -> Result<()> {
    logging::initialize();

    let events = EventBus::new();
    events.emit(AppEvent::Starting);

    let config_path = std::env::var("UPDROP_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = config::load(&config_path, &events).await?;

    server::initialize_upload_dir(&config, &events).await?;

    let storage = initialize_storage(&config, &events).await?;
    let backend_label = storage.describe().to_string();

    let app_state = AppState::new(
        storage,
        config.upload.default_extension.clone(),
        config.upload.dir.clone(),
        config.upload.echo_backend_errors,
        config.server.streaming_threshold_mb,
    );
    let app = router::build(&config, app_state);
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let listener = bind_server(&addr).await?;

    events.emit(AppEvent::Ready {
        addr: addr.clone(),
        backend: backend_label,
    });

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
        tracing::info!("Shutdown signal received, initiating graceful shutdown...");
    };

    axum::serve(listener, app.into_make_service())
        .tcp_nodelay(config.server.tcp_nodelay)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    events.emit(AppEvent::Shutdown);
    Ok(())
}

async fn initialize_storage(
    config: &Config,
    events: &Arc<EventBus>,
) -> Result<Arc<dyn StorageBackend>> {
    match config.storage.backend {
        StorageBackendType::Local => {
            let backend = LocalBackend::new(
                std::path::PathBuf::from(&config.upload.dir),
                "uploads",
            );

            events.emit(AppEvent::StorageInitialized {
                backend: config.storage.backend.as_str().to_string(),
                detail: config.upload.dir.clone(),
            });

            Ok(Arc::new(backend) as Arc<dyn StorageBackend>)
        }
        #[cfg(feature = "s3")]
        StorageBackendType::S3 => {
            let s3 = &config.storage.s3;
            let backend = S3Backend::new(
                s3.endpoint_url.clone(),
                s3.region.clone(),
                s3.access_key_id.clone(),
                s3.secret_access_key.clone(),
                s3.bucket_name.clone(),
                s3.public_base_url.clone(),
                config.upload.key_prefix.clone(),
            )
            .await;

            if let Some(setting) = backend.missing_setting() {
                events.emit(AppEvent::StorageWarning {
                    message: format!("Missing {}; uploads will fail until it is set", setting),
                });
            }

            events.emit(AppEvent::StorageInitialized {
                backend: config.storage.backend.as_str().to_string(),
                detail: format!("bucket={}, endpoint={}", s3.bucket_name, s3.endpoint_url),
            });

            Ok(Arc::new(backend) as Arc<dyn StorageBackend>)
        }
        #[cfg(not(feature = "s3"))]
        StorageBackendType::S3 => {
            anyhow::bail!(
                "S3 backend selected but not compiled. Rebuild with --features s3 to enable S3 support."
            )
        }
    }
}

async fn bind_server(addr: &str) -> Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            let port = addr.split(':').last().unwrap_or("unknown");
            tracing::error!("❌ Port {} is already in use", port);
            tracing::error!("Another application is using this port");
            tracing::error!("Solutions:");
            tracing::error!("1. Stop the other application");
            tracing::error!("2. Change the port in config.toml");
            #[cfg(target_os = "windows")]
            tracing::error!("3. Find process: netstat -ano | findstr :{}", port);
            #[cfg(not(target_os = "windows"))]
            tracing::error!("3. Find process: lsof -i :{}", port);
        } else {
            tracing::error!("❌ Failed to bind server on {}: {}", addr, e);
        }
        anyhow::anyhow!("Failed to bind server: {}", e)
    })
}
