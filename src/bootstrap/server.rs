use anyhow::Result;
use std::sync::Arc;
use updrop_config::{Config, StorageBackend};
use updrop_events::{AppEvent, EventBus};
use updrop_filesystem::FileSystem;

pub async fn initialize_upload_dir(config: &Config, events: &Arc<EventBus>) -> Result<()> {
    // S3 uploads never touch the local disk
    if config.storage.backend != StorageBackend::Local {
        return Ok(());
    }

    let path = FileSystem::ensure_upload_dir(&config.upload.dir).await?;

    events.emit(AppEvent::UploadDirReady {
        path: path.display().to_string(),
    });

    Ok(())
}
