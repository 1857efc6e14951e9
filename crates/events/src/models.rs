use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    // Application lifecycle
    Starting,
    Ready { addr: String, backend: String },
    Shutdown,

    // Configuration
    ConfigLoading { path: String },
    ConfigCreated { path: String },
    ConfigMigrated { added_fields: Vec<String> },

    // Storage
    StorageInitialized { backend: String, detail: String },
    StorageWarning { message: String },
    UploadDirReady { path: String },
}

pub struct EventBus;
