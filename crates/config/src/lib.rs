mod models;
mod defaults;
mod loader;
mod migration;
mod errors;

pub use errors::ConfigError;
pub use loader::{ENV_S3_ACCESS_KEY_ID, ENV_S3_SECRET_ACCESS_KEY};
pub use models::*;
