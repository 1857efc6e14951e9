mod health;
mod models;
mod state;
pub mod files;
pub mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use files::serve_upload;
pub use health::health_check;
pub use models::AppState;
pub use upload::upload_file;
