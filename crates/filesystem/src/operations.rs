use super::models::FileSystem;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

impl FileSystem {
    /// Creates the upload directory if needed and returns its absolute path.
    pub async fn ensure_upload_dir(dir: &str) -> Result<PathBuf> {
        let abs_path = Self::get_absolute_path(Path::new(dir))?;
        Self::create_directory(&abs_path, "Upload directory").await?;
        Ok(abs_path)
    }

    pub fn build_upload_path(upload_dir: &str, file_name: &str) -> PathBuf {
        PathBuf::from(upload_dir).join(file_name)
    }

    pub fn get_absolute_path_string(path: &str) -> Result<String> {
        let abs_path = Self::get_absolute_path(Path::new(path))?;
        Ok(abs_path.display().to_string())
    }

    async fn create_directory(path: &Path, description: &str) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
            tracing::debug!("    Created: {} ({})", path.display(), description);
        } else {
            tracing::debug!("    Exists:  {} ({})", path.display(), description);
        }
        Ok(())
    }

    fn get_absolute_path(path: &Path) -> Result<PathBuf> {
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(abs_path)
    }
}
