use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Upload failed for '{0}': {1}")]
    UploadError(String, String),

    #[error("Missing {0}")]
    MissingConfig(&'static str),
}
