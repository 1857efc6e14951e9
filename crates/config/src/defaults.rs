/// Default values for configuration fields

pub fn tcp_nodelay() -> bool {
    true
}

pub fn timeout_secs() -> u64 {
    60
}

pub fn max_upload_size() -> usize {
    5
}

pub fn max_concurrent_requests() -> usize {
    1000
}

pub fn allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn streaming_threshold_mb() -> u64 {
    100  // Files larger than 100MB will be streamed instead of loaded into memory
}

pub fn enable_compression() -> bool {
    false
}

// Upload defaults
pub fn upload_dir() -> String {
    "uploads".to_string()
}

pub fn key_prefix() -> String {
    "uploads".to_string()
}

pub fn default_extension() -> String {
    "jpg".to_string()
}

pub fn upload_settings() -> super::models::UploadSettings {
    super::models::UploadSettings {
        dir: upload_dir(),
        key_prefix: key_prefix(),
        default_extension: default_extension(),
        echo_backend_errors: false,
    }
}

// Storage defaults
pub fn storage_backend() -> super::models::StorageBackend {
    super::models::StorageBackend::Local
}

pub fn storage_settings() -> super::models::StorageSettings {
    super::models::StorageSettings {
        backend: storage_backend(),
        s3: s3_settings(),
    }
}

pub fn s3_region() -> String {
    "auto".to_string()
}

pub fn s3_settings() -> super::models::S3Settings {
    super::models::S3Settings {
        endpoint_url: String::new(),
        region: s3_region(),
        access_key_id: String::new(),
        secret_access_key: String::new(),
        bucket_name: String::new(),
        public_base_url: String::new(),
    }
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# Updrop Configuration
# ===============================================================================

[server]
# Network
host = "0.0.0.0"                     # Server bind address (0.0.0.0 = all interfaces)
port = 5000                          # Server port

# Performance
tcp_nodelay = true                   # Disable Nagle's algorithm (lower latency)
timeout_secs = 60                    # Request timeout in seconds
max_concurrent_requests = 1000       # Max simultaneous connections
max_upload_size_mb = 5               # Max accepted upload size in MB
streaming_threshold_mb = 100         # Served files >100MB streamed, smaller ones read into RAM
enable_compression = false           # HTTP compression (gzip/brotli/deflate)

# CORS
allowed_origins = ["*"]              # "*" = all origins | ["https://example.com"] for production

[upload]
dir = "uploads"                      # Upload directory for the local backend (relative to working dir if not absolute)
key_prefix = "uploads"               # Key prefix for objects stored in S3
default_extension = "jpg"            # Extension used when the client filename has none
echo_backend_errors = false          # Include backend error detail in 500 responses

# ===============================================================================
# STORAGE BACKEND
# ===============================================================================
[storage]
backend = "local"                    # Storage backend: "local" or "s3"

# S3 Configuration (only used if backend = "s3")
[storage.s3]
endpoint_url = ""                    # S3 endpoint (e.g., https://<account>.r2.cloudflarestorage.com)
region = "auto"                      # S3 region (e.g., us-east-1 or "auto")
access_key_id = ""                   # Access Key ID (or env UPDROP_S3_ACCESS_KEY_ID)
secret_access_key = ""               # Secret Access Key (or env UPDROP_S3_SECRET_ACCESS_KEY)
bucket_name = ""                     # S3 bucket name
public_base_url = ""                 # Public base URL for uploaded objects (e.g., https://pub-xxxx.r2.dev)
"#;
