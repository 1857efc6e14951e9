use crate::filename::derive_extension;
use rand::Rng;

/// Builds an object key for remote storage: `<prefix>/<millis>_<16 hex>.<ext>`.
///
/// The millisecond timestamp plus 8 random bytes keeps keys unique across
/// concurrent uploads, so existing objects are never overwritten.
pub fn object_key(prefix: &str, original: Option<&str>, default_ext: &str) -> String {
    let ext = derive_extension(original, default_ext);
    let millis = chrono::Utc::now().timestamp_millis();
    let token = hex::encode(rand::rng().random::<[u8; 8]>());

    format!("{}/{}_{}.{}", prefix.trim_matches('/'), millis, token, ext)
}

/// Builds an on-disk filename for local storage: `<millis>-<random>.<ext>`.
pub fn local_filename(original: Option<&str>, default_ext: &str) -> String {
    let ext = derive_extension(original, default_ext);
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = rand::rng().random_range(0..1_000_000_000u32);

    format!("{}-{}.{}", millis, suffix, ext)
}
