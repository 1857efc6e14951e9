/// Longest extension carried over from a client-supplied filename.
const MAX_EXTENSION_LEN: usize = 16;

/// Derives the storage extension from a client-supplied filename.
///
/// The extension is whatever follows the last dot, lowercased and reduced to
/// ASCII alphanumerics. Filenames without a usable extension fall back to
/// `default_ext`.
pub fn derive_extension(original: Option<&str>, default_ext: &str) -> String {
    original
        .and_then(extension_of)
        .unwrap_or_else(|| default_ext.to_string())
}

fn extension_of(name: &str) -> Option<String> {
    let (_, raw) = name.rsplit_once('.')?;
    let ext: String = raw
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_alphanumeric())
        .take(MAX_EXTENSION_LEN)
        .collect();

    if ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_extension() {
        assert_eq!(derive_extension(Some("photo.PNG"), "jpg"), "png");
    }

    #[test]
    fn keeps_last_extension_only() {
        assert_eq!(derive_extension(Some("backup.tar.gz"), "jpg"), "gz");
    }

    #[test]
    fn falls_back_without_dot() {
        assert_eq!(derive_extension(Some("noextension"), "jpg"), "jpg");
    }

    #[test]
    fn falls_back_without_filename() {
        assert_eq!(derive_extension(None, "jpg"), "jpg");
    }

    #[test]
    fn falls_back_on_trailing_dot() {
        assert_eq!(derive_extension(Some("report."), "jpg"), "jpg");
    }

    #[test]
    fn strips_unusable_characters() {
        assert_eq!(derive_extension(Some("weird.p%n/g"), "jpg"), "png");
    }

    #[test]
    fn truncates_oversized_extensions() {
        let name = format!("file.{}", "x".repeat(50));
        assert_eq!(derive_extension(Some(&name), "jpg"), "x".repeat(16));
    }
}
