//! Background image loading.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;
use tracing::{debug, warn};

/// Reads an image file and returns its bytes as standard base64.
///
/// A missing or unreadable file is not an error: a warning is logged and an
/// empty string is returned, which leaves the page without a background.
#[must_use]
pub fn load_background(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match std::fs::read(path) {
        Ok(bytes) => {
            debug!(path = %path.display(), bytes = bytes.len(), "Loaded background image");
            STANDARD.encode(bytes)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Background image not found");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(load_background(dir.path().join("fantasy.jpeg")), "");
    }

    #[test]
    fn test_existing_file_is_encoded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"dragon").unwrap();

        assert_eq!(load_background(file.path()), "ZHJhZ29u");
    }

    #[test]
    fn test_directory_returns_empty() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(load_background(dir.path()), "");
    }
}
