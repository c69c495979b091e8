//! Files handed to the shell by drag-drop, the file picker, or OS file launch.

use std::rc::Rc;

/// Backing bytes of an [`IncomingFile`].
#[derive(Debug, Clone, PartialEq)]
pub enum FileSource {
    /// Browser blob (a `File` is a `Blob`).
    Blob(web_sys::Blob),
    /// In-memory bytes, used by tests and non-browser hosts.
    Memory(Rc<[u8]>),
}

/// A file offered to the shell, before any validation.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingFile {
    /// File name as reported by the source (may be empty for launched blobs).
    pub name: String,
    /// Declared media type, e.g. `image/png`. Empty when the source declared none.
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
    /// Backing bytes.
    pub source: FileSource,
}

impl IncomingFile {
    /// Builds an in-memory file.
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Rc<[u8]>>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    /// Whether the declared media type is an image type.
    pub fn is_image(&self) -> bool {
        is_image_media_type(&self.mime_type)
    }
}

/// Returns whether a declared media type names an image.
///
/// Only the prefix is checked, so `image/png`, `image/svg+xml` and a bare `image` all pass.
fn is_image_media_type(mime_type: &str) -> bool {
    mime_type.starts_with("image")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_media_type_check_uses_prefix() {
        assert!(is_image_media_type("image/png"));
        assert!(is_image_media_type("image/svg+xml"));
        assert!(!is_image_media_type("text/plain"));
        assert!(!is_image_media_type(""));
        assert!(!is_image_media_type("video/mp4"));
    }

    #[test]
    fn from_bytes_reports_size() {
        let file = IncomingFile::from_bytes("luffy.png", "image/png", vec![1_u8, 2, 3]);
        assert_eq!(file.size, 3);
        assert!(file.is_image());
    }
}
