//! Conversions from browser `File` objects into host files.

use poster_host::{FileSource, IncomingFile};

/// Wraps a browser file without reading its contents.
pub fn incoming_file_from_web(file: web_sys::File) -> IncomingFile {
    IncomingFile {
        name: file.name(),
        mime_type: file.type_(),
        size: file.size().max(0.0) as u64,
        source: FileSource::Blob(file.into()),
    }
}

/// First file of a browser file list, if any.
pub fn first_file(files: Option<web_sys::FileList>) -> Option<IncomingFile> {
    files
        .and_then(|files| files.get(0))
        .map(incoming_file_from_web)
}
