//! Validation for files arriving through drop, the picker, or OS launch.

use leptos::logging;
use poster_host::IncomingFile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IngestSource {
    Drop,
    Picker,
    Launch,
}

impl IngestSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::Picker => "picker",
            Self::Launch => "launch",
        }
    }

    /// Launched files were already filtered by the OS file-handler registration.
    const fn checks_media_type(self) -> bool {
        !matches!(self, Self::Launch)
    }
}

/// Returns the file when it may become the poster photo. Rejections are silent apart from a
/// debug log line.
pub fn accept_file(source: IngestSource, file: Option<IncomingFile>) -> Option<IncomingFile> {
    let Some(file) = file else {
        logging::debug_warn!("{} ingestion: no file", source.as_str());
        return None;
    };
    if source.checks_media_type() && !file.is_image() {
        logging::debug_warn!(
            "{} ingestion: rejected `{}` ({} bytes) with media type `{}`",
            source.as_str(),
            file.name,
            file.size,
            file.mime_type
        );
        return None;
    }
    Some(file)
}
