//! Browser object URL adapter.

use poster_host::{IncomingFile, ObjectUrl, ObjectUrlService};

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Object URL service backed by `URL.createObjectURL` / `URL.revokeObjectURL`.
pub struct WebObjectUrlService;

impl ObjectUrlService for WebObjectUrlService {
    fn create_object_url(&self, file: &IncomingFile) -> Result<ObjectUrl, String> {
        bridge::create_object_url(file).map(ObjectUrl)
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        bridge::revoke_object_url(url.as_str());
    }
}
