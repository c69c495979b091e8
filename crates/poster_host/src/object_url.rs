//! Object URL host-service contracts and memory adapter.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeSet,
};

use serde::{Deserialize, Serialize};

use crate::file::IncomingFile;

/// Short-lived URL resolving to an in-memory blob.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectUrl(pub String);

impl ObjectUrl {
    /// URL text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host service that mints and releases object URLs for incoming files.
pub trait ObjectUrlService {
    /// Creates a fresh object URL for `file`.
    fn create_object_url(&self, file: &IncomingFile) -> Result<ObjectUrl, String>;

    /// Releases an object URL. Revoking an unknown URL is a no-op.
    fn revoke_object_url(&self, url: &ObjectUrl);
}

#[derive(Debug, Default)]
/// In-memory object URL service issuing `blob:memory/<n>` URLs and tracking live ones.
pub struct MemoryObjectUrlService {
    next_id: Cell<u64>,
    live: RefCell<BTreeSet<ObjectUrl>>,
    revoked: RefCell<Vec<ObjectUrl>>,
}

impl MemoryObjectUrlService {
    /// URLs created and not yet revoked.
    pub fn live_urls(&self) -> Vec<ObjectUrl> {
        self.live.borrow().iter().cloned().collect()
    }

    /// URLs revoked so far, in order.
    pub fn revoked_urls(&self) -> Vec<ObjectUrl> {
        self.revoked.borrow().clone()
    }
}

impl ObjectUrlService for MemoryObjectUrlService {
    fn create_object_url(&self, _file: &IncomingFile) -> Result<ObjectUrl, String> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let url = ObjectUrl(format!("blob:memory/{id}"));
        self.live.borrow_mut().insert(url.clone());
        Ok(url)
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        if self.live.borrow_mut().remove(url) {
            self.revoked.borrow_mut().push(url.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn memory_service_issues_distinct_urls_and_tracks_revocation() {
        let service = MemoryObjectUrlService::default();
        let file = IncomingFile::from_bytes("a.png", "image/png", vec![0_u8]);

        let first = service.create_object_url(&file).expect("first url");
        let second = service.create_object_url(&file).expect("second url");
        assert_ne!(first, second);

        service.revoke_object_url(&first);
        service.revoke_object_url(&first);

        assert_eq!(service.live_urls(), vec![second]);
        assert_eq!(service.revoked_urls(), vec![first]);
    }
}
