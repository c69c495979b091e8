//! Location hash contracts and adapters.

use std::cell::RefCell;

/// Host service for the page location fragment.
pub trait LocationService {
    /// Current fragment including the leading `#`, or empty.
    fn hash(&self) -> String;

    /// Replaces the fragment. Hosts fire their hash-change notification as a result.
    fn set_hash(&self, hash: &str);
}

#[derive(Debug, Default)]
/// In-memory location that normalizes fragments the way browsers report them.
pub struct MemoryLocationService {
    hash: RefCell<String>,
}

impl LocationService for MemoryLocationService {
    fn hash(&self) -> String {
        self.hash.borrow().clone()
    }

    fn set_hash(&self, hash: &str) {
        let trimmed = hash.trim_start_matches('#');
        *self.hash.borrow_mut() = if trimmed.is_empty() {
            String::new()
        } else {
            format!("#{trimmed}")
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_location_reports_browser_style_fragments() {
        let location = MemoryLocationService::default();
        location.set_hash("criminal");
        assert_eq!(location.hash(), "#criminal");
        location.set_hash("#");
        assert_eq!(location.hash(), "");
    }
}
