//! Blocking user dialog contracts and adapters.

use std::cell::RefCell;

/// Host service for blocking user-visible messages.
pub trait DialogService {
    /// Shows `message` and blocks until the user dismisses it.
    fn alert(&self, message: &str);
}

#[derive(Debug, Default)]
/// Dialog service that records every message instead of showing it.
pub struct MemoryDialogService {
    messages: RefCell<Vec<String>>,
}

impl MemoryDialogService {
    /// Messages shown so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl DialogService for MemoryDialogService {
    fn alert(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
