//! Browser dialog adapter.

use poster_host::DialogService;

use crate::bridge;

#[derive(Debug, Clone, Copy, Default)]
/// Dialog service backed by `window.alert`.
pub struct WebDialogService;

impl DialogService for WebDialogService {
    fn alert(&self, message: &str) {
        bridge::alert(message);
    }
}
