use poster_host::ObjectUrl;
use serde::{Deserialize, Serialize};

use crate::{config::ShellConfig, loading::LoadingGate, session::SessionPhase};

/// Reducer-owned view state of one shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellState {
    pub lifecycle: SessionPhase,
    pub loading: LoadingGate,
    /// Drop-target highlight (`dragin` class).
    pub drag_active: bool,
    pub exports_in_flight: u32,
    /// Object URL last written to the photo key by this shell.
    pub current_object_url: Option<ObjectUrl>,
    pub criminal_active: bool,
    pub criminal_revealed: bool,
}

impl ShellState {
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            lifecycle: SessionPhase::Unattached,
            loading: LoadingGate::new(config.min_loading_ms, config.fade_ms),
            drag_active: false,
            exports_in_flight: 0,
            current_object_url: None,
            criminal_active: false,
            criminal_revealed: false,
        }
    }

    pub fn is_attached(&self) -> bool {
        self.lifecycle == SessionPhase::Attached
    }

    /// Drives the export button's `loading` attribute.
    pub fn export_loading(&self) -> bool {
        self.exports_in_flight > 0
    }
}
