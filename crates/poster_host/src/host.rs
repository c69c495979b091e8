//! Host strategy selection and the bundle of services injected into the shell runtime.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::{
    dialog::{DialogService, MemoryDialogService},
    launch::{LaunchQueueService, MemoryLaunchQueue},
    location::{LocationService, MemoryLocationService},
    object_url::{MemoryObjectUrlService, ObjectUrlService},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Which family of adapters backs the host services.
pub enum HostStrategy {
    /// Real browser APIs.
    Browser,
    /// In-memory adapters.
    Stub,
}

impl HostStrategy {
    /// Stable lowercase name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Stub => "stub",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Availability of one host capability.
pub enum CapabilityStatus {
    /// Backed by a working implementation.
    Available,
    /// Not present in this environment.
    Unavailable,
}

impl CapabilityStatus {
    /// Whether the capability is available.
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Capability snapshot for the active host.
pub struct HostCapabilities {
    /// Object URL creation for incoming files.
    pub object_urls: CapabilityStatus,
    /// OS file-launch delivery.
    pub launch_queue: CapabilityStatus,
    /// Blocking alert dialog.
    pub dialogs: CapabilityStatus,
}

impl HostCapabilities {
    /// Capabilities of a host where every service works.
    pub const fn all() -> Self {
        Self {
            object_urls: CapabilityStatus::Available,
            launch_queue: CapabilityStatus::Available,
            dialogs: CapabilityStatus::Available,
        }
    }
}

#[derive(Clone)]
/// Bundle of host services injected into the shell runtime.
pub struct HostServices {
    /// Strategy that produced this bundle.
    pub strategy: HostStrategy,
    /// Capability snapshot.
    pub capabilities: HostCapabilities,
    /// Object URL service.
    pub object_urls: Rc<dyn ObjectUrlService>,
    /// Blocking dialog service.
    pub dialogs: Rc<dyn DialogService>,
    /// Location fragment service.
    pub location: Rc<dyn LocationService>,
    /// File-launch queue.
    pub launch_queue: Rc<dyn LaunchQueueService>,
}

impl HostServices {
    /// Bundle backed by the given in-memory adapters, so tests can keep handles to inspect them.
    pub fn memory(
        object_urls: Rc<MemoryObjectUrlService>,
        dialogs: Rc<MemoryDialogService>,
        location: Rc<MemoryLocationService>,
        launch_queue: Rc<MemoryLaunchQueue>,
    ) -> Self {
        Self {
            strategy: HostStrategy::Stub,
            capabilities: HostCapabilities::all(),
            object_urls,
            dialogs,
            location,
            launch_queue,
        }
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("strategy", &self.strategy)
            .field("capabilities", &self.capabilities)
            .finish_non_exhaustive()
    }
}
