use std::rc::Rc;

use poster_host::{
    CapabilityStatus, HostCapabilities, HostServices, HostStrategy, MemoryDialogService,
    MemoryLaunchQueue, MemoryLocationService, MemoryObjectUrlService,
};

use crate::{
    bridge, WebDialogService, WebLaunchQueueService, WebLocationService, WebObjectUrlService,
};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "host-stub")]
    {
        HostStrategy::Stub
    }

    #[cfg(not(feature = "host-stub"))]
    {
        HostStrategy::Browser
    }
}

fn status(available: bool) -> CapabilityStatus {
    if available {
        CapabilityStatus::Available
    } else {
        CapabilityStatus::Unavailable
    }
}

/// Checks the browser for the capabilities the shell relies on.
pub fn host_capabilities() -> HostCapabilities {
    match selected_host_strategy() {
        HostStrategy::Browser => HostCapabilities {
            object_urls: status(bridge::has_object_urls()),
            launch_queue: status(bridge::has_launch_queue()),
            dialogs: status(bridge::has_dialogs()),
        },
        HostStrategy::Stub => HostCapabilities::all(),
    }
}

/// Builds the host service bundle for the selected strategy.
pub fn build_host_services() -> HostServices {
    match selected_host_strategy() {
        HostStrategy::Browser => HostServices {
            strategy: HostStrategy::Browser,
            capabilities: host_capabilities(),
            object_urls: Rc::new(WebObjectUrlService),
            dialogs: Rc::new(WebDialogService),
            location: Rc::new(WebLocationService),
            launch_queue: Rc::new(WebLaunchQueueService),
        },
        HostStrategy::Stub => HostServices::memory(
            Rc::new(MemoryObjectUrlService::default()),
            Rc::new(MemoryDialogService::default()),
            Rc::new(MemoryLocationService::default()),
            Rc::new(MemoryLaunchQueue::default()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn service_bundle_follows_selected_strategy() {
        let services = build_host_services();
        assert_eq!(services.strategy, selected_host_strategy());
    }

    #[cfg(all(not(target_arch = "wasm32"), not(feature = "host-stub")))]
    #[test]
    fn native_browser_strategy_reports_unavailable_capabilities() {
        assert_eq!(
            host_capabilities(),
            HostCapabilities {
                object_urls: CapabilityStatus::Unavailable,
                launch_queue: CapabilityStatus::Unavailable,
                dialogs: CapabilityStatus::Unavailable,
            }
        );
    }
}
