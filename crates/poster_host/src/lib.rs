//! Typed host-service contracts and in-memory adapters used by the poster shell runtime.
//!
//! This crate is the boundary between the shell and the page environment: object URLs, blocking
//! dialogs, the location hash, OS file-launch delivery, and the files that flow through them.
//! Browser adapters live in `poster_host_web`; the memory adapters here back tests and non-wasm
//! builds.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod dialog;
pub mod file;
pub mod host;
pub mod launch;
pub mod location;
pub mod object_url;
pub mod time;

pub use dialog::{DialogService, MemoryDialogService};
pub use file::{FileSource, IncomingFile};
pub use host::{CapabilityStatus, HostCapabilities, HostServices, HostStrategy};
pub use launch::{
    first_launched_file, LaunchConsumer, LaunchFuture, LaunchHandle, LaunchQueueService,
    MemoryLaunchHandle, MemoryLaunchQueue,
};
pub use location::{LocationService, MemoryLocationService};
pub use object_url::{MemoryObjectUrlService, ObjectUrl, ObjectUrlService};
pub use time::{elapsed_ms, monotonic_now_ms};
