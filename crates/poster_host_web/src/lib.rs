//! Browser (`wasm32`) implementations of [`poster_host`] service contracts and DOM bindings for
//! the poster custom elements.
//!
//! Transport calls go through `bridge::interop`, which routes to the wasm implementation in the
//! browser and to inert fallbacks on native targets so the crate still builds and tests there.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and the service bundle factory.
pub mod adapters;
mod bridge;
pub mod dialog;
pub mod display;
pub mod file;
pub mod launch;
pub mod location;
pub mod object_url;

pub use adapters::{build_host_services, host_capabilities, selected_host_strategy};
pub use dialog::WebDialogService;
pub use display::{
    js_error_message, DomEventListener, DomFilePicker, DomPanelToggle, DomPosterDisplay,
};
pub use file::{first_file, incoming_file_from_web};
pub use launch::{WebLaunchHandle, WebLaunchQueueService};
pub use location::WebLocationService;
pub use object_url::WebObjectUrlService;
