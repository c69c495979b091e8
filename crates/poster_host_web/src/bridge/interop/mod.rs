//! Shared transport interop for the browser bridge.
//!
//! Routes calls to target-specific implementations while keeping one API for the adapters.

use poster_host::{IncomingFile, LaunchConsumer};

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

pub fn has_object_urls() -> bool {
    imp::has_object_urls()
}

pub fn create_object_url(file: &IncomingFile) -> Result<String, String> {
    imp::create_object_url(file)
}

pub fn revoke_object_url(url: &str) {
    imp::revoke_object_url(url)
}

pub fn has_dialogs() -> bool {
    imp::has_dialogs()
}

pub fn alert(message: &str) {
    imp::alert(message)
}

pub fn location_hash() -> String {
    imp::location_hash()
}

pub fn set_location_hash(hash: &str) {
    imp::set_location_hash(hash)
}

pub fn has_launch_queue() -> bool {
    imp::has_launch_queue()
}

pub fn install_launch_consumer(consumer: LaunchConsumer) -> bool {
    imp::install_launch_consumer(consumer)
}
