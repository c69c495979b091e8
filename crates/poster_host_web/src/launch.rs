//! Browser file-launch adapter backed by `window.launchQueue`.

use js_sys::{Function, Promise, Reflect};
use poster_host::{IncomingFile, LaunchConsumer, LaunchFuture, LaunchHandle, LaunchQueueService};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::{bridge, display::js_error_message, file::incoming_file_from_web};

#[derive(Debug, Clone, Copy, Default)]
/// Launch queue service backed by the File Handling API.
pub struct WebLaunchQueueService;

impl LaunchQueueService for WebLaunchQueueService {
    fn set_consumer(&self, consumer: LaunchConsumer) -> bool {
        bridge::install_launch_consumer(consumer)
    }
}

#[derive(Debug, Clone)]
/// `FileSystemHandle` delivered through the launch queue.
pub struct WebLaunchHandle {
    handle: JsValue,
}

impl WebLaunchHandle {
    /// Wraps a raw handle value.
    pub fn new(handle: JsValue) -> Self {
        Self { handle }
    }

    async fn read_file(&self) -> Result<IncomingFile, String> {
        let get_file = Reflect::get(&self.handle, &JsValue::from_str("getFile"))
            .map_err(js_error_message)?
            .dyn_into::<Function>()
            .map_err(|_| "launch handle has no getFile method".to_string())?;
        let promise = get_file
            .call0(&self.handle)
            .map_err(js_error_message)?
            .dyn_into::<Promise>()
            .map_err(|_| "getFile did not return a promise".to_string())?;
        let file = JsFuture::from(promise)
            .await
            .map_err(js_error_message)?
            .dyn_into::<web_sys::File>()
            .map_err(|_| "getFile did not resolve to a file".to_string())?;
        Ok(incoming_file_from_web(file))
    }
}

impl LaunchHandle for WebLaunchHandle {
    fn is_file_handle(&self) -> bool {
        Reflect::get(&self.handle, &JsValue::from_str("kind"))
            .ok()
            .and_then(|kind| kind.as_string())
            .is_some_and(|kind| kind == "file")
    }

    fn get_file(&self) -> LaunchFuture<'_, Result<IncomingFile, String>> {
        Box::pin(self.read_file())
    }
}
