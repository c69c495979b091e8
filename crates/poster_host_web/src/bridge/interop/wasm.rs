use std::rc::Rc;

use js_sys::{Array, Function, Reflect, Uint8Array};
use poster_host::{FileSource, LaunchHandle};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

use super::*;
use crate::launch::WebLaunchHandle;

fn launch_queue() -> Option<JsValue> {
    let window = web_sys::window()?;
    Reflect::get(&window, &JsValue::from_str("launchQueue"))
        .ok()
        .filter(|queue| !queue.is_undefined() && !queue.is_null())
}

pub fn has_object_urls() -> bool {
    true
}

pub fn create_object_url(file: &IncomingFile) -> Result<String, String> {
    let blob = match &file.source {
        FileSource::Blob(blob) => blob.clone(),
        FileSource::Memory(bytes) => {
            let parts = Array::of1(&Uint8Array::from(bytes.as_ref()));
            let options = web_sys::BlobPropertyBag::new();
            options.set_type(&file.mime_type);
            web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
                .map_err(|err| format!("failed to build blob: {err:?}"))?
        }
    };
    web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|err| format!("failed to create object URL: {err:?}"))
}

pub fn revoke_object_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}

pub fn has_dialogs() -> bool {
    web_sys::window().is_some()
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn location_hash() -> String {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .unwrap_or_default()
}

pub fn set_location_hash(hash: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_hash(hash);
    }
}

pub fn has_launch_queue() -> bool {
    launch_queue().is_some()
}

pub fn install_launch_consumer(consumer: LaunchConsumer) -> bool {
    let Some(queue) = launch_queue() else {
        return false;
    };
    let Some(set_consumer) = Reflect::get(&queue, &JsValue::from_str("setConsumer"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
    else {
        return false;
    };

    let on_launch = Closure::<dyn FnMut(JsValue)>::new(move |params: JsValue| {
        let files = Reflect::get(&params, &JsValue::from_str("files"))
            .ok()
            .and_then(|value| value.dyn_into::<Array>().ok())
            .unwrap_or_else(Array::new);
        let handles = files
            .iter()
            .map(|handle| Rc::new(WebLaunchHandle::new(handle)) as Rc<dyn LaunchHandle>)
            .collect();
        consumer(handles);
    });
    let installed = set_consumer
        .call1(&queue, on_launch.as_ref().unchecked_ref())
        .is_ok();
    // The launch queue holds the consumer for the lifetime of the page.
    on_launch.forget();
    installed
}
