//! DOM bindings for the `<wanted-poster>` and panel custom elements.

use js_sys::{Array, Function, Promise, Reflect};
use poster_contract::{FilePicker, PanelToggle, PosterAttribute, PosterDisplay, PosterFuture};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// A value thrown or rejected by page script.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Thrown {
    /// An `Error` instance and its message.
    Error(String),
    /// Anything else: a string, a number, `undefined`.
    Other,
}

impl Thrown {
    fn classify(err: &JsValue) -> Self {
        match err.dyn_ref::<js_sys::Error>() {
            Some(error) => Self::Error(String::from(error.message())),
            None => Self::Other,
        }
    }

    fn into_message(self) -> String {
        match self {
            Self::Error(message) => message,
            Self::Other => String::new(),
        }
    }
}

/// Message carried by a thrown JS value: `Error.message`, or empty for anything that is not an
/// `Error`.
pub fn js_error_message(err: JsValue) -> String {
    Thrown::classify(&err).into_message()
}

fn call_method(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, String> {
    let method = Reflect::get(target, &JsValue::from_str(name))
        .map_err(js_error_message)?
        .dyn_into::<Function>()
        .map_err(|_| format!("element has no `{name}` method"))?;
    let args = args.iter().collect::<Array>();
    Reflect::apply(&method, target, &args).map_err(js_error_message)
}

#[derive(Debug, Clone)]
/// [`PosterDisplay`] backed by a mounted `<wanted-poster>` element.
pub struct DomPosterDisplay {
    element: web_sys::Element,
}

impl DomPosterDisplay {
    /// Binds to a mounted element.
    pub fn new(element: web_sys::Element) -> Self {
        Self { element }
    }
}

impl PosterDisplay for DomPosterDisplay {
    fn set_attribute(&self, attribute: PosterAttribute, value: &str) {
        let _ = self.element.set_attribute(attribute.attribute_name(), value);
    }

    fn export(&self) -> PosterFuture<'_, Result<(), String>> {
        Box::pin(async move {
            let returned = call_method(&self.element, "export", &[])?;
            if let Ok(promise) = returned.dyn_into::<Promise>() {
                JsFuture::from(promise).await.map_err(js_error_message)?;
            }
            Ok(())
        })
    }

    fn change_poster(&self) {
        let _ = call_method(&self.element, "changePoster", &[]);
    }
}

#[derive(Debug, Clone)]
/// [`PanelToggle`] backed by an element exposing `toggle(force?)`.
pub struct DomPanelToggle {
    element: web_sys::Element,
}

impl DomPanelToggle {
    /// Binds to a mounted element.
    pub fn new(element: web_sys::Element) -> Self {
        Self { element }
    }
}

impl PanelToggle for DomPanelToggle {
    fn toggle(&self, force: Option<bool>) {
        let args = force.map(JsValue::from_bool).into_iter().collect::<Vec<_>>();
        let _ = call_method(&self.element, "toggle", &args);
    }
}

#[derive(Debug, Clone)]
/// [`FilePicker`] backed by a hidden `<input type="file">`.
pub struct DomFilePicker {
    input: web_sys::HtmlInputElement,
}

impl DomFilePicker {
    /// Binds to a mounted input.
    pub fn new(input: web_sys::HtmlInputElement) -> Self {
        Self { input }
    }
}

impl FilePicker for DomFilePicker {
    fn reset_and_open(&self) {
        self.input.set_value("");
        self.input.click();
    }
}

/// Event listener registration removed from its target on drop.
pub struct DomEventListener {
    target: web_sys::EventTarget,
    event: &'static str,
    handler: Closure<dyn FnMut(web_sys::Event)>,
}

impl DomEventListener {
    /// Adds `handler` for `event` on `target`.
    pub fn listen(
        target: &web_sys::EventTarget,
        event: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Result<Self, String> {
        let handler = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        target
            .add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())
            .map_err(js_error_message)?;
        Ok(Self {
            target: target.clone(),
            event,
            handler,
        })
    }
}

impl Drop for DomEventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.handler.as_ref().unchecked_ref());
    }
}

impl std::fmt::Debug for DomEventListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomEventListener")
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn only_error_instances_carry_a_message() {
        assert_eq!(
            Thrown::Error("canvas tainted".to_string()).into_message(),
            "canvas tainted"
        );
        assert_eq!(Thrown::Other.into_message(), "");
    }
}
