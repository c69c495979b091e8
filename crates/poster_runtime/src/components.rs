//! Shell UI composition: the `AppContainer` host element, its controls and overlays.

use std::rc::Rc;

use leptos::*;
use poster_host::monotonic_now_ms;
use poster_host_web::{
    first_file, DomEventListener, DomFilePicker, DomPanelToggle, DomPosterDisplay,
};
use poster_ui::{ActionButton, ButtonVariant, LoadingOverlay, SanjiLogo, StateOverlay};

use crate::{
    bridge::StoreBridge,
    criminal::{with_state_class, HOST_ACTIVE_CLASS},
    host::ShellHostContext,
    loading::OverlayPhase,
    reducer::ShellAction,
    session::ShellSession,
};

pub use crate::runtime_context::{use_shell_runtime, ShellProvider, ShellRuntimeContext};

/// Event the poster element fires once its artwork and fonts are ready.
const DISPLAY_LOADED_EVENT: &str = "WantedPosterLoaded";

/// `web_sys` views of elements handed over by `NodeRef::on_load`. Only wasm builds have a DOM
/// behind a Leptos element, so native builds see every node as unmounted.
#[cfg(target_arch = "wasm32")]
mod mounted {
    use leptos::{html, HtmlElement};

    pub(super) fn element(node: &HtmlElement<html::Custom>) -> Option<web_sys::Element> {
        let element: &web_sys::Element = node;
        Some(element.clone())
    }

    pub(super) fn input(node: &HtmlElement<html::Input>) -> Option<web_sys::HtmlInputElement> {
        let input: &web_sys::HtmlInputElement = node;
        Some(input.clone())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod mounted {
    use leptos::{html, HtmlElement};

    pub(super) fn element(_node: &HtmlElement<html::Custom>) -> Option<web_sys::Element> {
        None
    }

    pub(super) fn input(_node: &HtmlElement<html::Input>) -> Option<web_sys::HtmlInputElement> {
        None
    }
}

fn host_class(drag_active: bool, criminal_active: bool) -> String {
    let class = with_state_class("app-container", "dragin", drag_active);
    with_state_class(&class, HOST_ACTIVE_CLASS, criminal_active)
}

fn dispatch_on_click(
    runtime: ShellRuntimeContext,
    action: ShellAction,
) -> Callback<ev::MouseEvent> {
    Callback::new(move |_| runtime.dispatch_action(action.clone()))
}

fn clamp_fade_ms(fade_ms: u64) -> u32 {
    u32::try_from(fade_ms).unwrap_or(u32::MAX)
}

#[component]
/// Renders the poster shell and wires its DOM events into the shell reducer.
pub fn AppContainer() -> impl IntoView {
    let runtime = use_shell_runtime();
    let state = runtime.state;
    let config = runtime.config.get_value();
    let criminal_enabled = config.criminal.is_some();
    let show_poster_switch = config.show_poster_switch;
    let photo_key = config.photo_key;
    let fade_ms = clamp_fade_ms(config.fade_ms);

    let session = store_value(ShellSession::new());
    let loaded_listener = store_value(None::<DomEventListener>);

    let poster_ref = create_node_ref::<html::Custom>();
    let edit_panel_ref = create_node_ref::<html::Custom>();
    let tips_dialog_ref = create_node_ref::<html::Custom>();
    let upload_ref = create_node_ref::<html::Input>();

    poster_ref.on_load(move |poster| {
        let Some(element) = mounted::element(&poster) else {
            logging::error!("<wanted-poster> is not mounted; the shell stays detached");
            return;
        };
        let display = Rc::new(DomPosterDisplay::new(element.clone()));
        runtime
            .host
            .with_value(|host| host.bind_display(display.clone()));

        let store = runtime.host.with_value(ShellHostContext::store);
        let bridge = StoreBridge::new(photo_key, display);
        if let Some(Err(err)) = session.try_update_value(|session| session.start(&store, bridge)) {
            logging::error!("shell session did not start: {err}");
            return;
        }

        match DomEventListener::listen(&element, DISPLAY_LOADED_EVENT, move |_| {
            runtime.try_dispatch_action(ShellAction::DisplayLoaded {
                now_ms: monotonic_now_ms(),
            });
        }) {
            Ok(listener) => loaded_listener.set_value(Some(listener)),
            Err(err) => logging::error!("poster load listener failed: {err}"),
        }

        runtime.dispatch_action(ShellAction::Attached {
            now_ms: monotonic_now_ms(),
            hash: runtime.host.with_value(ShellHostContext::location_hash),
        });
    });

    edit_panel_ref.on_load(move |panel| match mounted::element(&panel) {
        Some(element) => {
            let panel = Rc::new(DomPanelToggle::new(element));
            runtime.host.with_value(|host| host.bind_edit_panel(panel));
        }
        None => logging::error!("<edit-panel> is not mounted; edit clicks do nothing"),
    });

    tips_dialog_ref.on_load(move |dialog| match mounted::element(&dialog) {
        Some(element) => {
            let dialog = Rc::new(DomPanelToggle::new(element));
            runtime.host.with_value(|host| host.bind_tips_dialog(dialog));
        }
        None => logging::error!("<tips-dialog> is not mounted; tips clicks do nothing"),
    });

    upload_ref.on_load(move |input| match mounted::input(&input) {
        Some(input) => {
            let picker = Rc::new(DomFilePicker::new(input));
            runtime.host.with_value(|host| host.bind_file_picker(picker));
        }
        None => logging::error!("upload input is not mounted; import clicks do nothing"),
    });

    if criminal_enabled {
        let hash_listener = window_event_listener(ev::hashchange, move |_| {
            runtime.dispatch_action(ShellAction::HashChanged {
                hash: runtime.host.with_value(ShellHostContext::location_hash),
            });
        });
        on_cleanup(move || hash_listener.remove());
    }

    on_cleanup(move || {
        session.try_update_value(ShellSession::stop);
        let _ = loaded_listener.try_update_value(Option::take);
        runtime.try_dispatch_action(ShellAction::Detached);
    });

    let overlay_phase = Signal::derive(move || state.with(|shell| shell.loading.phase()));
    let criminal_active = Signal::derive(move || state.with(|shell| shell.criminal_active));

    view! {
        <div
            class=move || state.with(|shell| host_class(shell.drag_active, shell.criminal_active))
            data-ui-kind="app-container"
            data-ui-variant=config.variant.id()
            on:dragover=move |ev| ev.prevent_default()
            on:dragenter=move |_| runtime.dispatch_action(ShellAction::DragEnter)
            on:dragleave=move |ev| {
                runtime.dispatch_action(ShellAction::DragLeave {
                    related_target_is_null: ev.related_target().is_none(),
                });
            }
            on:drop=move |ev| {
                ev.prevent_default();
                let file = first_file(ev.data_transfer().and_then(|transfer| transfer.files()));
                runtime.dispatch_action(ShellAction::Drop { file });
            }
        >
            <wanted-poster node_ref=poster_ref></wanted-poster>
            <edit-panel node_ref=edit_panel_ref></edit-panel>
            <tips-dialog node_ref=tips_dialog_ref></tips-dialog>

            <input
                id="uploadInput"
                type="file"
                accept="image/*"
                hidden=true
                node_ref=upload_ref
                on:input=move |ev| {
                    let input = event_target::<web_sys::HtmlInputElement>(&ev);
                    runtime.dispatch_action(ShellAction::FileSelected {
                        file: first_file(input.files()),
                    });
                }
            />

            <div class="toolbar" data-ui-slot="toolbar">
                <ActionButton
                    id="editButton"
                    on_click=dispatch_on_click(runtime, ShellAction::EditClicked)
                >
                    "Edit"
                </ActionButton>
                <ActionButton
                    id="importButton"
                    on_click=dispatch_on_click(runtime, ShellAction::ImportClicked)
                >
                    "Import"
                </ActionButton>
                <ActionButton
                    id="exportButton"
                    loading=Signal::derive(move || state.with(|shell| shell.export_loading()))
                    on_click=dispatch_on_click(runtime, ShellAction::ExportClicked)
                >
                    "Export"
                </ActionButton>
                <Show when=move || show_poster_switch fallback=|| ()>
                    <ActionButton
                        id="posterButton"
                        on_click=dispatch_on_click(runtime, ShellAction::PosterClicked)
                    >
                        "Poster"
                    </ActionButton>
                </Show>
            </div>

            <ActionButton
                variant=ButtonVariant::Round
                id="tipsButton"
                title="Tips"
                on_click=dispatch_on_click(runtime, ShellAction::TipsClicked)
            >
                "?"
            </ActionButton>

            <Show when=move || criminal_enabled fallback=|| ()>
                <ActionButton
                    variant=ButtonVariant::Round
                    id="criminalButton"
                    title="Criminal"
                    hidden=Signal::derive(move || !state.with(|shell| shell.criminal_revealed))
                    active=criminal_active
                    on_click=Callback::new(move |_| {
                        runtime.dispatch_action(ShellAction::CriminalButtonClicked {
                            current_hash: runtime.host.with_value(ShellHostContext::location_hash),
                        });
                    })
                >
                    "☠"
                </ActionButton>
                <StateOverlay show=criminal_active layout_class="criminal-overlay">
                    <SanjiLogo />
                </StateOverlay>
            </Show>

            <Show when=move || overlay_phase.get() != OverlayPhase::Removed fallback=|| ()>
                <LoadingOverlay
                    fading=Signal::derive(move || overlay_phase.get() == OverlayPhase::Fading)
                    fade_ms=fade_ms
                />
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn host_class_carries_drag_and_criminal_state() {
        assert_eq!(host_class(false, false), "app-container");
        assert_eq!(host_class(true, false), "app-container dragin");
        assert_eq!(host_class(true, true), "app-container dragin criminal");
    }

    #[test]
    fn fade_duration_saturates() {
        assert_eq!(clamp_fade_ms(1_000), 1_000);
        assert_eq!(clamp_fade_ms(u64::MAX), u32::MAX);
    }
}
