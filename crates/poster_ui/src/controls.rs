use leptos::ev::MouseEvent;
use leptos::*;

use crate::{bool_token, merge_layout_class};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Visual weight of an [`ActionButton`].
pub enum ButtonVariant {
    /// Poster-styled toolbar button.
    #[default]
    Poster,
    /// Small round icon-like button (tips, criminal trigger).
    Round,
}

impl ButtonVariant {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Poster => "poster",
            Self::Round => "round",
        }
    }
}

#[component]
/// Toolbar button with loading and active states.
///
/// While `loading` is set the button carries a `loading` attribute and `aria-busy`; it stays
/// clickable so guard logic lives with the caller.
pub fn ActionButton(
    #[prop(default = ButtonVariant::Poster)] variant: ButtonVariant,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] title: MaybeSignal<String>,
    #[prop(optional, into)] loading: MaybeSignal<bool>,
    #[prop(optional, into)] active: MaybeSignal<bool>,
    #[prop(optional, into)] hidden: MaybeSignal<bool>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class=move || {
                let class = merge_layout_class("ui-action-button", layout_class);
                if active.get() { format!("{class} active") } else { class }
            }
            id=id
            title=move || title.get()
            hidden=move || hidden.get()
            loading=move || loading.get().then_some("")
            aria-busy=move || bool_token(loading.get())
            data-ui-primitive="true"
            data-ui-kind="action-button"
            data-ui-variant=variant.token()
            data-ui-loading=move || bool_token(loading.get())
            on:click=move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            }
        >
            {children()}
        </button>
    }
}
