use leptos::*;

use crate::{fade_style, merge_layout_class};

#[component]
/// Full-surface loading cover that fades out once `fading` turns on.
///
/// Removal is left to the caller, which unmounts the overlay after the fade.
pub fn LoadingOverlay(
    #[prop(optional, into)] fading: MaybeSignal<bool>,
    #[prop(default = 1000)] fade_ms: u32,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("loading-overlay", layout_class)
            style=move || fade_style(fading.get(), fade_ms)
            aria-hidden="true"
            data-ui-primitive="true"
            data-ui-kind="loading-overlay"
        >
            {children.map(|children| children())}
        </div>
    }
}

#[component]
/// Decorative overlay toggled on with a `show` class.
pub fn StateOverlay(
    #[prop(into)] show: MaybeSignal<bool>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] children: Option<Children>,
) -> impl IntoView {
    view! {
        <div
            class=move || {
                let class = merge_layout_class("state-overlay", layout_class);
                if show.get() { format!("{class} show") } else { class }
            }
            aria-hidden="true"
            data-ui-primitive="true"
            data-ui-kind="state-overlay"
        >
            {children.map(|children| children())}
        </div>
    }
}
