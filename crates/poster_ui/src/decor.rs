use leptos::*;

use crate::merge_layout_class;

#[component]
/// Decorative Sanji logo. Purely presentational.
pub fn SanjiLogo(
    #[prop(default = "/images/sanji-logo.svg")] src: &'static str,
    #[prop(optional)] layout_class: Option<&'static str>,
) -> impl IntoView {
    view! {
        <span
            class=merge_layout_class("sanji-logo", layout_class)
            aria-hidden="true"
            data-ui-primitive="true"
            data-ui-kind="logo"
        >
            <img src=src alt="" draggable="false"/>
        </span>
    }
}
