//! Leptos primitives for the wanted-poster shell.
//!
//! Components emit the stable `data-ui-*` DOM contract the shell stylesheet targets, so state
//! such as loading or active styling is driven by attributes instead of ad hoc classes.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod controls;
mod decor;
mod overlays;

pub use controls::{ActionButton, ButtonVariant};
pub use decor::SanjiLogo;
pub use overlays::{LoadingOverlay, StateOverlay};

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Inline style for an element fading out over `fade_ms`.
pub fn fade_style(fading: bool, fade_ms: u32) -> String {
    if fading {
        format!("transition: opacity {fade_ms}ms; opacity: 0;")
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_class_is_appended_when_present() {
        assert_eq!(merge_layout_class("ui-action-button", None), "ui-action-button");
        assert_eq!(merge_layout_class("ui-action-button", Some("")), "ui-action-button");
        assert_eq!(
            merge_layout_class("ui-action-button", Some("toolbar-slot")),
            "ui-action-button toolbar-slot"
        );
    }

    #[test]
    fn fade_style_only_applies_while_fading() {
        assert_eq!(fade_style(false, 1000), "");
        assert_eq!(fade_style(true, 1000), "transition: opacity 1000ms; opacity: 0;");
    }
}
