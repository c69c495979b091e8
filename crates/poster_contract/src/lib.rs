//! Typed contracts for the collaborators the poster shell drives but does not implement.
//!
//! The poster renderer (`<wanted-poster>`), the edit panel and the tips dialog are pre-built
//! custom elements. The shell only reaches them through [`PosterDisplay`] and [`PanelToggle`];
//! DOM-backed adapters live in `poster_host_web`, and the recording adapters here back tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, VecDeque},
    future::Future,
    pin::Pin,
};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by collaborator contracts.
pub type PosterFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Presentation attributes understood by the poster display element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PosterAttribute {
    /// Photo object URL (classic poster).
    PhotoUrl,
    /// Avatar object URL (criminal poster).
    AvatarUrl,
    /// Wanted name text.
    Name,
    /// Bounty text.
    Bounty,
    /// Letter spacing applied to the name.
    NameSpacing,
    /// Letter spacing applied to the bounty.
    BountySpacing,
    /// Shadow strength applied to the photo.
    Shadow,
    /// CSS filter applied to the photo.
    Filter,
}

impl PosterAttribute {
    /// DOM attribute name set on the display element.
    pub const fn attribute_name(self) -> &'static str {
        match self {
            Self::PhotoUrl => "photo-url",
            Self::AvatarUrl => "avatar-url",
            Self::Name => "name",
            Self::Bounty => "bounty",
            Self::NameSpacing => "name-spacing",
            Self::BountySpacing => "bounty-spacing",
            Self::Shadow => "shadow",
            Self::Filter => "filter",
        }
    }
}

/// Display component that renders and exports the composed poster.
pub trait PosterDisplay {
    /// Sets one presentation attribute.
    fn set_attribute(&self, attribute: PosterAttribute, value: &str);

    /// Renders the poster and triggers the download.
    ///
    /// The error carries the user-facing failure message, empty when the failure had none.
    fn export(&self) -> PosterFuture<'_, Result<(), String>>;

    /// Switches to the next poster design.
    fn change_poster(&self);
}

/// Toggleable panel collaborator (edit panel, tips dialog).
pub trait PanelToggle {
    /// Toggles visibility, or forces it when `force` is set.
    fn toggle(&self, force: Option<bool>);
}

/// Hidden upload control that opens the platform file picker.
pub trait FilePicker {
    /// Clears the previous selection and opens the picker, so picking the same file again still
    /// reports a change.
    fn reset_and_open(&self);
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op display used when the display element could not be resolved.
pub struct NoopPosterDisplay;

impl PosterDisplay for NoopPosterDisplay {
    fn set_attribute(&self, _attribute: PosterAttribute, _value: &str) {}

    fn export(&self) -> PosterFuture<'_, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn change_poster(&self) {}
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op panel used when a panel element could not be resolved.
pub struct NoopPanelToggle;

impl PanelToggle for NoopPanelToggle {
    fn toggle(&self, _force: Option<bool>) {}
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op picker used when the upload control could not be resolved.
pub struct NoopFilePicker;

impl FilePicker for NoopFilePicker {
    fn reset_and_open(&self) {}
}

#[derive(Debug, Default)]
/// In-memory display that records every call.
///
/// Export outcomes are taken from a queue filled with [`RecordingPosterDisplay::push_export_outcome`];
/// an empty queue means success.
pub struct RecordingPosterDisplay {
    attributes: RefCell<BTreeMap<PosterAttribute, String>>,
    writes: RefCell<Vec<(PosterAttribute, String)>>,
    export_outcomes: RefCell<VecDeque<Result<(), String>>>,
    export_calls: Cell<usize>,
    poster_changes: Cell<usize>,
}

impl RecordingPosterDisplay {
    /// Current value of an attribute, if it was ever set.
    pub fn attribute(&self, attribute: PosterAttribute) -> Option<String> {
        self.attributes.borrow().get(&attribute).cloned()
    }

    /// Every attribute write in call order.
    pub fn writes(&self) -> Vec<(PosterAttribute, String)> {
        self.writes.borrow().clone()
    }

    /// Number of attribute writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }

    /// Queues the result returned by the next [`PosterDisplay::export`] call.
    pub fn push_export_outcome(&self, outcome: Result<(), String>) {
        self.export_outcomes.borrow_mut().push_back(outcome);
    }

    /// Number of export calls so far.
    pub fn export_calls(&self) -> usize {
        self.export_calls.get()
    }

    /// Number of poster switches so far.
    pub fn poster_changes(&self) -> usize {
        self.poster_changes.get()
    }
}

impl PosterDisplay for RecordingPosterDisplay {
    fn set_attribute(&self, attribute: PosterAttribute, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(attribute, value.to_string());
        self.writes
            .borrow_mut()
            .push((attribute, value.to_string()));
    }

    fn export(&self) -> PosterFuture<'_, Result<(), String>> {
        self.export_calls.set(self.export_calls.get() + 1);
        let outcome = self.export_outcomes.borrow_mut().pop_front().unwrap_or(Ok(()));
        Box::pin(async move { outcome })
    }

    fn change_poster(&self) {
        self.poster_changes.set(self.poster_changes.get() + 1);
    }
}

#[derive(Debug, Default)]
/// In-memory panel that records toggle calls.
pub struct RecordingPanelToggle {
    calls: RefCell<Vec<Option<bool>>>,
}

impl RecordingPanelToggle {
    /// Recorded `force` arguments in call order.
    pub fn calls(&self) -> Vec<Option<bool>> {
        self.calls.borrow().clone()
    }
}

impl PanelToggle for RecordingPanelToggle {
    fn toggle(&self, force: Option<bool>) {
        self.calls.borrow_mut().push(force);
    }
}

#[derive(Debug, Default)]
/// In-memory picker that counts how often it was opened.
pub struct RecordingFilePicker {
    opens: Cell<usize>,
}

impl RecordingFilePicker {
    /// Number of times the picker was opened.
    pub fn opens(&self) -> usize {
        self.opens.get()
    }
}

impl FilePicker for RecordingFilePicker {
    fn reset_and_open(&self) {
        self.opens.set(self.opens.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    const ATTRIBUTES: [PosterAttribute; 8] = [
        PosterAttribute::PhotoUrl,
        PosterAttribute::AvatarUrl,
        PosterAttribute::Name,
        PosterAttribute::Bounty,
        PosterAttribute::NameSpacing,
        PosterAttribute::BountySpacing,
        PosterAttribute::Shadow,
        PosterAttribute::Filter,
    ];

    #[test]
    fn attribute_names_match_display_element_contract() {
        let names: Vec<_> = ATTRIBUTES
            .iter()
            .map(|attribute| attribute.attribute_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "photo-url",
                "avatar-url",
                "name",
                "bounty",
                "name-spacing",
                "bounty-spacing",
                "shadow",
                "filter",
            ]
        );
    }

    #[test]
    fn recording_display_keeps_latest_value_and_full_history() {
        let display = RecordingPosterDisplay::default();
        display.set_attribute(PosterAttribute::Name, "LUFFY");
        display.set_attribute(PosterAttribute::Name, "ZORO");

        assert_eq!(
            display.attribute(PosterAttribute::Name),
            Some("ZORO".to_string())
        );
        assert_eq!(display.write_count(), 2);
        assert_eq!(display.attribute(PosterAttribute::Bounty), None);
    }

    #[test]
    fn recording_display_replays_queued_export_outcomes() {
        let display = RecordingPosterDisplay::default();
        display.push_export_outcome(Err("canvas tainted".to_string()));

        assert_eq!(
            block_on(display.export()),
            Err("canvas tainted".to_string())
        );
        assert_eq!(block_on(display.export()), Ok(()));
        assert_eq!(display.export_calls(), 2);
    }

    #[test]
    fn attributes_serialize_as_dom_names() {
        for attribute in ATTRIBUTES {
            let raw = serde_json::to_value(attribute).expect("serialize attribute");
            assert_eq!(raw, serde_json::json!(attribute.attribute_name()));
        }
    }
}
