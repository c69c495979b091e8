//! Store → display attribute bridge.

use std::rc::Rc;

use poster_contract::{PosterAttribute, PosterDisplay};
use poster_store::{display_string, PosterStore, StoreKey};
use serde_json::Value;

use crate::config::PhotoKey;

/// Forwards store changes to the display element as attribute writes.
#[derive(Clone)]
pub struct StoreBridge {
    photo_key: PhotoKey,
    display: Rc<dyn PosterDisplay>,
}

impl StoreBridge {
    pub fn new(photo_key: PhotoKey, display: Rc<dyn PosterDisplay>) -> Self {
        Self { photo_key, display }
    }

    /// Attribute a store key drives, or `None` for keys this shell does not observe.
    pub fn attribute_for(&self, key: StoreKey) -> Option<PosterAttribute> {
        match key {
            StoreKey::PhotoUrl | StoreKey::AvatarUrl => {
                (key == self.photo_key.store_key()).then(|| self.photo_key.attribute())
            }
            StoreKey::Name => Some(PosterAttribute::Name),
            StoreKey::Bounty => Some(PosterAttribute::Bounty),
            StoreKey::NameSpacing => Some(PosterAttribute::NameSpacing),
            StoreKey::BountySpacing => Some(PosterAttribute::BountySpacing),
            StoreKey::Shadow => Some(PosterAttribute::Shadow),
            StoreKey::Filter => Some(PosterAttribute::Filter),
        }
    }

    /// Keys with an attribute mapping, in [`StoreKey::ALL`] order.
    pub fn observed_keys(&self) -> Vec<StoreKey> {
        StoreKey::ALL
            .into_iter()
            .filter(|key| self.attribute_for(*key).is_some())
            .collect()
    }

    /// Writes one change to the display. Unmapped keys are ignored.
    pub fn apply(&self, key: StoreKey, value: &Value) {
        if let Some(attribute) = self.attribute_for(key) {
            self.display
                .set_attribute(attribute, &display_string(value));
        }
    }

    /// Pushes the current value of every observed key.
    pub fn push_current(&self, store: &PosterStore) {
        for key in self.observed_keys() {
            self.apply(key, &store.get(key));
        }
    }
}

impl std::fmt::Debug for StoreBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreBridge")
            .field("photo_key", &self.photo_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use poster_contract::RecordingPosterDisplay;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn bridge(photo_key: PhotoKey) -> (StoreBridge, Rc<RecordingPosterDisplay>) {
        let display = Rc::new(RecordingPosterDisplay::default());
        (StoreBridge::new(photo_key, display.clone()), display)
    }

    #[test]
    fn classic_shell_ignores_avatar_key() {
        let (bridge, display) = bridge(PhotoKey::PhotoUrl);
        bridge.apply(StoreKey::AvatarUrl, &json!("blob:avatar"));
        assert_eq!(display.write_count(), 0);

        bridge.apply(StoreKey::PhotoUrl, &json!("blob:photo"));
        assert_eq!(
            display.attribute(PosterAttribute::PhotoUrl),
            Some("blob:photo".to_string())
        );
    }

    #[test]
    fn values_are_coerced_to_attribute_text() {
        let (bridge, display) = bridge(PhotoKey::AvatarUrl);
        bridge.apply(StoreKey::NameSpacing, &json!(4));
        bridge.apply(StoreKey::Shadow, &json!(0.5));
        bridge.apply(StoreKey::Filter, &Value::Null);

        assert_eq!(
            display.writes(),
            vec![
                (PosterAttribute::NameSpacing, "4".to_string()),
                (PosterAttribute::Shadow, "0.5".to_string()),
                (PosterAttribute::Filter, String::new()),
            ]
        );
    }

    #[test]
    fn observed_keys_cover_one_photo_key() {
        let (classic, _) = bridge(PhotoKey::PhotoUrl);
        let (criminal, _) = bridge(PhotoKey::AvatarUrl);
        assert_eq!(classic.observed_keys().len(), 7);
        assert!(classic.observed_keys().contains(&StoreKey::PhotoUrl));
        assert!(criminal.observed_keys().contains(&StoreKey::AvatarUrl));
        assert!(!criminal.observed_keys().contains(&StoreKey::PhotoUrl));
    }

    #[test]
    fn push_current_writes_store_values() {
        let (bridge, display) = bridge(PhotoKey::PhotoUrl);
        let store = PosterStore::new();
        store.set(StoreKey::Name, "NAMI");
        bridge.push_current(&store);

        assert_eq!(display.write_count(), 7);
        assert_eq!(
            display.attribute(PosterAttribute::Name),
            Some("NAMI".to_string())
        );
        assert_eq!(
            display.attribute(PosterAttribute::BountySpacing),
            Some("0".to_string())
        );
    }
}
