//! Shell configuration, variant presets, and query-string selection.

use poster_contract::PosterAttribute;
use poster_store::StoreKey;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_MIN_LOADING_MS: u64 = 1000;
pub const DEFAULT_FADE_MS: u64 = 1000;
pub const DEFAULT_CRIMINAL_SENTINEL: &str = "#criminal";
pub const DEFAULT_CRIMINAL_REVEAL_DELAY_MS: u64 = 3000;

/// Shell variants shipped with the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShellVariant {
    /// Photo poster with guarded export and a poster switch.
    Classic,
    /// Avatar poster with the hash-driven criminal mode.
    Criminal,
}

impl ShellVariant {
    /// Stable query-string id.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Criminal => "criminal",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "classic" => Some(Self::Classic),
            "criminal" => Some(Self::Criminal),
            _ => None,
        }
    }
}

/// Store key the shell writes accepted photos to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhotoKey {
    PhotoUrl,
    AvatarUrl,
}

impl PhotoKey {
    pub const fn store_key(self) -> StoreKey {
        match self {
            Self::PhotoUrl => StoreKey::PhotoUrl,
            Self::AvatarUrl => StoreKey::AvatarUrl,
        }
    }

    pub const fn attribute(self) -> PosterAttribute {
        match self {
            Self::PhotoUrl => PosterAttribute::PhotoUrl,
            Self::AvatarUrl => PosterAttribute::AvatarUrl,
        }
    }
}

/// How export clicks and failures are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportPolicy {
    /// Ignore export clicks while an export is in flight.
    pub guard_reentrancy: bool,
    /// Log failures at error level and show them in a blocking alert.
    pub catch_errors: bool,
}

impl Default for ExportPolicy {
    fn default() -> Self {
        Self {
            guard_reentrancy: true,
            catch_errors: true,
        }
    }
}

/// When `dragleave` clears the drag highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragLeavePolicy {
    /// Only when the pointer left the shell entirely (null related target).
    RelatedTargetNull,
    /// On every `dragleave`, including moves into child elements.
    Always,
}

/// Record written to the store when criminal mode activates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriminalPreset {
    pub name: String,
    pub bounty: String,
    pub avatar_url: String,
}

impl Default for CriminalPreset {
    fn default() -> Self {
        Self {
            name: "SANJI".to_string(),
            bounty: "1032000000".to_string(),
            avatar_url: "/images/sanji-sketch.png".to_string(),
        }
    }
}

impl CriminalPreset {
    /// Store entries in write order.
    pub fn entries(&self) -> Vec<(StoreKey, Value)> {
        vec![
            (StoreKey::AvatarUrl, json!(self.avatar_url)),
            (StoreKey::Name, json!(self.name)),
            (StoreKey::Bounty, json!(self.bounty)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriminalModeConfig {
    /// Location fragment that turns the mode on, with its leading `#`.
    pub sentinel_hash: String,
    /// Delay before the trigger button is shown.
    pub reveal_delay_ms: u64,
    pub preset: CriminalPreset,
}

impl Default for CriminalModeConfig {
    fn default() -> Self {
        Self {
            sentinel_hash: DEFAULT_CRIMINAL_SENTINEL.to_string(),
            reveal_delay_ms: DEFAULT_CRIMINAL_REVEAL_DELAY_MS,
            preset: CriminalPreset::default(),
        }
    }
}

/// Runtime configuration for one shell instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub variant: ShellVariant,
    pub photo_key: PhotoKey,
    /// Minimum time the loading overlay stays fully visible after attach.
    pub min_loading_ms: u64,
    pub fade_ms: u64,
    pub export: ExportPolicy,
    pub drag_leave: DragLeavePolicy,
    pub criminal: Option<CriminalModeConfig>,
    /// Revoke the previous object URL once a newer one replaces it in the store.
    pub revoke_replaced_object_urls: bool,
    /// Register a consumer with the host's file launch queue on attach.
    pub file_launch: bool,
    pub show_poster_switch: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl ShellConfig {
    pub fn classic() -> Self {
        Self {
            variant: ShellVariant::Classic,
            photo_key: PhotoKey::PhotoUrl,
            min_loading_ms: DEFAULT_MIN_LOADING_MS,
            fade_ms: DEFAULT_FADE_MS,
            export: ExportPolicy {
                guard_reentrancy: true,
                catch_errors: true,
            },
            drag_leave: DragLeavePolicy::RelatedTargetNull,
            criminal: None,
            revoke_replaced_object_urls: true,
            file_launch: true,
            show_poster_switch: true,
        }
    }

    pub fn criminal() -> Self {
        Self {
            variant: ShellVariant::Criminal,
            photo_key: PhotoKey::AvatarUrl,
            min_loading_ms: DEFAULT_MIN_LOADING_MS,
            fade_ms: DEFAULT_FADE_MS,
            export: ExportPolicy {
                guard_reentrancy: false,
                catch_errors: false,
            },
            drag_leave: DragLeavePolicy::Always,
            criminal: Some(CriminalModeConfig::default()),
            revoke_replaced_object_urls: true,
            file_launch: false,
            show_poster_switch: false,
        }
    }

    pub fn for_variant(variant: ShellVariant) -> Self {
        match variant {
            ShellVariant::Classic => Self::classic(),
            ShellVariant::Criminal => Self::criminal(),
        }
    }

    /// Builds a config from a page query string such as `?variant=criminal&min-loading-ms=0`.
    ///
    /// Unknown keys and malformed values are ignored; the classic preset is the fallback.
    pub fn from_query(query: &str) -> Self {
        let mut variant = None;
        let mut min_loading_ms = None;

        for pair in query
            .trim_start_matches('?')
            .split('&')
            .filter(|part| !part.is_empty())
        {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "variant" => variant = ShellVariant::parse(value),
                "min-loading-ms" => min_loading_ms = value.trim().parse::<u64>().ok(),
                _ => {}
            }
        }

        let mut config = Self::for_variant(variant.unwrap_or(ShellVariant::Classic));
        if let Some(min_loading_ms) = min_loading_ms {
            config.min_loading_ms = min_loading_ms;
        }
        config
    }

    pub fn photo_store_key(&self) -> StoreKey {
        self.photo_key.store_key()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn query_selects_variant_and_loading_override() {
        let config = ShellConfig::from_query("?variant=criminal&min-loading-ms=250");
        assert_eq!(config.variant, ShellVariant::Criminal);
        assert_eq!(config.photo_key, PhotoKey::AvatarUrl);
        assert_eq!(config.min_loading_ms, 250);
        assert!(config.criminal.is_some());
    }

    #[test]
    fn query_falls_back_to_classic_on_unknown_values() {
        let config = ShellConfig::from_query("variant=pirate&min-loading-ms=soon&other");
        assert_eq!(config, ShellConfig::classic());
        assert_eq!(ShellConfig::from_query(""), ShellConfig::classic());
    }

    #[test]
    fn presets_differ_in_export_and_drag_policies() {
        let classic = ShellConfig::classic();
        let criminal = ShellConfig::criminal();
        assert!(classic.export.guard_reentrancy && classic.export.catch_errors);
        assert!(!criminal.export.guard_reentrancy && !criminal.export.catch_errors);
        assert_eq!(classic.drag_leave, DragLeavePolicy::RelatedTargetNull);
        assert_eq!(criminal.drag_leave, DragLeavePolicy::Always);
        assert!(classic.file_launch && !criminal.file_launch);
    }

    #[test]
    fn partial_json_config_fills_missing_fields_from_classic() {
        let config: ShellConfig =
            serde_json::from_value(json!({ "min_loading_ms": 0 })).expect("parse config");
        assert_eq!(config.min_loading_ms, 0);
        assert_eq!(config.photo_key, PhotoKey::PhotoUrl);
        assert_eq!(config.export, ExportPolicy::default());
    }

    #[test]
    fn criminal_preset_writes_avatar_then_text() {
        let keys: Vec<_> = CriminalPreset::default()
            .entries()
            .into_iter()
            .map(|(key, _)| key)
            .collect();
        assert_eq!(keys, vec![StoreKey::AvatarUrl, StoreKey::Name, StoreKey::Bounty]);
    }
}
