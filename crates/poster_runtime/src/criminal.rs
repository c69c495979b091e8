//! Hash-driven criminal mode.
//!
//! The location fragment is the single source of truth: the trigger button only rewrites the
//! hash, and the `hashchange` listener turns the mode on or off.

use crate::config::CriminalModeConfig;

/// Class set on the shell host while the mode is on.
pub const HOST_ACTIVE_CLASS: &str = "criminal";
/// Class set on the decorative overlay while the mode is on.
pub const OVERLAY_ACTIVE_CLASS: &str = "show";
/// Class set on the trigger button while the mode is on.
pub const BUTTON_ACTIVE_CLASS: &str = "active";

fn fragment(hash: &str) -> &str {
    hash.trim().trim_start_matches('#')
}

/// Whether `hash` selects the mode. A missing `#` on either side is tolerated.
pub fn is_sentinel(config: &CriminalModeConfig, hash: &str) -> bool {
    let sentinel = fragment(&config.sentinel_hash);
    !sentinel.is_empty() && fragment(hash) == sentinel
}

/// Hash the trigger button writes: empty when the sentinel is current, the sentinel otherwise.
pub fn toggled_hash(config: &CriminalModeConfig, current_hash: &str) -> String {
    if is_sentinel(config, current_hash) {
        String::new()
    } else {
        format!("#{}", fragment(&config.sentinel_hash))
    }
}

/// Appends `active_class` to `base` while `active`.
pub fn with_state_class(base: &str, active_class: &str, active: bool) -> String {
    if active {
        format!("{base} {active_class}")
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn sentinel_match_ignores_leading_hash() {
        let config = CriminalModeConfig::default();
        assert!(is_sentinel(&config, "#criminal"));
        assert!(is_sentinel(&config, "criminal"));
        assert!(!is_sentinel(&config, ""));
        assert!(!is_sentinel(&config, "#criminals"));
    }

    #[test]
    fn trigger_flips_between_empty_and_sentinel() {
        let config = CriminalModeConfig::default();
        assert_eq!(toggled_hash(&config, ""), "#criminal");
        assert_eq!(toggled_hash(&config, "#other"), "#criminal");
        assert_eq!(toggled_hash(&config, "#criminal"), "");
    }

    #[test]
    fn state_class_is_appended_only_when_active() {
        assert_eq!(
            with_state_class("app-container", HOST_ACTIVE_CLASS, true),
            "app-container criminal"
        );
        assert_eq!(
            with_state_class("app-container", HOST_ACTIVE_CLASS, false),
            "app-container"
        );
    }
}
