//! Minimum-duration gate for the loading overlay.
//!
//! The overlay stays fully visible until the display reports it has loaded *and* the minimum
//! loading time since attach has passed. The gate computes one deferred fade instead of polling.

use poster_host::elapsed_ms;
use serde::{Deserialize, Serialize};

/// Visibility phase of the loading overlay. Phases only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OverlayPhase {
    Visible,
    Fading,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadingGate {
    min_loading_ms: u64,
    fade_ms: u64,
    started_at_ms: Option<u64>,
    content_ready: bool,
    fade_scheduled: bool,
    phase: OverlayPhase,
}

impl LoadingGate {
    pub fn new(min_loading_ms: u64, fade_ms: u64) -> Self {
        Self {
            min_loading_ms,
            fade_ms,
            started_at_ms: None,
            content_ready: false,
            fade_scheduled: false,
            phase: OverlayPhase::Visible,
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn fade_ms(&self) -> u64 {
        self.fade_ms
    }

    /// Records the attach time. Returns the fade delay when the content was already ready.
    pub fn start(&mut self, now_ms: u64) -> Option<u64> {
        if self.started_at_ms.is_some() {
            return None;
        }
        self.started_at_ms = Some(now_ms);
        self.schedule_fade(now_ms)
    }

    /// Records that the display finished loading. Returns the fade delay once it can be known.
    ///
    /// Repeated signals return `None`.
    pub fn content_ready(&mut self, now_ms: u64) -> Option<u64> {
        if self.content_ready {
            return None;
        }
        self.content_ready = true;
        self.schedule_fade(now_ms)
    }

    fn schedule_fade(&mut self, now_ms: u64) -> Option<u64> {
        let started_at_ms = self.started_at_ms?;
        if !self.content_ready || self.fade_scheduled || self.phase != OverlayPhase::Visible {
            return None;
        }
        self.fade_scheduled = true;
        let elapsed = elapsed_ms(started_at_ms, now_ms);
        Some(self.min_loading_ms.saturating_sub(elapsed))
    }

    /// `Visible → Fading`. Returns whether the phase changed.
    pub fn begin_fade(&mut self) -> bool {
        self.advance_to(OverlayPhase::Fading)
    }

    /// `Fading → Removed`. Returns whether the phase changed.
    pub fn finish(&mut self) -> bool {
        self.advance_to(OverlayPhase::Removed)
    }

    fn advance_to(&mut self, next: OverlayPhase) -> bool {
        let expected = match next {
            OverlayPhase::Visible => return false,
            OverlayPhase::Fading => OverlayPhase::Visible,
            OverlayPhase::Removed => OverlayPhase::Fading,
        };
        if self.phase != expected {
            return false;
        }
        self.phase = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn early_ready_waits_out_the_minimum() {
        let mut gate = LoadingGate::new(1000, 1000);
        assert_eq!(gate.start(5_000), None);
        assert_eq!(gate.content_ready(5_000), Some(1000));
        assert_eq!(gate.content_ready(5_100), None);
    }

    #[test]
    fn late_ready_fades_immediately() {
        let mut gate = LoadingGate::new(1000, 1000);
        gate.start(0);
        assert_eq!(gate.content_ready(1_500), Some(0));
    }

    #[test]
    fn ready_before_start_schedules_full_minimum_on_start() {
        let mut gate = LoadingGate::new(1000, 1000);
        assert_eq!(gate.content_ready(10), None);
        assert_eq!(gate.start(20), Some(1000));
        assert_eq!(gate.start(30), None);
    }

    #[test]
    fn phases_only_move_forward() {
        let mut gate = LoadingGate::new(0, 1000);
        assert!(!gate.finish());
        assert!(gate.begin_fade());
        assert!(!gate.begin_fade());
        assert!(gate.finish());
        assert!(!gate.finish());
        assert_eq!(gate.phase(), OverlayPhase::Removed);
    }
}
