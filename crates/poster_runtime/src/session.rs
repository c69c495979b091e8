//! Store subscription lifecycle for one mounted shell.

use std::rc::Rc;

use poster_store::{PosterStore, Subscription};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bridge::StoreBridge;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Unattached,
    Attached,
    /// Terminal.
    Detached,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Lifecycle errors for [`ShellSession`].
pub enum SessionError {
    /// The session was stopped and cannot be restarted.
    #[error("shell session was already detached")]
    Terminated,
    /// `start` was called twice.
    #[error("shell session is already attached")]
    AlreadyAttached,
}

/// Owns every store subscription a shell registers.
///
/// `stop` (or drop) releases all of them, so no bridge callback runs after the shell is gone.
#[derive(Debug)]
pub struct ShellSession {
    phase: SessionPhase,
    subscriptions: Vec<Subscription>,
}

impl Default for ShellSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellSession {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Unattached,
            subscriptions: Vec::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Pushes current values through `bridge` and subscribes it to every key it observes.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyAttached`] on a second call and
    /// [`SessionError::Terminated`] after [`ShellSession::stop`].
    pub fn start(&mut self, store: &PosterStore, bridge: StoreBridge) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::Attached => return Err(SessionError::AlreadyAttached),
            SessionPhase::Detached => return Err(SessionError::Terminated),
            SessionPhase::Unattached => {}
        }

        bridge.push_current(store);
        let bridge = Rc::new(bridge);
        self.subscriptions = bridge
            .observed_keys()
            .into_iter()
            .map(|key| {
                let bridge = bridge.clone();
                store.subscribe(key, move |key, value| bridge.apply(key, value))
            })
            .collect();
        self.phase = SessionPhase::Attached;
        Ok(())
    }

    /// Releases every subscription. Safe to call at any time, any number of times.
    pub fn stop(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
        if self.phase == SessionPhase::Attached {
            self.phase = SessionPhase::Detached;
        }
    }
}

impl Drop for ShellSession {
    fn drop(&mut self) {
        self.stop();
    }
}
