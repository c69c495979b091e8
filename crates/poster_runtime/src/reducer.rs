//! Reducer actions, side-effect intents, and transition logic for the poster shell.

use poster_host::{IncomingFile, ObjectUrl};
use poster_store::StoreKey;
use serde_json::{json, Value};
use thiserror::Error;

use crate::{
    config::{DragLeavePolicy, ShellConfig},
    criminal,
    ingestion::{accept_file, IngestSource},
    model::ShellState,
    session::{SessionError, SessionPhase},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_shell`].
pub enum ShellAction {
    /// The shell mounted and its session started.
    Attached {
        /// Monotonic attach time.
        now_ms: u64,
        /// Location fragment at attach time.
        hash: String,
    },
    /// The shell was removed from the document.
    Detached,
    DragEnter,
    DragLeave {
        /// Whether the pointer left the shell entirely rather than entering a child.
        related_target_is_null: bool,
    },
    /// A drop on the shell; carries the first dropped file, if any.
    Drop { file: Option<IncomingFile> },
    /// The hidden upload input changed; carries its first file, if any.
    FileSelected { file: Option<IncomingFile> },
    /// The OS delivered a file through the launch queue.
    FileLaunched { file: IncomingFile },
    /// An accepted file now has an object URL.
    ObjectUrlCreated { url: ObjectUrl },
    ImportClicked,
    EditClicked,
    TipsClicked,
    PosterClicked,
    ExportClicked,
    /// The display's export settled.
    ExportFinished { result: Result<(), String> },
    /// The display reported that its content finished loading.
    DisplayLoaded { now_ms: u64 },
    OverlayFadeStarted,
    OverlayRemoved,
    /// `hashchange` fired.
    HashChanged { hash: String },
    /// The criminal-mode trigger was clicked.
    CriminalButtonClicked { current_hash: String },
    CriminalButtonRevealed,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_shell`] for the host to execute in order.
pub enum ShellEffect {
    /// Register the OS file-launch consumer.
    InstallLaunchConsumer,
    /// Create an object URL for an accepted file.
    IngestFile(IncomingFile),
    WriteStore { key: StoreKey, value: Value },
    ResetStore(Vec<(StoreKey, Value)>),
    RevokeObjectUrl(ObjectUrl),
    ScheduleOverlayFade { delay_ms: u64 },
    ScheduleOverlayRemoval { delay_ms: u64 },
    ScheduleCriminalReveal { delay_ms: u64 },
    RunExport,
    /// Log at error level and alert the user.
    ReportExportError { message: String },
    /// Log at warn level only.
    LogUnhandledExportFailure { message: String },
    ToggleEditPanel,
    ToggleTips,
    ChangePoster,
    OpenFilePicker,
    SetLocationHash(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that do not apply to the current shell.
pub enum ShellError {
    /// User input arrived while the shell is not attached.
    #[error("shell is not attached")]
    NotAttached,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("criminal mode is not enabled for this shell")]
    CriminalModeDisabled,
    #[error("poster switching is not enabled for this shell")]
    PosterSwitchDisabled,
}

/// Applies a [`ShellAction`] to `state` and collects the resulting side effects.
///
/// # Errors
///
/// Returns [`ShellError::NotAttached`] for user input outside an attached session, a
/// [`ShellError::Session`] error for invalid attach transitions, and a disabled-feature error when
/// an action targets a feature the config leaves off.
pub fn reduce_shell(
    config: &ShellConfig,
    state: &mut ShellState,
    action: ShellAction,
) -> Result<Vec<ShellEffect>, ShellError> {
    let mut effects = Vec::new();
    match action {
        ShellAction::Attached { now_ms, hash } => {
            match state.lifecycle {
                SessionPhase::Attached => return Err(SessionError::AlreadyAttached.into()),
                SessionPhase::Detached => return Err(SessionError::Terminated.into()),
                SessionPhase::Unattached => {}
            }
            state.lifecycle = SessionPhase::Attached;
            if config.file_launch {
                effects.push(ShellEffect::InstallLaunchConsumer);
            }
            if let Some(delay_ms) = state.loading.start(now_ms) {
                effects.push(ShellEffect::ScheduleOverlayFade { delay_ms });
            }
            if let Some(criminal) = &config.criminal {
                apply_hash(config, state, &hash, &mut effects);
                effects.push(ShellEffect::ScheduleCriminalReveal {
                    delay_ms: criminal.reveal_delay_ms,
                });
            }
        }
        ShellAction::Detached => {
            if state.lifecycle == SessionPhase::Attached {
                state.lifecycle = SessionPhase::Detached;
            }
            state.drag_active = false;
        }
        ShellAction::DragEnter => {
            require_attached(state)?;
            state.drag_active = true;
        }
        ShellAction::DragLeave {
            related_target_is_null,
        } => {
            require_attached(state)?;
            let clears = match config.drag_leave {
                DragLeavePolicy::RelatedTargetNull => related_target_is_null,
                DragLeavePolicy::Always => true,
            };
            if clears {
                state.drag_active = false;
            }
        }
        ShellAction::Drop { file } => {
            require_attached(state)?;
            state.drag_active = false;
            if let Some(file) = accept_file(IngestSource::Drop, file) {
                effects.push(ShellEffect::IngestFile(file));
            }
        }
        ShellAction::FileSelected { file } => {
            require_attached(state)?;
            if let Some(file) = accept_file(IngestSource::Picker, file) {
                effects.push(ShellEffect::IngestFile(file));
            }
        }
        ShellAction::FileLaunched { file } => {
            require_attached(state)?;
            if let Some(file) = accept_file(IngestSource::Launch, Some(file)) {
                effects.push(ShellEffect::IngestFile(file));
            }
        }
        ShellAction::ObjectUrlCreated { url } => {
            effects.push(ShellEffect::WriteStore {
                key: config.photo_store_key(),
                value: json!(url.as_str()),
            });
            let replaced = state.current_object_url.replace(url);
            if config.revoke_replaced_object_urls {
                if let Some(replaced) = replaced {
                    effects.push(ShellEffect::RevokeObjectUrl(replaced));
                }
            }
        }
        ShellAction::ImportClicked => {
            require_attached(state)?;
            effects.push(ShellEffect::OpenFilePicker);
        }
        ShellAction::EditClicked => {
            require_attached(state)?;
            effects.push(ShellEffect::ToggleEditPanel);
        }
        ShellAction::TipsClicked => {
            require_attached(state)?;
            effects.push(ShellEffect::ToggleTips);
        }
        ShellAction::PosterClicked => {
            require_attached(state)?;
            if !config.show_poster_switch {
                return Err(ShellError::PosterSwitchDisabled);
            }
            effects.push(ShellEffect::ChangePoster);
        }
        ShellAction::ExportClicked => {
            require_attached(state)?;
            if config.export.guard_reentrancy && state.export_loading() {
                return Ok(effects);
            }
            state.exports_in_flight = state.exports_in_flight.saturating_add(1);
            effects.push(ShellEffect::RunExport);
        }
        ShellAction::ExportFinished { result } => {
            state.exports_in_flight = state.exports_in_flight.saturating_sub(1);
            if let Err(message) = result {
                effects.push(if config.export.catch_errors {
                    ShellEffect::ReportExportError { message }
                } else {
                    ShellEffect::LogUnhandledExportFailure { message }
                });
            }
        }
        ShellAction::DisplayLoaded { now_ms } => {
            if let Some(delay_ms) = state.loading.content_ready(now_ms) {
                effects.push(ShellEffect::ScheduleOverlayFade { delay_ms });
            }
        }
        ShellAction::OverlayFadeStarted => {
            if state.loading.begin_fade() {
                effects.push(ShellEffect::ScheduleOverlayRemoval {
                    delay_ms: state.loading.fade_ms(),
                });
            }
        }
        ShellAction::OverlayRemoved => {
            state.loading.finish();
        }
        ShellAction::HashChanged { hash } => {
            require_attached(state)?;
            if config.criminal.is_none() {
                return Err(ShellError::CriminalModeDisabled);
            }
            apply_hash(config, state, &hash, &mut effects);
        }
        ShellAction::CriminalButtonClicked { current_hash } => {
            require_attached(state)?;
            let criminal = config
                .criminal
                .as_ref()
                .ok_or(ShellError::CriminalModeDisabled)?;
            effects.push(ShellEffect::SetLocationHash(criminal::toggled_hash(
                criminal,
                &current_hash,
            )));
        }
        ShellAction::CriminalButtonRevealed => {
            state.criminal_revealed = true;
        }
    }

    Ok(effects)
}

fn require_attached(state: &ShellState) -> Result<(), ShellError> {
    if state.is_attached() {
        Ok(())
    } else {
        Err(ShellError::NotAttached)
    }
}

fn apply_hash(
    config: &ShellConfig,
    state: &mut ShellState,
    hash: &str,
    effects: &mut Vec<ShellEffect>,
) {
    let Some(criminal) = &config.criminal else {
        return;
    };
    let active = criminal::is_sentinel(criminal, hash);
    if active == state.criminal_active {
        return;
    }
    state.criminal_active = active;
    if active {
        effects.push(ShellEffect::ResetStore(criminal.preset.entries()));
    }
}
