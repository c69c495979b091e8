//! Wanted-poster shell runtime: configuration, reducer, store bridge, session lifecycle and the
//! Leptos shell component.

pub mod bridge;
pub mod components;
pub mod config;
pub mod criminal;
mod effect_executor;
pub mod host;
pub mod ingestion;
pub mod loading;
pub mod model;
pub mod reducer;
mod runtime_context;
pub mod session;
#[cfg(test)]
mod testing;

pub use bridge::StoreBridge;
pub use components::{use_shell_runtime, AppContainer, ShellProvider, ShellRuntimeContext};
pub use config::{
    CriminalModeConfig, CriminalPreset, DragLeavePolicy, ExportPolicy, PhotoKey, ShellConfig,
    ShellVariant,
};
pub use host::{LeptosScheduler, ShellHostContext, ShellScheduler};
pub use loading::{LoadingGate, OverlayPhase};
pub use model::ShellState;
pub use reducer::{reduce_shell, ShellAction, ShellEffect, ShellError};
pub use session::{SessionError, SessionPhase, ShellSession};
