//! Runtime provider and context wiring for the poster shell.
//!
//! This module owns the reducer container, the effect queue and the host context. UI composition
//! stays in [`crate::components`].
#![allow(clippy::clone_on_copy)]

use std::rc::Rc;

use leptos::*;
use poster_host::HostServices;
use poster_store::poster_store;

use crate::{
    config::ShellConfig,
    effect_executor,
    host::{LeptosScheduler, ShellHostContext},
    model::ShellState,
    reducer::{reduce_shell, ShellAction, ShellEffect},
};

#[derive(Clone, Copy)]
/// Leptos context for reading shell state and dispatching [`ShellAction`] values.
pub struct ShellRuntimeContext {
    /// Host services, store handle and mounted collaborators.
    pub host: StoredValue<ShellHostContext>,
    /// Variant configuration chosen by the entry layer.
    pub config: StoredValue<ShellConfig>,
    /// Reactive shell state signal.
    pub state: RwSignal<ShellState>,
    /// Queue of effects emitted by the reducer and drained by the executor.
    pub effects: RwSignal<Vec<ShellEffect>>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<ShellAction>,
}

impl ShellRuntimeContext {
    /// Dispatches a reducer action through the runtime context callback.
    pub fn dispatch_action(&self, action: ShellAction) {
        self.dispatch.call(action);
    }

    /// Whether the provider's reactive scope still owns this context.
    pub fn is_alive(&self) -> bool {
        self.state.try_with_untracked(|_| ()).is_some()
    }

    /// Dispatches `action` unless the provider has been disposed; returns whether it ran.
    ///
    /// Timers and launch tasks can outlive the provider, so they dispatch through this.
    pub fn try_dispatch_action(&self, action: ShellAction) -> bool {
        if !self.is_alive() {
            logging::debug_warn!("shell provider disposed; action dropped");
            return false;
        }
        self.dispatch.call(action);
        true
    }
}

#[component]
/// Provides [`ShellRuntimeContext`] to descendant components.
pub fn ShellProvider(
    /// Variant configuration.
    config: ShellConfig,
    /// Injected browser or stub host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let host = store_value(ShellHostContext::new(
        host_services,
        poster_store(),
        Rc::new(LeptosScheduler),
    ));
    let state = create_rw_signal(ShellState::new(&config));
    let config = store_value(config);
    let effects = create_rw_signal(Vec::<ShellEffect>::new());

    let dispatch = Callback::new(move |action: ShellAction| {
        let mut shell = state.get_untracked();
        let previous = shell.clone();

        match config.with_value(|config| reduce_shell(config, &mut shell, action)) {
            Ok(new_effects) => {
                if shell != previous {
                    state.set(shell);
                }
                if !new_effects.is_empty() {
                    let mut queue = effects.get_untracked();
                    queue.extend(new_effects);
                    effects.set(queue);
                }
            }
            Err(err) => logging::warn!("shell reducer error: {err}"),
        }
    });

    let runtime = ShellRuntimeContext {
        host,
        config,
        state,
        effects,
        dispatch,
    };

    provide_context(runtime.clone());
    effect_executor::install(runtime);

    children().into_view()
}

/// Returns the current [`ShellRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`ShellProvider`].
pub fn use_shell_runtime() -> ShellRuntimeContext {
    use_context::<ShellRuntimeContext>().expect("ShellRuntimeContext not provided")
}
