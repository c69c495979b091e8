//! Explicit effect-queue executor for reducer-emitted shell effects.

use std::rc::Rc;

use leptos::*;

use crate::{host::ShellDispatch, runtime_context::ShellRuntimeContext};

/// Dispatch handed to effects; actions arriving after the provider is disposed are dropped.
pub(crate) fn shell_dispatch(runtime: ShellRuntimeContext) -> ShellDispatch {
    Rc::new(move |action| {
        runtime.try_dispatch_action(action);
    })
}

/// Installs the effect executor that drains reducer-emitted shell effects in order.
pub fn install(runtime: ShellRuntimeContext) {
    let dispatch = shell_dispatch(runtime);

    // Clear the queue before running so effects that dispatch again enqueue a fresh batch instead
    // of being overwritten by the in-flight drain.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        let host = runtime.host.get_value();
        for effect in queued {
            host.run_shell_effect(&dispatch, effect);
        }
    });
}
