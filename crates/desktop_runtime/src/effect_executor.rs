//! Runs reducer effects against the host in the order they were queued.

use leptos::*;

use crate::{reducer::RuntimeEffect, runtime_context::DesktopRuntimeContext};

/// Moves the queued effects out, leaving an empty queue for dispatches made while they run.
fn take_batch(queue: &mut Vec<RuntimeEffect>) -> Vec<RuntimeEffect> {
    std::mem::take(queue)
}

/// Subscribes to the effect queue and hands each batch to [`crate::host::DesktopHostContext`].
pub fn install(runtime: DesktopRuntimeContext) {
    create_effect(move |_| {
        if runtime.effects.with(|queue| queue.is_empty()) {
            return;
        }
        let mut batch = Vec::new();
        runtime
            .effects
            .update_untracked(|queue| batch = take_batch(queue));

        let host = runtime.host.get_value();
        batch
            .into_iter()
            .for_each(|effect| host.run_runtime_effect(runtime, effect));
    });
}
