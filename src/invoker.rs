//! Invoker
//!
//! Drives a `CallContext` one step at a time. Pins are acquired on the
//! first step and released once the chain is exhausted rather than
//! strictly "right after the first step's restoration": in the
//! reference source every later step runs nested inside the first
//! step's call frame (via a `next`-style primitive recursing back into
//! the invoker), so releasing "after the first step" and releasing
//! "once the whole chain is done" coincide there. Tying release to
//! `is_done()` keeps that guarantee even when a host drives steps from
//! separate, non-nested calls.

use log::trace;

use crate::foundation::Foundation;
use crate::model::{CallContext, ContextFlags, InvocationArgs, StatusCode};
use crate::pin::Pinned;

/// Executes `context.chain[context.index]` and advances `context.index`.
/// Returns `None` if the chain is already exhausted.
pub fn invoke_step(
    foundation: &mut Foundation,
    context: &mut CallContext,
    argv: &[String],
) -> Option<StatusCode> {
    if context.is_done() {
        return None;
    }
    if context.index == 0 && context.pins.is_none() {
        context.pins = Some(Pinned::acquire(foundation, &context.chain));
    }

    let entry = *context.current()?;
    let object = context.object;

    let saved_filter_handling = foundation.object(object).is_filter_handling();
    let filter_handling = entry.is_filter || context.flags.contains(ContextFlags::FILTER_HANDLING);
    foundation.object_mut(object).set_filter_handling(filter_handling);

    let implementor = foundation.method(entry.method).implementor.clone();
    let status = match implementor {
        Some(implementor) => implementor.call(&InvocationArgs {
            argv,
            skip: context.skip,
        }),
        // Chains never contain placeholder methods, so this is
        // unreachable in practice; treated as a pass-through error rather
        // than a panic in case a host bypasses the builder.
        None => StatusCode::Error,
    };
    trace!("invoke_step {object:?}[{}] -> {status:?}", context.index);

    foundation.object_mut(object).set_filter_handling(saved_filter_handling);

    context.index += 1;
    if context.is_done() {
        context.pins = None;
    }

    Some(status)
}
