//! Context Cache
//!
//! Each `Object` keeps a per-name cache slot. A slot is either absent
//! (never built), `None` ("checked out" — a context exists but is
//! currently owned by a caller, or none has ever been released back),
//! or `Some(context)` (available for pickup). This mirrors the
//! reference source's convention of storing a hash entry whose value is
//! `NULL` while a context is in use.

use crate::foundation::Foundation;
use crate::ids::{NameId, ObjectId};
use crate::model::CallContext;

/// Looks up a cached context for `(object, name)`. On a hit, the slot is
/// marked checked-out (so a second concurrent lookup rebuilds instead of
/// handing out the same context twice) and the context is returned. A
/// stale hit (epoch mismatch) is discarded and treated as a miss.
pub fn lookup(foundation: &mut Foundation, object: ObjectId, name: NameId) -> Option<CallContext> {
    let slot = foundation.object_mut(object).cache.get_mut(&name)?;
    let context = slot.take()?;

    let current_global = foundation.global_epoch();
    let current_local = foundation.object(object).local_epoch;
    if context.global_epoch == Some(current_global) && context.local_epoch == current_local {
        Some(context)
    } else {
        None
    }
}

/// Marks `(object, name)` as checked-out after a fresh build, whether or
/// not an entry previously existed.
pub fn mark_checked_out(foundation: &mut Foundation, object: ObjectId, name: NameId) {
    foundation.object_mut(object).cache.insert(name, None);
}

/// Returns a context that is no longer in use to the cache, if it is
/// still valid and the object hasn't already cached something else for
/// that name in the meantime. Otherwise the context is simply dropped.
pub fn release(foundation: &mut Foundation, context: CallContext) {
    let Some(name) = context.cache_key else {
        return;
    };
    let object = context.object;
    let current_global = foundation.global_epoch();
    let current_local = foundation.object(object).local_epoch;
    if context.global_epoch != Some(current_global) || context.local_epoch != current_local {
        return;
    }
    if let Some(slot) = foundation.object_mut(object).cache.get_mut(&name) {
        if slot.is_none() {
            *slot = Some(context);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::model::{CallFlags, InvocationArgs, Mode, MethodFlags, MethodImplementor, StatusCode};

    struct NoOp;
    impl MethodImplementor for NoOp {
        fn call(&self, _args: &InvocationArgs<'_>) -> StatusCode {
            StatusCode::Ok
        }
    }

    fn name_and_object(foundation: &mut Foundation) -> (NameId, ObjectId) {
        let class = foundation.new_class();
        let name = foundation.intern("greet");
        let mid = foundation.new_method(name, MethodFlags::PUBLIC, Some(class));
        foundation.method_mut(mid).implementor = Some(Rc::new(NoOp));
        foundation.set_class_method(class, name, mid);
        let object = foundation.new_object(class);
        (name, object)
    }

    #[test]
    fn miss_when_nothing_cached() {
        let mut f = Foundation::new("unknown");
        let (name, object) = name_and_object(&mut f);
        assert!(lookup(&mut f, object, name).is_none());
    }

    #[test]
    fn release_then_lookup_hits() {
        let mut f = Foundation::new("unknown");
        let (name, object) = name_and_object(&mut f);
        let context = crate::chain_builder::resolve(&mut f, object, Some(name), CallFlags::new(Mode::Public))
            .expect("method resolves");
        release(&mut f, context);

        assert!(lookup(&mut f, object, name).is_some());
    }

    #[test]
    fn stale_release_after_mutation_is_discarded() {
        let mut f = Foundation::new("unknown");
        let (name, object) = name_and_object(&mut f);
        let context = crate::chain_builder::resolve(&mut f, object, Some(name), CallFlags::new(Mode::Public))
            .expect("method resolves");

        f.add_object_mixin(object, f.object_class());
        release(&mut f, context);

        assert!(lookup(&mut f, object, name).is_none());
    }
}
