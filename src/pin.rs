//! Ownership / pinning primitives.
//!
//! A `CallContext` holds `MethodId`s, not method bodies: a recursive
//! dispatch (the host's `next`-like primitive) can run while earlier
//! frames in the same chain are still "in use". `Pinned` clones out the
//! `Rc<dyn MethodImplementor>` for every chain entry so the Invoker keeps
//! a live, reference-counted handle to each implementor regardless of
//! what happens to the owning `Method` in the arena meanwhile.

use std::fmt;

use crate::foundation::Foundation;
use crate::model::{CallChain, ImplementorRef};

/// A set of preserved implementor handles for one in-flight `CallContext`.
/// Dropping it is the release operation — plain `Rc` refcounting.
pub struct Pinned(Vec<Option<ImplementorRef>>);

impl Pinned {
    /// Clones out the implementor of every chain entry.
    pub fn acquire(foundation: &Foundation, chain: &CallChain) -> Self {
        Pinned(
            chain
                .iter()
                .map(|entry| foundation.method(entry.method).implementor.clone())
                .collect(),
        )
    }
}

impl Clone for Pinned {
    fn clone(&self) -> Self {
        Pinned(self.0.clone())
    }
}

impl fmt::Debug for Pinned {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pinned({} methods)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::model::{CallChainEntry, InvocationArgs, MethodFlags, MethodImplementor, StatusCode};

    struct NoOp;
    impl MethodImplementor for NoOp {
        fn call(&self, _args: &InvocationArgs<'_>) -> StatusCode {
            StatusCode::Ok
        }
    }

    #[test]
    fn acquire_preserves_implementor_through_refcount() {
        let mut f = Foundation::new("unknown");
        let class = f.new_class();
        let name = f.intern("m");
        let mid = f.new_method(name, MethodFlags::PUBLIC, Some(class));
        f.method_mut(mid).implementor = Some(Rc::new(NoOp));

        let chain: CallChain = [CallChainEntry::new(mid, false, None)].into_iter().collect();
        let pinned = Pinned::acquire(&f, &chain);
        assert_eq!(pinned.0.len(), 1);
        assert!(pinned.0[0].is_some());
    }
}
