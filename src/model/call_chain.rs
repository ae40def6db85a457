//! Call chain entries and the resolved `CallContext`.

use smallvec::SmallVec;

use crate::ids::{ClassId, MethodId, NameId, ObjectId};
use crate::model::mode::ContextFlags;
use crate::pin::Pinned;

/// Small-buffer capacity for a `CallContext`'s chain before it spills to
/// the heap (mirrors the reference source's `CALL_CHAIN_STATIC_SIZE`).
/// Most dispatch chains in a well-factored hierarchy are shallow, so this
/// avoids an allocation for the common case.
pub const CALL_CHAIN_STATIC_SIZE: usize = 4;

/// One step in a call chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallChainEntry {
    pub method: MethodId,
    pub is_filter: bool,
    /// Declaring class for filters; unset for non-filter entries and for
    /// object-declared filters.
    pub filter_declarer: Option<ClassId>,
}

impl CallChainEntry {
    pub fn new(method: MethodId, is_filter: bool, filter_declarer: Option<ClassId>) -> Self {
        Self {
            method,
            is_filter,
            filter_declarer,
        }
    }
}

pub type CallChain = SmallVec<[CallChainEntry; CALL_CHAIN_STATIC_SIZE]>;

/// The result of resolving `(object, method_name, flags)`.
#[derive(Debug, Clone)]
pub struct CallContext {
    pub chain: CallChain,
    /// Current step; `index in [0, chain.len()]`, advancing past the end
    /// is terminal.
    pub index: usize,
    /// Leading argv elements to drop before the first "real" argument.
    pub skip: usize,
    pub flags: ContextFlags,
    /// `None` is the "-1" sentinel: this context can never satisfy a
    /// cache lookup and is therefore never cached.
    pub global_epoch: Option<u64>,
    pub local_epoch: u64,
    pub object: ObjectId,
    /// The originally requested method name, used as the per-object
    /// cache key. `None` for special (constructor/destructor) contexts,
    /// which are never cached. Kept even when resolution fell back to
    /// the unknown-method name, so a later lookup for the same
    /// originally-requested name can still hit.
    pub cache_key: Option<NameId>,
    /// Held from the first step until the chain is exhausted. `None`
    /// before the first `invoke_step` and after the chain completes.
    pub pins: Option<Pinned>,
}

impl CallContext {
    /// Number of entries due to filter processing; these precede all
    /// primary-chain entries.
    pub fn filter_length(&self) -> usize {
        self.chain
            .iter()
            .take_while(|entry| entry.is_filter)
            .count()
    }

    pub fn is_done(&self) -> bool {
        self.index >= self.chain.len()
    }

    pub fn current(&self) -> Option<&CallChainEntry> {
        self.chain.get(self.index)
    }
}
