//! Chain Builder
//!
//! The central algorithm: assembles a `CallContext` for
//! `(object, method_name, flags)` by collecting filters (unless
//! suppressed), then the primary method chain, then falling back to the
//! unknown-method name if the primary chain came up empty. Ported from
//! `TclOOGetCallContext`/`AddSimpleChainToCallContext`/
//! `AddSimpleClassChainToCallContext`/`AddMethodToCallChain`/
//! `AddClassFiltersToCallContext`.

use std::collections::HashSet;

use log::debug;

use crate::cache;
use crate::foundation::Foundation;
use crate::hierarchy;
use crate::ids::{ClassId, MethodId, NameId, ObjectId};
use crate::model::{
    CallChain, CallChainEntry, CallContext, CallFlags, ContextFlags, Mode, Object,
    VisibilityResolution,
};

/// Assembles (or returns a cached) `CallContext` for `(object, name,
/// flags)`. `name` must be `None` only when `flags.mode` is `Constructor`
/// or `Destructor` — those modes look the method up directly on each
/// class (`Class::constructor`/`Class::destructor`) and never consult
/// `name`.
///
/// # Panics
/// Panics if the object's class hierarchy is cyclic. Cycles are rejected
/// at edit time by `Foundation::add_superclass`, so this indicates the
/// arena was mutated outside the public API.
pub fn resolve(
    foundation: &mut Foundation,
    object_id: ObjectId,
    name: Option<NameId>,
    flags: CallFlags,
) -> Option<CallContext> {
    let special = flags.mode.is_special();
    debug_assert!(special || name.is_some(), "non-special resolve requires a name");

    // The caller's original privacy intent, threaded separately from the
    // `mode` passed to each simple-chain build: filters and the
    // unknown-method fallback are always walked as `Mode::Protected`
    // traversals, but whether a private method found along the way is
    // still visible depends on what the *original* call asked for, not
    // on the local traversal mode.
    let request_private = flags.mode.wants_private();

    let object_already_filtering = foundation.object(object_id).is_filter_handling();
    let cacheable = !special && !flags.filter_handling && !object_already_filtering;

    if cacheable {
        if let Some(name) = name {
            if let Some(hit) = cache::lookup(foundation, object_id, name) {
                debug!("cache hit for {object_id:?}/{name:?}");
                return Some(hit);
            }
        }
    }

    hierarchy::ensure_hierarchy(foundation, foundation.object(object_id).self_class)
        .expect("class hierarchy must be acyclic; cycles are rejected at edit time");

    let mut chain: CallChain = CallChain::new();

    if cacheable {
        let mut seen = HashSet::new();
        collect_filters(foundation, object_id, &mut chain, &mut seen, request_private);
    }
    let filter_length = chain.len();

    // `build_simple_chain` only reads `name` once `mode.is_special()` is
    // false, so a placeholder stands in for it on constructor/destructor
    // requests without ever being looked at.
    let chain_name = name.unwrap_or_else(|| foundation.unknown_method_name());
    build_simple_chain(
        foundation,
        object_id,
        chain_name,
        flags.mode,
        VisibilityResolution::Unknown,
        false,
        None,
        filter_length,
        request_private,
        &mut chain,
    );

    let mut context_flags: ContextFlags = flags.into();

    if chain.len() == filter_length {
        // The requested method has no implementation.
        if special {
            return None;
        }
        build_simple_chain(
            foundation,
            object_id,
            foundation.unknown_method_name(),
            Mode::Protected,
            VisibilityResolution::Unknown,
            false,
            None,
            filter_length,
            request_private,
            &mut chain,
        );
        context_flags |= ContextFlags::UNKNOWN_METHOD;
        if chain.len() == filter_length {
            return None;
        }
        let context = CallContext {
            chain,
            index: 0,
            skip: 2,
            flags: context_flags,
            // Never cacheable: the "-1 epoch" sentinel.
            global_epoch: None,
            local_epoch: foundation.object(object_id).local_epoch,
            object: object_id,
            cache_key: if cacheable { name } else { None },
            pins: None,
        };
        return Some(context);
    }

    let context = CallContext {
        chain,
        index: 0,
        skip: 2,
        flags: context_flags,
        global_epoch: if cacheable {
            Some(foundation.global_epoch())
        } else {
            None
        },
        local_epoch: foundation.object(object_id).local_epoch,
        object: object_id,
        cache_key: if cacheable { name } else { None },
        pins: None,
    };

    if cacheable {
        if let Some(name) = name {
            cache::mark_checked_out(foundation, object_id, name);
        }
    }

    Some(context)
}

// ----------------------------------------------------------------------
// Filter collection
// ----------------------------------------------------------------------

fn collect_filters(
    foundation: &Foundation,
    object_id: ObjectId,
    chain: &mut CallChain,
    seen: &mut HashSet<NameId>,
    request_private: bool,
) {
    let object = foundation.object(object_id);

    for mixin in object.mixins.clone() {
        collect_class_filters(foundation, object_id, mixin, chain, seen, request_private);
    }
    for filter_name in object.filters.clone() {
        if seen.insert(filter_name) {
            build_simple_chain(
                foundation,
                object_id,
                filter_name,
                Mode::Protected,
                VisibilityResolution::Unknown,
                true,
                None,
                0,
                request_private,
                chain,
            );
        }
    }
    collect_class_filters(foundation, object_id, object.self_class, chain, seen, request_private);
}

fn collect_class_filters(
    foundation: &Foundation,
    object_id: ObjectId,
    class: ClassId,
    chain: &mut CallChain,
    seen: &mut HashSet<NameId>,
    request_private: bool,
) {
    let mut current = class;
    loop {
        for filter_name in foundation.class(current).filters.clone() {
            if seen.insert(filter_name) {
                build_simple_chain(
                    foundation,
                    object_id,
                    filter_name,
                    Mode::Protected,
                    VisibilityResolution::Unknown,
                    true,
                    Some(current),
                    0,
                    request_private,
                    chain,
                );
            }
        }

        let supers = foundation.class(current).superclasses.clone();
        match supers.len() {
            1 => {
                current = supers[0];
                continue;
            }
            0 => return,
            _ => {
                for super_class in supers {
                    collect_class_filters(
                        foundation,
                        object_id,
                        super_class,
                        chain,
                        seen,
                        request_private,
                    );
                }
                return;
            }
        }
    }
}

// ----------------------------------------------------------------------
// Simple-chain build
// ----------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn build_simple_chain(
    foundation: &Foundation,
    object_id: ObjectId,
    name: NameId,
    mode: Mode,
    mut resolution: VisibilityResolution,
    is_filter: bool,
    filter_declarer: Option<ClassId>,
    filter_length: usize,
    request_private: bool,
    chain: &mut CallChain,
) {
    let object = foundation.object(object_id);

    if !mode.is_special() && !resolution.is_known() {
        if let Some(&method_id) = object.methods.get(&name) {
            let is_public = foundation.method(method_id).is_public();
            if mode.wants_public() {
                if !is_public {
                    return;
                }
                resolution = VisibilityResolution::Public;
            } else {
                resolution = VisibilityResolution::Protected;
            }
        }
    }

    if !mode.is_special() {
        for mixin in object.mixins.clone() {
            build_class_simple_chain(
                foundation,
                object,
                mixin,
                name,
                mode,
                resolution,
                is_filter,
                filter_declarer,
                filter_length,
                request_private,
                chain,
            );
        }
        for mixin in foundation.class(object.self_class).mixins.clone() {
            build_class_simple_chain(
                foundation,
                object,
                mixin,
                name,
                mode,
                resolution,
                is_filter,
                filter_declarer,
                filter_length,
                request_private,
                chain,
            );
        }
        for super_class in foundation.class(object.self_class).hierarchy.clone() {
            for mixin in foundation.class(super_class).mixins.clone() {
                build_class_simple_chain(
                    foundation,
                    object,
                    mixin,
                    name,
                    mode,
                    resolution,
                    is_filter,
                    filter_declarer,
                    filter_length,
                    request_private,
                    chain,
                );
            }
        }
        if let Some(&method_id) = object.methods.get(&name) {
            append_method(
                foundation,
                object,
                Some(method_id),
                is_filter,
                filter_declarer,
                request_private,
                filter_length,
                chain,
            );
        }
    }

    build_class_simple_chain(
        foundation,
        object,
        object.self_class,
        name,
        mode,
        resolution,
        is_filter,
        filter_declarer,
        filter_length,
        request_private,
        chain,
    );
}

// ----------------------------------------------------------------------
// Class-simple-chain
// ----------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn build_class_simple_chain(
    foundation: &Foundation,
    object: &Object,
    class: ClassId,
    name: NameId,
    mode: Mode,
    mut resolution: VisibilityResolution,
    is_filter: bool,
    filter_declarer: Option<ClassId>,
    filter_length: usize,
    request_private: bool,
    chain: &mut CallChain,
) {
    let mut current = class;
    loop {
        match mode {
            Mode::Constructor => {
                let method_id = foundation.class(current).constructor;
                append_method(
                    foundation,
                    object,
                    method_id,
                    is_filter,
                    filter_declarer,
                    request_private,
                    filter_length,
                    chain,
                );
            }
            Mode::Destructor => {
                let method_id = foundation.class(current).destructor;
                append_method(
                    foundation,
                    object,
                    method_id,
                    is_filter,
                    filter_declarer,
                    request_private,
                    filter_length,
                    chain,
                );
            }
            _ => {
                if let Some(&method_id) = foundation.class(current).methods.get(&name) {
                    if !resolution.is_known() {
                        if mode.wants_public() {
                            if foundation.method(method_id).is_public() {
                                resolution = VisibilityResolution::Public;
                            } else {
                                // A hidden method from a more-derived class
                                // hides everything further up.
                                return;
                            }
                        } else {
                            resolution = VisibilityResolution::Protected;
                        }
                    }
                    append_method(
                        foundation,
                        object,
                        Some(method_id),
                        is_filter,
                        filter_declarer,
                        request_private,
                        filter_length,
                        chain,
                    );
                }
            }
        }

        let supers = foundation.class(current).superclasses.clone();
        match supers.len() {
            1 => {
                current = supers[0];
                continue;
            }
            0 => return,
            _ => {
                for super_class in supers {
                    build_class_simple_chain(
                        foundation,
                        object,
                        super_class,
                        name,
                        mode,
                        resolution,
                        is_filter,
                        filter_declarer,
                        filter_length,
                        request_private,
                        chain,
                    );
                }
                return;
            }
        }
    }
}

// ----------------------------------------------------------------------
// Appending a method: dedup + late-binding
// ----------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn append_method(
    foundation: &Foundation,
    object: &Object,
    method_id: Option<MethodId>,
    is_filter: bool,
    filter_declarer: Option<ClassId>,
    request_private: bool,
    filter_length: usize,
    chain: &mut CallChain,
) {
    let Some(method_id) = method_id else {
        return;
    };
    let method = foundation.method(method_id);
    if method.is_placeholder() {
        return;
    }

    if !request_private
        && method.is_private()
        && method
            .declaring_class
            .is_some_and(|declarer| declarer != object.self_class)
    {
        return;
    }

    // Duplicate handling: scan past the filter section only.
    if let Some(relative) = chain[filter_length..]
        .iter()
        .position(|entry| entry.method == method_id && entry.is_filter == is_filter)
    {
        let index = filter_length + relative;
        let preserved_declarer = chain[index].filter_declarer;
        let entry = chain.remove(index);
        chain.push(CallChainEntry {
            method: entry.method,
            is_filter: entry.is_filter,
            filter_declarer: preserved_declarer,
        });
        return;
    }

    chain.push(CallChainEntry::new(method_id, is_filter, filter_declarer));
}
