//! Name Enumerator
//!
//! Produces the sorted, deduplicated list of method names visible on an
//! object. Ported from `TclOOGetSortedMethodList`/`AddClassMethodNames`:
//! unlike the Hierarchy Cache, the reference algorithm walks superclasses
//! and mixins directly rather than through the memoized ancestor list —
//! dedup here is over *names* (first insertion wins), not over classes,
//! so there is nothing to gain from consulting the cached hierarchy.

use std::collections::HashMap;

use crate::foundation::Foundation;
use crate::ids::{ClassId, NameId, ObjectId};

/// `flags` bits recognized by the enumerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListFlags {
    /// Include only names whose effective visibility resolves to public.
    pub public_only: bool,
    /// Include private-only class methods (otherwise hidden).
    pub private: bool,
}

/// Returns the sorted, distinct list of method names visible on `object`.
pub fn list_methods(foundation: &Foundation, object: ObjectId, flags: ListFlags) -> Vec<String> {
    let mut wanted: HashMap<NameId, bool> = HashMap::new();

    // 1. Per-instance methods.
    for (&name, &method_id) in &foundation.object(object).methods {
        let method = foundation.method(method_id);
        if method.is_private() && !flags.private {
            continue;
        }
        wanted
            .entry(name)
            .or_insert_with(|| !flags.public_only || method.is_public());
    }

    // 2. Private class methods of self_class, only when PRIVATE requested.
    let self_class = foundation.object(object).self_class;
    if flags.private {
        for (&name, &method_id) in &foundation.class(self_class).methods {
            if foundation.method(method_id).is_private() {
                wanted.entry(name).or_insert(true);
            }
        }
    }

    // 3. Normal class-hierarchy + mixin walk.
    add_class_method_names(foundation, self_class, flags.public_only, &mut wanted);
    for mixin in foundation.object(object).mixins.clone() {
        add_class_method_names(foundation, mixin, flags.public_only, &mut wanted);
    }

    let mut names: Vec<String> = wanted
        .into_iter()
        .filter(|&(_, is_wanted)| !flags.public_only || is_wanted)
        .map(|(name, _)| foundation.name_str(name).to_string())
        .collect();
    names.sort();
    names
}

/// Adds the method names defined by `class` (or its superclasses and
/// mixins) to `names`, first insertion wins.
fn add_class_method_names(
    foundation: &Foundation,
    class: ClassId,
    public_only: bool,
    names: &mut HashMap<NameId, bool>,
) {
    for mixin in foundation.class(class).mixins.clone() {
        add_class_method_names(foundation, mixin, public_only, names);
    }

    let mut current = class;
    loop {
        for (&name, &method_id) in &foundation.class(current).methods {
            if !names.contains_key(&name) {
                let is_public = foundation.method(method_id).is_public();
                names.insert(name, !public_only || is_public);
            }
        }

        let supers = &foundation.class(current).superclasses;
        match supers.len() {
            1 => {
                current = supers[0];
                continue;
            }
            0 => break,
            _ => {
                for super_class in supers.clone() {
                    add_class_method_names(foundation, super_class, public_only, names);
                }
                break;
            }
        }
    }
}
