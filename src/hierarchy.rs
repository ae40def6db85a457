//! Hierarchy Cache
//!
//! Builds, for a `Class`, the flat ancestor sequence used by dispatch.
//! This is *not* C3 linearization: ordering is "depth-first with
//! later-duplicate preservation" — given diamond `D -> {B, C}; B -> A;
//! C -> A`, the hierarchy of `D` is `[B, C, A]` because the `A` that
//! would appear right after `B` is dropped in favor of the one that
//! appears again after `C`.

use std::collections::HashSet;

use log::trace;

use crate::error::{ResolutionError, Result};
use crate::foundation::Foundation;
use crate::ids::ClassId;

/// Ensures `class.hierarchy` is up to date with `foundation.global_epoch`,
/// rebuilding it (and any stale superclass hierarchies it depends on) if
/// necessary.
pub fn ensure_hierarchy(foundation: &mut Foundation, class: ClassId) -> Result<()> {
    let mut building = HashSet::new();
    build(foundation, class, &mut building)
}

fn build(foundation: &mut Foundation, class: ClassId, building: &mut HashSet<ClassId>) -> Result<()> {
    if class == foundation.object_class() {
        return Ok(());
    }
    if foundation.class(class).hierarchy_epoch == foundation.global_epoch() {
        return Ok(());
    }
    if !building.insert(class) {
        return Err(ResolutionError::CyclicHierarchy { class });
    }

    let supers = foundation.class(class).superclasses.clone();
    for super_class in &supers {
        build(foundation, *super_class, building)?;
    }

    let hierarchy = match supers.as_slice() {
        [only] => {
            let mut h = Vec::with_capacity(1 + foundation.class(*only).hierarchy.len());
            h.push(*only);
            h.extend(foundation.class(*only).hierarchy.iter().copied());
            h
        }
        _ => {
            let mut concatenated = Vec::new();
            for super_class in &supers {
                concatenated.push(*super_class);
                concatenated.extend(foundation.class(*super_class).hierarchy.iter().copied());
            }
            right_preserving_dedup(concatenated)
        }
    };

    trace!("hierarchy for {class:?}: {hierarchy:?}");
    let epoch = foundation.global_epoch();
    let c = foundation.class_mut(class);
    c.hierarchy = hierarchy;
    c.hierarchy_epoch = epoch;
    building.remove(&class);
    Ok(())
}

/// Drops every occurrence of a value except the last one, preserving
/// relative order of the survivors.
fn right_preserving_dedup(list: Vec<ClassId>) -> Vec<ClassId> {
    let mut out = Vec::with_capacity(list.len());
    for (i, &item) in list.iter().enumerate() {
        if list[i + 1..].contains(&item) {
            continue;
        }
        out.push(item);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(foundation: &Foundation, class: ClassId) -> Vec<ClassId> {
        foundation.class(class).hierarchy.clone()
    }

    #[test]
    fn linear_chain() {
        let mut f = Foundation::new("unknown");
        let a = f.new_class();
        let b = f.new_class();
        f.add_superclass(b, a).unwrap();

        ensure_hierarchy(&mut f, b).unwrap();
        assert_eq!(chain(&f, b), vec![a]);
    }

    #[test]
    fn diamond_dedup_keeps_last_occurrence() {
        let mut f = Foundation::new("unknown");
        let a = f.new_class();
        let b = f.new_class();
        let c = f.new_class();
        let d = f.new_class();
        f.add_superclass(b, a).unwrap();
        f.add_superclass(c, a).unwrap();
        f.add_superclass(d, b).unwrap();
        f.add_superclass(d, c).unwrap();

        ensure_hierarchy(&mut f, d).unwrap();
        assert_eq!(chain(&f, d), vec![b, c, a]);
    }

    #[test]
    fn object_class_has_no_work() {
        let mut f = Foundation::new("unknown");
        let root = f.object_class();
        ensure_hierarchy(&mut f, root).unwrap();
        assert!(chain(&f, root).is_empty());
    }

    #[test]
    fn rebuild_is_skipped_within_same_epoch() {
        let mut f = Foundation::new("unknown");
        let a = f.new_class();
        let b = f.new_class();
        f.add_superclass(b, a).unwrap();
        ensure_hierarchy(&mut f, b).unwrap();
        let epoch_after_first = f.class(b).hierarchy_epoch;

        // Re-running without any structural change should be a no-op.
        ensure_hierarchy(&mut f, b).unwrap();
        assert_eq!(f.class(b).hierarchy_epoch, epoch_after_first);
    }

    #[test]
    fn epoch_bump_triggers_rebuild() {
        let mut f = Foundation::new("unknown");
        let a = f.new_class();
        let b = f.new_class();
        let e = f.new_class();
        f.add_superclass(b, a).unwrap();
        ensure_hierarchy(&mut f, b).unwrap();
        assert_eq!(chain(&f, b), vec![a]);

        f.add_superclass(a, e).unwrap();
        ensure_hierarchy(&mut f, b).unwrap();
        assert_eq!(chain(&f, b), vec![a, e]);
    }
}
