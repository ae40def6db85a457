//! Stable arena keys
//!
//! Classes, Objects, Methods, and interned name Symbols all live in
//! `slotmap::SlotMap` arenas owned by [`crate::foundation::Foundation`] and
//! [`crate::interner::Interner`]. Addressing them by key instead of by
//! pointer sidesteps the ownership cycles a naive `Rc<RefCell<_>>` graph
//! would create (a Class's `declaring_class` back-reference, an Object's
//! `self_class` reference) and makes epoch bumps cheap integer writes.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a `Class` in `Foundation::classes`.
    pub struct ClassId;

    /// Key for an `Object` in `Foundation::objects`.
    pub struct ObjectId;

    /// Key for a `Method` in `Foundation::methods`.
    pub struct MethodId;

    /// Key for an interned name in `Foundation::names`.
    pub struct NameId;
}

/// An interned method/filter name. Cheap to copy and compare.
pub type Symbol = NameId;
