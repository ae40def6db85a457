//! Process-wide state: arenas, the global epoch, and structural mutation.
//!
//! `Foundation` owns every `Class`, `Object`, and `Method` in
//! `slotmap::SlotMap` arenas. All structural mutation goes through its
//! methods so that `global_epoch`/`local_epoch` bumps and cycle
//! rejection stay centralized.

use std::collections::HashSet;

use log::{debug, trace, warn};
use slotmap::SlotMap;

use crate::error::{ResolutionError, Result};
use crate::ids::{ClassId, MethodId, NameId, ObjectId};
use crate::interner::Interner;
use crate::model::{Class, Method, MethodFlags, Object};

/// Process-wide object-system state: the root class, the epoch counter,
/// and the unknown-method fallback name.
pub struct Foundation {
    classes: SlotMap<ClassId, Class>,
    objects: SlotMap<ObjectId, Object>,
    methods: SlotMap<MethodId, Method>,
    names: Interner<NameId, String>,

    object_class: ClassId,
    unknown_method_name: NameId,

    /// Incremented whenever any class's structure changes. Starts at 1 so
    /// a freshly-built `Class::hierarchy_epoch` of 0 is always stale.
    global_epoch: u64,
}

impl Foundation {
    /// Entry point for the configuration surface.
    pub fn builder() -> crate::config::FoundationBuilder {
        crate::config::FoundationBuilder::new()
    }

    /// Creates a fresh `Foundation` with a root `object_class` and the
    /// given unknown-method fallback name.
    pub fn new(unknown_method_name: &str) -> Self {
        let mut classes = SlotMap::with_key();
        let object_class = classes.insert(Class::new());

        let mut names = Interner::new();
        let unknown_method_name = names.get_or_insert(&unknown_method_name.to_string());

        Self {
            classes,
            objects: SlotMap::with_key(),
            methods: SlotMap::with_key(),
            names,
            object_class,
            unknown_method_name,
            global_epoch: 1,
        }
    }

    // ------------------------------------------------------------------
    // Basic accessors
    // ------------------------------------------------------------------

    pub fn object_class(&self) -> ClassId {
        self.object_class
    }

    pub fn unknown_method_name(&self) -> NameId {
        self.unknown_method_name
    }

    pub fn global_epoch(&self) -> u64 {
        self.global_epoch
    }

    pub fn intern(&mut self, name: &str) -> NameId {
        self.names.get_or_insert(&name.to_string())
    }

    pub fn name_str(&self, id: NameId) -> &str {
        self.names.get(id).map(String::as_str).unwrap_or("")
    }

    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id]
    }

    pub fn class_mut(&mut self, id: ClassId) -> &mut Class {
        &mut self.classes[id]
    }

    pub fn object(&self, id: ObjectId) -> &Object {
        &self.objects[id]
    }

    pub fn object_mut(&mut self, id: ObjectId) -> &mut Object {
        &mut self.objects[id]
    }

    pub fn method(&self, id: MethodId) -> &Method {
        &self.methods[id]
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    pub fn new_class(&mut self) -> ClassId {
        let id = self.classes.insert(Class::new());
        self.bump_global_epoch();
        id
    }

    pub fn new_object(&mut self, self_class: ClassId) -> ObjectId {
        self.objects.insert(Object::new(self_class))
    }

    pub fn new_method(
        &mut self,
        name: NameId,
        flags: MethodFlags,
        declaring_class: Option<ClassId>,
    ) -> MethodId {
        self.methods.insert(Method::new(name, flags, declaring_class))
    }

    pub fn method_mut(&mut self, id: MethodId) -> &mut Method {
        &mut self.methods[id]
    }

    // ------------------------------------------------------------------
    // Structural mutation (bumps global_epoch)
    // ------------------------------------------------------------------

    /// Appends `super_class` to `class`'s superclasses. Rejects the edge
    /// if it would make the hierarchy cyclic.
    pub fn add_superclass(&mut self, class: ClassId, super_class: ClassId) -> Result<()> {
        if class == super_class || self.reaches(super_class, class) {
            warn!("rejected cyclic superclass edge {class:?} -> {super_class:?}");
            return Err(ResolutionError::CyclicHierarchy { class });
        }
        self.classes[class].superclasses.push(super_class);
        self.bump_global_epoch();
        Ok(())
    }

    pub fn add_class_mixin(&mut self, class: ClassId, mixin: ClassId) {
        self.classes[class].mixins.push(mixin);
        self.bump_global_epoch();
    }

    pub fn add_class_filter(&mut self, class: ClassId, filter_name: NameId) {
        self.classes[class].filters.push(filter_name);
        self.bump_global_epoch();
    }

    pub fn set_class_method(&mut self, class: ClassId, name: NameId, method: MethodId) {
        self.classes[class].methods.insert(name, method);
        self.bump_global_epoch();
    }

    pub fn set_constructor(&mut self, class: ClassId, method: MethodId) {
        self.classes[class].constructor = Some(method);
        self.bump_global_epoch();
    }

    pub fn set_destructor(&mut self, class: ClassId, method: MethodId) {
        self.classes[class].destructor = Some(method);
        self.bump_global_epoch();
    }

    // ------------------------------------------------------------------
    // Object mutation (bumps local_epoch)
    // ------------------------------------------------------------------

    pub fn add_object_mixin(&mut self, object: ObjectId, mixin: ClassId) {
        self.objects[object].mixins.push(mixin);
        self.bump_local_epoch(object);
    }

    pub fn add_object_filter(&mut self, object: ObjectId, filter_name: NameId) {
        self.objects[object].filters.push(filter_name);
        self.bump_local_epoch(object);
    }

    pub fn set_object_method(&mut self, object: ObjectId, name: NameId, method: MethodId) {
        self.objects[object].methods.insert(name, method);
        self.bump_local_epoch(object);
    }

    // ------------------------------------------------------------------
    // Epochs
    // ------------------------------------------------------------------

    pub fn bump_global_epoch(&mut self) {
        self.global_epoch += 1;
        trace!("global_epoch -> {}", self.global_epoch);
    }

    pub fn bump_local_epoch(&mut self, object: ObjectId) {
        let obj = &mut self.objects[object];
        obj.local_epoch += 1;
        debug!("object {object:?} local_epoch -> {}", obj.local_epoch);
    }

    /// True if `target` is reachable from `start` by following
    /// superclass edges. Used by `add_superclass` to reject cycles before
    /// they are ever written into the graph.
    fn reaches(&self, start: ClassId, target: ClassId) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            stack.extend(self.classes[current].superclasses.iter().copied());
        }
        false
    }
}
