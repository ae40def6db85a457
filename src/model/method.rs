//! Method descriptors and the implementor callback.

use std::fmt;
use std::rc::Rc;

use crate::ids::{ClassId, NameId};
use crate::model::mode::MethodFlags;

/// Result code returned by a method implementor, propagated verbatim by
/// the Invoker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    Error,
    Break,
    Continue,
    Return,
}

/// The arguments passed to an implementor for one invocation step.
pub struct InvocationArgs<'a> {
    pub argv: &'a [String],
    /// Number of leading `argv` elements to skip (typically 2: subject
    /// name and method name) before the first "real" argument.
    pub skip: usize,
}

impl<'a> InvocationArgs<'a> {
    /// The arguments past the leading `skip` elements.
    pub fn real_args(&self) -> &'a [String] {
        if self.skip >= self.argv.len() {
            &[]
        } else {
            &self.argv[self.skip..]
        }
    }
}

/// Opaque callable implementing a method body. Fully external to the
/// core: the core never inspects what an implementor does, only whether
/// it exists (`Method::is_placeholder`).
pub trait MethodImplementor {
    fn call(&self, args: &InvocationArgs<'_>) -> StatusCode;
}

/// A boxed implementor, reference-counted so a `Method` can be cheaply
/// cloned when pinned.
pub type ImplementorRef = Rc<dyn MethodImplementor>;

/// A named implementation.
///
/// A `Method` with `implementor: None` is a placeholder: it records
/// visibility only (useful for `Object::methods` entries that exist
/// purely to shadow a class's public surface) and is dropped during
/// chain-building rather than appended with nothing to call.
#[derive(Clone)]
pub struct Method {
    pub name: NameId,
    pub flags: MethodFlags,
    /// `None` when declared directly on an Object instance.
    pub declaring_class: Option<ClassId>,
    pub implementor: Option<ImplementorRef>,
}

impl Method {
    pub fn new(name: NameId, flags: MethodFlags, declaring_class: Option<ClassId>) -> Self {
        Self {
            name,
            flags,
            declaring_class,
            implementor: None,
        }
    }

    pub fn with_implementor(mut self, implementor: ImplementorRef) -> Self {
        self.implementor = Some(implementor);
        self
    }

    pub fn is_placeholder(&self) -> bool {
        self.implementor.is_none()
    }

    pub fn is_public(&self) -> bool {
        self.flags.contains(MethodFlags::PUBLIC)
    }

    pub fn is_private(&self) -> bool {
        self.flags.contains(MethodFlags::PRIVATE)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("flags", &self.flags)
            .field("declaring_class", &self.declaring_class)
            .field("is_placeholder", &self.is_placeholder())
            .finish()
    }
}
