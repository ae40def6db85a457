//! Core data model: Methods, Classes, Objects, and call chains.

pub mod call_chain;
pub mod class;
pub mod method;
pub mod mode;
pub mod object;

pub use call_chain::{CallChain, CallChainEntry, CallContext, CALL_CHAIN_STATIC_SIZE};
pub use class::Class;
pub use method::{ImplementorRef, InvocationArgs, Method, MethodImplementor, StatusCode};
pub use mode::{CallFlags, ContextFlags, MethodFlags, Mode, ObjectFlags, VisibilityResolution};
pub use object::{CacheSlot, Object};
