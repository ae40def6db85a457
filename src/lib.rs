//! Method Resolution Core: class-hierarchy linearization, call-chain
//! construction (filters, mixins, visibility, late-binding), per-object
//! chain caching, and step-wise invocation.

pub mod cache;
pub mod chain_builder;
pub mod config;
pub mod error;
pub mod foundation;
pub mod hierarchy;
pub mod ids;
pub mod interner;
pub mod invoker;
pub mod model;
pub mod names;
pub mod pin;

pub use cache::{lookup as cache_lookup, release as cache_release};
pub use chain_builder::resolve;
pub use config::FoundationBuilder;
pub use error::{ResolutionError, Result};
pub use foundation::Foundation;
pub use ids::{ClassId, MethodId, NameId, ObjectId, Symbol};
pub use invoker::invoke_step;
pub use model::{
    CallChain, CallChainEntry, CallContext, CallFlags, Class, ContextFlags, ImplementorRef,
    InvocationArgs, Method, MethodFlags, MethodImplementor, Mode, Object, ObjectFlags,
    StatusCode, VisibilityResolution, CALL_CHAIN_STATIC_SIZE,
};
pub use names::{list_methods, ListFlags};
