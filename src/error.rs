//! Error model
//!
//! Dispatch itself never fails: an empty call chain, a hidden private
//! method, or a missing constructor are ordinary outcomes represented as
//! `Option::None`/a shorter chain. The one error this module defines is
//! for a host *programming* mistake made against the structural mutation
//! API: wiring a cycle into the superclass graph.

use std::fmt;

use crate::ids::ClassId;

/// A structural-mutation error raised by `Foundation`'s builder APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// A superclass edge would make the class hierarchy cyclic.
    CyclicHierarchy { class: ClassId },
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionError::CyclicHierarchy { class } => {
                write!(f, "class {class:?} has a cyclic superclass chain")
            }
        }
    }
}

impl std::error::Error for ResolutionError {}

pub type Result<T> = std::result::Result<T, ResolutionError>;
