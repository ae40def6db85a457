//! Flag types
//!
//! The reference implementation keeps one `int flags` field that mixes
//! caller intent (`PUBLIC_METHOD`/`PRIVATE_METHOD`/`CONSTRUCTOR`/
//! `DESTRUCTOR`/`FILTER_HANDLING`), build-time scratch state
//! (`DEFINITE_PUBLIC`/`DEFINITE_PROTECTED`), and an output marker
//! (`OO_UNKNOWN_METHOD`) into a single bitset. Per the spec's own design
//! note, this is decomposed here into three independent pieces so the
//! visibility-promotion logic in the Chain Builder is a pure state
//! transition instead of ad-hoc bit twiddling:
//!
//! - [`Mode`]: what kind of call this is, set by the caller of `resolve`.
//! - [`VisibilityResolution`]: build-time scratch state, starts `Unknown`
//!   and is promoted at most once per simple-chain build.
//! - [`ContextFlags`]: the bitset snapshot recorded on a finished
//!   `CallContext`, including the `UNKNOWN_METHOD` output marker.

use bitflags::bitflags;

/// The kind of call a resolution is being built for.
///
/// `Public`/`Protected`/`Private` select ordinary method dispatch with a
/// visibility requirement; `Constructor`/`Destructor` select the
/// class-hierarchy-only special-method chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Public,
    Protected,
    Private,
    Constructor,
    Destructor,
}

impl Mode {
    pub fn is_special(self) -> bool {
        matches!(self, Mode::Constructor | Mode::Destructor)
    }

    pub fn wants_public(self) -> bool {
        matches!(self, Mode::Public)
    }

    pub fn wants_private(self) -> bool {
        matches!(self, Mode::Private)
    }
}

/// The full set of flags a caller passes into `resolve`: the call `Mode`
/// plus whether we are already resolving from inside a filter body.
/// `filter_handling` is orthogonal to `Mode` — a reentrant call made from
/// within a filter still has its own public/protected/private intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallFlags {
    pub mode: Mode,
    pub filter_handling: bool,
}

impl CallFlags {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            filter_handling: false,
        }
    }

    pub fn with_filter_handling(mut self, filter_handling: bool) -> Self {
        self.filter_handling = filter_handling;
        self
    }
}

/// Build-time scratch state tracking whether a simple-chain build has
/// already promoted its visibility requirement from the object's own
/// method or a class method. Once set to `Public` or
/// `Protected`, subsequent class-simple-chain steps reuse it instead of
/// re-deriving it from whatever method they find next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityResolution {
    #[default]
    Unknown,
    Public,
    Protected,
}

impl VisibilityResolution {
    pub fn is_known(self) -> bool {
        !matches!(self, VisibilityResolution::Unknown)
    }
}

bitflags! {
    /// Visibility bits stored on a `Method`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MethodFlags: u8 {
        const PUBLIC  = 0b0000_0001;
        const PRIVATE = 0b0000_0010;
    }
}

bitflags! {
    /// Per-object runtime flags. Only `FILTER_HANDLING` is defined today,
    /// but this stays a bitset (rather than a bare `bool`) because the
    /// data model describes it as "a bitset including FILTER_HANDLING".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ObjectFlags: u8 {
        const FILTER_HANDLING = 0b0000_0001;
    }
}

bitflags! {
    /// Snapshot recorded on a finished `CallContext`: the caller's
    /// original intent plus the `UNKNOWN_METHOD` output marker.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ContextFlags: u16 {
        const PUBLIC          = 0b0000_0001;
        const PROTECTED       = 0b0000_0010;
        const PRIVATE         = 0b0000_0100;
        const CONSTRUCTOR     = 0b0000_1000;
        const DESTRUCTOR      = 0b0001_0000;
        const FILTER_HANDLING = 0b0010_0000;
        const UNKNOWN_METHOD  = 0b0100_0000;
    }
}

impl From<CallFlags> for ContextFlags {
    fn from(flags: CallFlags) -> Self {
        let mut out = match flags.mode {
            Mode::Public => ContextFlags::PUBLIC,
            Mode::Protected => ContextFlags::PROTECTED,
            Mode::Private => ContextFlags::PRIVATE,
            Mode::Constructor => ContextFlags::CONSTRUCTOR,
            Mode::Destructor => ContextFlags::DESTRUCTOR,
        };
        if flags.filter_handling {
            out |= ContextFlags::FILTER_HANDLING;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_is_special_only_for_ctor_dtor() {
        assert!(Mode::Constructor.is_special());
        assert!(Mode::Destructor.is_special());
        assert!(!Mode::Public.is_special());
        assert!(!Mode::Protected.is_special());
        assert!(!Mode::Private.is_special());
    }

    #[test]
    fn context_flags_carry_filter_handling() {
        let flags = CallFlags::new(Mode::Public).with_filter_handling(true);
        let ctx: ContextFlags = flags.into();
        assert!(ctx.contains(ContextFlags::PUBLIC));
        assert!(ctx.contains(ContextFlags::FILTER_HANDLING));
        assert!(!ctx.contains(ContextFlags::PRIVATE));
    }
}
