//! Configuration surface.
//!
//! `Foundation::builder()` lets a host set the unknown-method name and
//! the default invocation mode before the first object is created. This
//! is an in-process embedding API, not a standalone service — there is
//! no file or environment configuration to load.

use crate::foundation::Foundation;
use crate::model::Mode;

/// Builder for a [`Foundation`].
pub struct FoundationBuilder {
    unknown_method_name: String,
    default_mode: Mode,
}

impl FoundationBuilder {
    pub fn new() -> Self {
        Self {
            unknown_method_name: "unknown".to_string(),
            default_mode: Mode::Public,
        }
    }

    /// Overrides the fallback name consulted when a requested method has
    /// no implementation anywhere in the chain (default: `"unknown"`).
    pub fn unknown_method_name(mut self, name: impl Into<String>) -> Self {
        self.unknown_method_name = name.into();
        self
    }

    /// Overrides the invocation mode used by hosts that don't specify
    /// one explicitly (default: `Mode::Public`).
    pub fn default_mode(mut self, mode: Mode) -> Self {
        self.default_mode = mode;
        self
    }

    pub fn default_mode_value(&self) -> Mode {
        self.default_mode
    }

    pub fn build(self) -> Foundation {
        Foundation::new(&self.unknown_method_name)
    }
}

impl Default for FoundationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_unknown_method_name_is_unknown() {
        let f = FoundationBuilder::new().build();
        assert_eq!(f.name_str(f.unknown_method_name()), "unknown");
    }

    #[test]
    fn custom_unknown_method_name_is_honored() {
        let f = FoundationBuilder::new()
            .unknown_method_name("doesNotUnderstand")
            .build();
        assert_eq!(f.name_str(f.unknown_method_name()), "doesNotUnderstand");
    }

    #[test]
    fn default_mode_defaults_to_public() {
        assert_eq!(FoundationBuilder::new().default_mode_value(), Mode::Public);
    }
}
