//! Value kinds for the Methanol runtime.
//!
//! A kind names the variant of a [`Value`](crate::Value) without its payload.
//! The VM reports kinds in type mismatch errors.

use std::fmt;

/// The runtime type of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Signed 64-bit integer.
    Integer,
    /// IEEE 754 64-bit float.
    Real,
    /// Boolean.
    Boolean,
    /// Text, stored without its surrounding quotes.
    String,
}

impl ValueKind {
    /// Returns the human-readable name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ValueKind::Integer => "Integer",
            ValueKind::Real => "Real",
            ValueKind::Boolean => "Boolean",
            ValueKind::String => "String",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
