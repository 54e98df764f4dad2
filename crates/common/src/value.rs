//! Runtime value representation for the Methanol VM.
//!
//! Values are what live on the operand stack and in the variable store.

use std::fmt;

use crate::kind::ValueKind;

/// Runtime value representation.
#[derive(Debug, Clone)]
pub enum Value {
    /// Signed 64-bit integer.
    Integer(i64),
    /// IEEE 754 64-bit float.
    Real(f64),
    /// Boolean value.
    Boolean(bool),
    /// String value, without surrounding quotes.
    String(String),
}

// Reals compare bitwise here so that Value can implement Eq and be used
// directly in test assertions. The EQ/NEQ opcodes compare reals
// numerically in the VM and do not go through this impl.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a.to_bits() == b.to_bits(),
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Real(_) => ValueKind::Real,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::String(_) => ValueKind::String,
        }
    }

    /// Truthiness used by JZ, JNZ, AND, OR and NOT.
    ///
    /// Zero, `0.0`, `false` and the empty string are false; everything
    /// else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Integer(i) => *i != 0,
            Value::Real(r) => *r != 0.0,
            Value::Boolean(b) => *b,
            Value::String(s) => !s.is_empty(),
        }
    }

    /// Render this value as a PUSH operand token that classifies back to
    /// the same value. Non-finite reals have no literal form.
    pub fn to_literal(&self) -> String {
        match self {
            Value::Integer(i) => i.to_string(),
            Value::Real(r) => real_literal(*r),
            Value::Boolean(b) => b.to_string(),
            Value::String(s) => format!("\"{s}\""),
        }
    }
}

/// Reals must always carry a `.` to be recognized as such.
fn real_literal(r: f64) -> String {
    let text = format!("{r:?}");
    if text.contains('.') || !r.is_finite() {
        return text;
    }
    match text.find('e') {
        Some(pos) => format!("{}.0{}", &text[..pos], &text[pos..]),
        None => format!("{text}.0"),
    }
}

/// The form PRINT writes to standard output.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r:?}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(Value::Integer(42).kind(), ValueKind::Integer);
        assert_eq!(Value::Real(3.5).kind(), ValueKind::Real);
        assert_eq!(Value::Boolean(true).kind(), ValueKind::Boolean);
        assert_eq!(Value::String("hi".into()).kind(), ValueKind::String);
    }

    #[test]
    fn equality_real_bitwise() {
        assert_eq!(Value::Real(2.5), Value::Real(2.5));
        assert_ne!(Value::Real(0.0), Value::Real(-0.0));
    }

    #[test]
    fn equality_different_kinds() {
        assert_ne!(Value::Integer(1), Value::Real(1.0));
        assert_ne!(Value::Boolean(true), Value::Integer(1));
        assert_ne!(Value::String("1".into()), Value::Integer(1));
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Integer(0).is_truthy());
        assert!(Value::Integer(-3).is_truthy());
        assert!(!Value::Real(0.0).is_truthy());
        assert!(Value::Real(0.1).is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
        assert!(Value::Boolean(true).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
        assert!(Value::String("x".into()).is_truthy());
    }

    #[test]
    fn display_print_forms() {
        assert_eq!(Value::Integer(-7).to_string(), "-7");
        assert_eq!(Value::Real(7.0).to_string(), "7.0");
        assert_eq!(Value::Real(2.5).to_string(), "2.5");
        assert_eq!(Value::Boolean(false).to_string(), "false");
        assert_eq!(Value::String("hello world".into()).to_string(), "hello world");
    }

    #[test]
    fn literal_forms() {
        assert_eq!(Value::Integer(12).to_literal(), "12");
        assert_eq!(Value::Real(3.0).to_literal(), "3.0");
        assert_eq!(Value::Real(1e300).to_literal(), "1.0e300");
        assert_eq!(Value::Boolean(true).to_literal(), "true");
        assert_eq!(Value::String("a b".into()).to_literal(), "\"a b\"");
    }
}
