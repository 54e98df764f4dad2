//! PUSH operand classification.
//!
//! A PUSH operand is either an immediate literal or the name of a variable.
//! The distinction is purely syntactic:
//!
//! | Token                         | Result            |
//! |-------------------------------|-------------------|
//! | starts with `"`               | String literal    |
//! | exactly `true` / `false`      | Boolean literal   |
//! | contains `.`                  | Real literal      |
//! | starts with a digit or `-`    | Integer literal   |
//! | anything else                 | variable          |
//!
//! The rules apply in that order, so `"1.5"` is a string and `-2.5` is a real.

use std::fmt;

use crate::error::DecodeError;
use crate::kind::ValueKind;
use crate::value::Value;

/// The operand of a PUSH instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// An immediate value.
    Literal(Value),
    /// A variable to read from the variable store.
    Variable(String),
}

impl Operand {
    /// Classify a PUSH token and build the literal value if it is one.
    ///
    /// String literals have their surrounding quote pair removed. No escape
    /// sequences are processed.
    pub fn classify(token: &str) -> Result<Operand, DecodeError> {
        if let Some(rest) = token.strip_prefix('"') {
            let text = rest.strip_suffix('"').unwrap_or(rest);
            return Ok(Operand::Literal(Value::String(text.to_string())));
        }

        match token {
            "true" => return Ok(Operand::Literal(Value::Boolean(true))),
            "false" => return Ok(Operand::Literal(Value::Boolean(false))),
            _ => {}
        }

        if token.contains('.') {
            // An overflowing exponent parses to infinity, which has no literal form.
            return match token.parse::<f64>() {
                Ok(r) if r.is_finite() => Ok(Operand::Literal(Value::Real(r))),
                _ => Err(DecodeError::MalformedLiteral {
                    kind: ValueKind::Real,
                    token: token.to_string(),
                }),
            };
        }

        if token
            .as_bytes()
            .first()
            .is_some_and(|b| b.is_ascii_digit() || *b == b'-')
        {
            let i: i64 = token.parse().map_err(|_| DecodeError::MalformedLiteral {
                kind: ValueKind::Integer,
                token: token.to_string(),
            })?;
            return Ok(Operand::Literal(Value::Integer(i)));
        }

        Ok(Operand::Variable(token.to_string()))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(value) => f.write_str(&value.to_literal()),
            Operand::Variable(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(token: &str) -> Value {
        match Operand::classify(token).unwrap() {
            Operand::Literal(v) => v,
            other => panic!("expected literal for {token:?}, got {other:?}"),
        }
    }

    #[test]
    fn string_literal_strips_quotes() {
        assert_eq!(literal("\"hello\""), Value::String("hello".into()));
        assert_eq!(literal("\"a b c\""), Value::String("a b c".into()));
        assert_eq!(literal("\"\""), Value::String(String::new()));
    }

    #[test]
    fn string_literal_keeps_backslashes() {
        assert_eq!(literal(r#""a\nb""#), Value::String(r"a\nb".into()));
    }

    #[test]
    fn string_that_looks_numeric_stays_string() {
        assert_eq!(literal("\"1.5\""), Value::String("1.5".into()));
    }

    #[test]
    fn boolean_literals() {
        assert_eq!(literal("true"), Value::Boolean(true));
        assert_eq!(literal("false"), Value::Boolean(false));
    }

    #[test]
    fn capitalized_boolean_is_a_variable() {
        assert_eq!(
            Operand::classify("True").unwrap(),
            Operand::Variable("True".into())
        );
    }

    #[test]
    fn real_literals() {
        assert_eq!(literal("2.5"), Value::Real(2.5));
        assert_eq!(literal("-0.25"), Value::Real(-0.25));
        assert_eq!(literal(".5"), Value::Real(0.5));
        assert_eq!(literal("3."), Value::Real(3.0));
    }

    #[test]
    fn integer_literals() {
        assert_eq!(literal("0"), Value::Integer(0));
        assert_eq!(literal("42"), Value::Integer(42));
        assert_eq!(literal("-17"), Value::Integer(-17));
    }

    #[test]
    fn variable_references() {
        assert_eq!(
            Operand::classify("v_x0").unwrap(),
            Operand::Variable("v_x0".into())
        );
        assert_eq!(
            Operand::classify("tmp").unwrap(),
            Operand::Variable("tmp".into())
        );
    }

    #[test]
    fn malformed_real() {
        assert_eq!(
            Operand::classify("1.2.3"),
            Err(DecodeError::MalformedLiteral {
                kind: ValueKind::Real,
                token: "1.2.3".into()
            })
        );
    }

    #[test]
    fn overflowing_real_is_malformed() {
        assert_eq!(
            Operand::classify("1.0e999"),
            Err(DecodeError::MalformedLiteral {
                kind: ValueKind::Real,
                token: "1.0e999".into()
            })
        );
        assert!(Operand::classify("-1.0e999").is_err());
        assert_eq!(literal("1.0e300"), Value::Real(1.0e300));
    }

    #[test]
    fn malformed_integer() {
        assert_eq!(
            Operand::classify("12abc"),
            Err(DecodeError::MalformedLiteral {
                kind: ValueKind::Integer,
                token: "12abc".into()
            })
        );
        assert!(Operand::classify("-").is_err());
        assert!(Operand::classify("99999999999999999999").is_err());
    }

    #[test]
    fn display_renders_token() {
        assert_eq!(Operand::classify("\"x\"").unwrap().to_string(), "\"x\"");
        assert_eq!(Operand::classify("4.0").unwrap().to_string(), "4.0");
        assert_eq!(Operand::classify("v_a1").unwrap().to_string(), "v_a1");
    }
}
