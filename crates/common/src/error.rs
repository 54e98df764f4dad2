//! Decode errors for Methanol quad-code lines.

use thiserror::Error;

use crate::kind::ValueKind;

/// Why a line of quad code could not be decoded into an instruction.
///
/// Undecodable lines are kept in the program as
/// [`Instruction::Invalid`](crate::Instruction::Invalid); the VM reports
/// the error only if execution reaches them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Opcode mnemonic not recognized. Mnemonics are case-sensitive.
    #[error("unknown opcode '{0}'")]
    UnknownOpcode(String),

    /// Opcode requires an operand but none was given.
    #[error("{0} expects an operand")]
    MissingOperand(&'static str),

    /// Opcode takes no operand but one was given.
    #[error("{opcode} takes no operand (found '{operand}')")]
    UnexpectedOperand {
        opcode: &'static str,
        operand: String,
    },

    /// Token looks like a numeric literal but does not parse as one.
    #[error("malformed {kind} literal '{token}'")]
    MalformedLiteral { kind: ValueKind, token: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_opcode() {
        assert_eq!(
            DecodeError::UnknownOpcode("FOO".to_string()).to_string(),
            "unknown opcode 'FOO'"
        );
    }

    #[test]
    fn display_missing_operand() {
        assert_eq!(
            DecodeError::MissingOperand("JMP").to_string(),
            "JMP expects an operand"
        );
    }

    #[test]
    fn display_unexpected_operand() {
        assert_eq!(
            DecodeError::UnexpectedOperand {
                opcode: "DUP",
                operand: "x".to_string()
            }
            .to_string(),
            "DUP takes no operand (found 'x')"
        );
    }

    #[test]
    fn display_malformed_literal() {
        assert_eq!(
            DecodeError::MalformedLiteral {
                kind: ValueKind::Real,
                token: "1.2.3".to_string()
            }
            .to_string(),
            "malformed Real literal '1.2.3'"
        );
    }
}
