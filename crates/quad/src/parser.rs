//! Parser for quad-code lines → instructions.

use crate::lexer::LineTokens;
use methanol_common::{DecodeError, Instruction, Opcode};

/// Decode one tokenized line.
///
/// Never fails: lines that cannot be decoded become
/// [`Instruction::Invalid`] so that the program keeps one instruction per
/// line and the error surfaces only if execution reaches it.
pub(crate) fn parse_line(tokens: LineTokens<'_>, text: &str) -> Instruction {
    let (mnemonic, operand) = match tokens {
        LineTokens::Blank | LineTokens::Comment => return Instruction::Nop,
        LineTokens::Statement { mnemonic, operand } => (mnemonic, operand),
    };

    let decoded = Opcode::from_mnemonic(mnemonic)
        .ok_or_else(|| DecodeError::UnknownOpcode(mnemonic.to_string()))
        .and_then(|opcode| Instruction::decode(opcode, operand));

    match decoded {
        Ok(instr) => instr,
        Err(error) => Instruction::Invalid {
            text: text.trim().to_string(),
            error,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize_line;
    use methanol_common::{Operand, Value};

    fn parse(text: &str) -> Instruction {
        parse_line(tokenize_line(text), text)
    }

    #[test]
    fn blank_and_comment_are_nops() {
        assert_eq!(parse(""), Instruction::Nop);
        assert_eq!(parse("/* if statement */"), Instruction::Nop);
    }

    #[test]
    fn label_and_def() {
        assert_eq!(parse("LABEL s0_l1:"), Instruction::Label("s0_l1".into()));
        assert_eq!(parse("DEF f_fib0:"), Instruction::Def("f_fib0".into()));
    }

    #[test]
    fn push_literal_and_variable() {
        assert_eq!(
            parse("\tPUSH -4"),
            Instruction::Push(Operand::Literal(Value::Integer(-4)))
        );
        assert_eq!(
            parse("\tPUSH v_n0"),
            Instruction::Push(Operand::Variable("v_n0".into()))
        );
    }

    #[test]
    fn unknown_opcode_becomes_invalid() {
        assert_eq!(
            parse("  FROB 1"),
            Instruction::Invalid {
                text: "FROB 1".into(),
                error: DecodeError::UnknownOpcode("FROB".into())
            }
        );
    }

    #[test]
    fn lowercase_opcode_is_invalid() {
        assert!(matches!(
            parse("push 1"),
            Instruction::Invalid {
                error: DecodeError::UnknownOpcode(_),
                ..
            }
        ));
    }

    #[test]
    fn malformed_literal_becomes_invalid() {
        assert!(matches!(
            parse("PUSH 1.2.3"),
            Instruction::Invalid {
                error: DecodeError::MalformedLiteral { .. },
                ..
            }
        ));
    }

    #[test]
    fn missing_jump_target_becomes_invalid() {
        assert_eq!(
            parse("JZ"),
            Instruction::Invalid {
                text: "JZ".into(),
                error: DecodeError::MissingOperand("JZ")
            }
        );
    }
}
