//! Decoded quad-code instructions.
//!
//! Every line of quad code decodes to exactly one [`Instruction`], so an
//! instruction's index in a [`Program`](crate::Program) equals its
//! zero-based line number:
//! ```text
//! /* while statement */      -> Nop
//! LABEL s0_l1:               -> Label("s0_l1")
//! 	PUSH v_i0                -> Push(Variable("v_i0"))
//! 	JZ s0_l2                 -> Jz("s0_l2")
//! ```

use std::fmt;

use crate::error::DecodeError;
use crate::opcode::{Opcode, OperandKind};
use crate::operand::Operand;

/// A single decoded line of quad code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Blank line or `/*` comment.
    Nop,
    /// `LABEL name:` jump target.
    Label(String),
    /// `DEF name:` subroutine entry.
    Def(String),
    /// `PUSH operand`.
    Push(Operand),
    /// `POP` (discard) or `POP name` (store into a variable).
    Pop(Option<String>),
    Dup,
    Print,
    Plus,
    Minus,
    Mult,
    Div,
    Neg,
    Lt,
    Gt,
    Lteq,
    Gteq,
    Eq,
    Neq,
    And,
    Or,
    Not,
    Int2Real,
    Real2Int,
    Jmp(String),
    Jz(String),
    Jnz(String),
    Call(String),
    Ret,
    /// A line that could not be decoded. Executing it is a runtime error.
    Invalid {
        /// The trimmed source text.
        text: String,
        /// Why decoding failed.
        error: DecodeError,
    },
}

impl Instruction {
    /// Build an instruction from an opcode and its raw operand token.
    ///
    /// `operand` is the remainder of the line after the mnemonic, already
    /// trimmed; `None` or an empty string both mean "no operand".
    pub fn decode(opcode: Opcode, operand: Option<&str>) -> Result<Self, DecodeError> {
        let operand = operand.filter(|s| !s.is_empty());

        match opcode.operand_kind() {
            OperandKind::None => {
                if let Some(extra) = operand {
                    return Err(DecodeError::UnexpectedOperand {
                        opcode: opcode.mnemonic(),
                        operand: extra.to_string(),
                    });
                }
            }
            OperandKind::Declaration | OperandKind::Target | OperandKind::Value => {
                if operand.is_none() {
                    return Err(DecodeError::MissingOperand(opcode.mnemonic()));
                }
            }
            OperandKind::OptionalVariable => {}
        }

        let required = || operand.unwrap_or_default().to_string();

        let instr = match opcode {
            Opcode::Label | Opcode::Def => {
                let name = declared_name(operand.unwrap_or_default());
                if name.is_empty() {
                    return Err(DecodeError::MissingOperand(opcode.mnemonic()));
                }
                if opcode == Opcode::Label {
                    Instruction::Label(name.to_string())
                } else {
                    Instruction::Def(name.to_string())
                }
            }
            Opcode::Push => Instruction::Push(Operand::classify(operand.unwrap_or_default())?),
            Opcode::Pop => Instruction::Pop(operand.map(str::to_string)),
            Opcode::Dup => Instruction::Dup,
            Opcode::Print => Instruction::Print,
            Opcode::Plus => Instruction::Plus,
            Opcode::Minus => Instruction::Minus,
            Opcode::Mult => Instruction::Mult,
            Opcode::Div => Instruction::Div,
            Opcode::Neg => Instruction::Neg,
            Opcode::Lt => Instruction::Lt,
            Opcode::Gt => Instruction::Gt,
            Opcode::Lteq => Instruction::Lteq,
            Opcode::Gteq => Instruction::Gteq,
            Opcode::Eq => Instruction::Eq,
            Opcode::Neq => Instruction::Neq,
            Opcode::And => Instruction::And,
            Opcode::Or => Instruction::Or,
            Opcode::Not => Instruction::Not,
            Opcode::Int2Real => Instruction::Int2Real,
            Opcode::Real2Int => Instruction::Real2Int,
            Opcode::Jmp => Instruction::Jmp(required()),
            Opcode::Jz => Instruction::Jz(required()),
            Opcode::Jnz => Instruction::Jnz(required()),
            Opcode::Call => Instruction::Call(required()),
            Opcode::Ret => Instruction::Ret,
        };

        Ok(instr)
    }

    /// The opcode of this instruction, or `None` for no-ops and invalid lines.
    pub fn opcode(&self) -> Option<Opcode> {
        let op = match self {
            Instruction::Nop | Instruction::Invalid { .. } => return None,
            Instruction::Label(_) => Opcode::Label,
            Instruction::Def(_) => Opcode::Def,
            Instruction::Push(_) => Opcode::Push,
            Instruction::Pop(_) => Opcode::Pop,
            Instruction::Dup => Opcode::Dup,
            Instruction::Print => Opcode::Print,
            Instruction::Plus => Opcode::Plus,
            Instruction::Minus => Opcode::Minus,
            Instruction::Mult => Opcode::Mult,
            Instruction::Div => Opcode::Div,
            Instruction::Neg => Opcode::Neg,
            Instruction::Lt => Opcode::Lt,
            Instruction::Gt => Opcode::Gt,
            Instruction::Lteq => Opcode::Lteq,
            Instruction::Gteq => Opcode::Gteq,
            Instruction::Eq => Opcode::Eq,
            Instruction::Neq => Opcode::Neq,
            Instruction::And => Opcode::And,
            Instruction::Or => Opcode::Or,
            Instruction::Not => Opcode::Not,
            Instruction::Int2Real => Opcode::Int2Real,
            Instruction::Real2Int => Opcode::Real2Int,
            Instruction::Jmp(_) => Opcode::Jmp,
            Instruction::Jz(_) => Opcode::Jz,
            Instruction::Jnz(_) => Opcode::Jnz,
            Instruction::Call(_) => Opcode::Call,
            Instruction::Ret => Opcode::Ret,
        };
        Some(op)
    }

    /// The name declared by a LABEL or DEF instruction.
    pub fn declared_label(&self) -> Option<&str> {
        match self {
            Instruction::Label(name) | Instruction::Def(name) => Some(name),
            _ => None,
        }
    }

    /// The label referenced by a JMP, JZ, JNZ or CALL instruction.
    pub fn jump_target(&self) -> Option<&str> {
        match self {
            Instruction::Jmp(target)
            | Instruction::Jz(target)
            | Instruction::Jnz(target)
            | Instruction::Call(target) => Some(target),
            _ => None,
        }
    }
}

/// Strip the trailing `:` delimiter from a declared name.
fn declared_name(token: &str) -> &str {
    token.strip_suffix(':').unwrap_or(token)
}

/// Canonical text form, without indentation.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Nop => Ok(()),
            Instruction::Invalid { text, .. } => f.write_str(text),
            Instruction::Label(name) => write!(f, "LABEL {name}:"),
            Instruction::Def(name) => write!(f, "DEF {name}:"),
            Instruction::Push(operand) => write!(f, "PUSH {operand}"),
            Instruction::Pop(Some(name)) => write!(f, "POP {name}"),
            Instruction::Jmp(target)
            | Instruction::Jz(target)
            | Instruction::Jnz(target)
            | Instruction::Call(target) => {
                // opcode() is always Some for jump instructions
                let mnemonic = self.opcode().map(|op| op.mnemonic()).unwrap_or_default();
                write!(f, "{mnemonic} {target}")
            }
            other => f.write_str(other.opcode().map(|op| op.mnemonic()).unwrap_or_default()),
        }
    }
}
