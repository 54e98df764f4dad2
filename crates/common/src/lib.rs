//! Methanol common types.
//!
//! This crate provides the foundational data structures for Methanol quad
//! code:
//!
//! - [`Opcode`]: the instruction mnemonics
//! - [`Instruction`]: one decoded line of quad code
//! - [`Operand`]: PUSH operand classification (literal vs. variable)
//! - [`Value`] / [`ValueKind`]: runtime values for the VM stack
//! - [`Program`]: a sequence of instructions
//! - [`DecodeError`]: why a line could not be decoded

pub mod error;
pub mod instruction;
pub mod kind;
pub mod opcode;
pub mod operand;
pub mod program;
pub mod value;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use instruction::Instruction;
pub use kind::ValueKind;
pub use opcode::{Opcode, OperandKind};
pub use operand::Operand;
pub use program::Program;
pub use value::Value;
