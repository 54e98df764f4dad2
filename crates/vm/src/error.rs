//! Runtime errors for the Methanol VM.
//!
//! Every error is fatal to the run. Every variant carries the index (`at`)
//! of the instruction that failed, which is also its zero-based line number.

use methanol_common::DecodeError;
use thiserror::Error;

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// PUSH of a variable that was never assigned.
    #[error("variable '{name}' is used without being initialized at instruction {at}")]
    UninitializedVariable { at: usize, name: String },

    /// DIV with a zero divisor (Integer 0 or Real 0.0).
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: usize },

    /// JMP, JZ, JNZ or CALL to a name no LABEL or DEF declares.
    #[error("unknown label '{label}' at instruction {at}")]
    UnknownLabel { at: usize, label: String },

    /// An opcode needed more operands than the stack holds.
    #[error("stack underflow at instruction {at}")]
    StackUnderflow { at: usize },

    /// RET with no pending CALL.
    #[error("RET with empty call stack at instruction {at}")]
    CallStackUnderflow { at: usize },

    /// CALL nested deeper than the configured limit.
    #[error("call depth exceeded limit {limit} at instruction {at}")]
    CallStackOverflow { at: usize, limit: usize },

    /// Execution reached a line that could not be decoded.
    #[error("invalid instruction '{text}' at instruction {at}: {error}")]
    InvalidInstruction {
        at: usize,
        text: String,
        error: DecodeError,
    },

    /// An operator was applied to value kinds it does not accept.
    #[error("{opcode} cannot operate on {operands} at instruction {at}")]
    TypeMismatch {
        at: usize,
        opcode: &'static str,
        operands: String,
    },

    /// Integer result outside the i64 range, or REAL2INT of a Real that
    /// has no Integer counterpart.
    #[error("arithmetic overflow in {opcode} at instruction {at}")]
    ArithmeticOverflow { at: usize, opcode: &'static str },

    /// PRINT could not write to its output.
    #[error("cannot write output at instruction {at}: {message}")]
    Output { at: usize, message: String },
}

impl RuntimeError {
    /// Index of the instruction that failed.
    pub fn at(&self) -> usize {
        match self {
            RuntimeError::UninitializedVariable { at, .. }
            | RuntimeError::DivisionByZero { at }
            | RuntimeError::UnknownLabel { at, .. }
            | RuntimeError::StackUnderflow { at }
            | RuntimeError::CallStackUnderflow { at }
            | RuntimeError::CallStackOverflow { at, .. }
            | RuntimeError::InvalidInstruction { at, .. }
            | RuntimeError::TypeMismatch { at, .. }
            | RuntimeError::ArithmeticOverflow { at, .. }
            | RuntimeError::Output { at, .. } => *at,
        }
    }
}
