//! Methanol virtual machine: executes quad-code programs.
//!
//! The VM is a stack-based machine with:
//! - An operand stack through which every instruction communicates
//! - A variable store mapping names to their last assigned value
//! - A call stack of return indices for CALL/RET
//! - A label table resolved once, before execution starts
//!
//! Execution starts at instruction 0 and ends normally when the program
//! counter runs past the last instruction. Any [`RuntimeError`] stops the
//! run immediately.
//!
//! # Usage
//!
//! ```
//! use methanol_common::{Instruction, Operand, Program, Value};
//! use methanol_vm::{run_to, VmConfig};
//!
//! let program = Program::new(vec![
//!     Instruction::Push(Operand::Literal(Value::Integer(10))),
//!     Instruction::Push(Operand::Literal(Value::Integer(3))),
//!     Instruction::Minus,
//!     Instruction::Print,
//! ]);
//!
//! let mut out = Vec::new();
//! run_to(&program, &VmConfig::default(), &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "7\n");
//! ```

pub mod config;
pub mod error;
pub mod execute;
pub mod labels;
pub mod machine;

pub use config::VmConfig;
pub use error::RuntimeError;
pub use labels::LabelTable;
pub use machine::VM;

use std::io::{self, Write};

use methanol_common::Program;

/// Execute a program with default limits, printing to standard output.
///
/// # Errors
///
/// Returns [`RuntimeError`] if execution fails (uninitialized variable,
/// division by zero, unknown label, stack underflow, etc.).
pub fn run(program: &Program) -> Result<(), RuntimeError> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    run_to(program, &VmConfig::default(), &mut lock)
}

/// Execute a program, writing PRINT output to `out`.
///
/// Output written before a failure is kept in `out`.
pub fn run_to<W: Write>(
    program: &Program,
    config: &VmConfig,
    out: &mut W,
) -> Result<(), RuntimeError> {
    let mut vm = VM::with_config(program, config.clone(), out);
    vm.execute()
}
