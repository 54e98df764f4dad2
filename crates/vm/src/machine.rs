//! VM state management: operand stack, variables, call stack, labels.

use std::collections::HashMap;
use std::io::Write;

use crate::config::VmConfig;
use crate::error::RuntimeError;
use crate::labels::LabelTable;
use methanol_common::{Instruction, Program, Value};

/// The Methanol virtual machine.
///
/// One `VM` executes one program once. All state starts empty and is
/// discarded with the machine.
pub struct VM<'a, W: Write> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    /// Label table, resolved before the first instruction runs.
    pub(crate) labels: LabelTable,
    /// Operand stack.
    pub(crate) stack: Vec<Value>,
    /// Variable store. A name exists only after its first assignment.
    pub(crate) variables: HashMap<String, Value>,
    /// Return indices pushed by CALL, popped by RET.
    pub(crate) call_stack: Vec<usize>,
    /// Program counter (instruction index).
    pub(crate) pc: usize,
    /// Runtime limits.
    pub(crate) config: VmConfig,
    /// Destination for PRINT.
    pub(crate) out: W,
}

impl<'a, W: Write> VM<'a, W> {
    /// Create a new VM with default limits.
    pub fn new(program: &'a Program, out: W) -> Self {
        Self::with_config(program, VmConfig::default(), out)
    }

    /// Create a new VM with explicit limits. Labels are resolved here.
    pub fn with_config(program: &'a Program, config: VmConfig, out: W) -> Self {
        Self {
            program,
            labels: LabelTable::resolve(program),
            stack: Vec::new(),
            variables: HashMap::new(),
            call_stack: Vec::new(),
            pc: 0,
            config,
            out,
        }
    }

    /// The operand stack, bottom first.
    pub fn stack(&self) -> &[Value] {
        &self.stack
    }

    /// Current value of a variable, if it has been assigned.
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// The resolved label table.
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Current program counter.
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Push a value onto the stack.
    pub(crate) fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    /// Pop a value from the stack.
    pub(crate) fn pop(&mut self) -> Result<Value, RuntimeError> {
        self.stack
            .pop()
            .ok_or(RuntimeError::StackUnderflow { at: self.pc })
    }

    /// Pop the two operands of a binary opcode as `(a, b)`, where `a` was
    /// pushed first. `b` comes off the stack first.
    pub(crate) fn pop_pair(&mut self) -> Result<(Value, Value), RuntimeError> {
        let b = self.pop()?;
        let a = self.pop()?;
        Ok((a, b))
    }

    /// Fetch the instruction at the current pc.
    pub(crate) fn fetch(&self) -> Option<&'a Instruction> {
        self.program.get(self.pc)
    }

    /// Look up a jump target.
    pub(crate) fn resolve(&self, label: &str) -> Result<usize, RuntimeError> {
        self.labels.get(label).ok_or_else(|| RuntimeError::UnknownLabel {
            at: self.pc,
            label: label.to_string(),
        })
    }
}
