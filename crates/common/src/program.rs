//! Program representation for Methanol quad code.
//!
//! A program is the ordered sequence of decoded lines of a `.quad` file.
//! It is immutable once built.

use crate::instruction::Instruction;

/// A Methanol program: a sequence of instructions, one per source line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// The instruction stream.
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// Create a new program from a vector of instructions.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The instruction at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_program() {
        let program = Program::new(vec![]);
        assert!(program.is_empty());
        assert_eq!(program.len(), 0);
        assert_eq!(program.get(0), None);
    }

    #[test]
    fn len_and_get() {
        let program = Program::new(vec![Instruction::Nop, Instruction::Dup, Instruction::Print]);
        assert_eq!(program.len(), 3);
        assert!(!program.is_empty());
        assert_eq!(program.get(1), Some(&Instruction::Dup));
    }
}
