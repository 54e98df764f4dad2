//! Opcode definitions for the Methanol quad-code instruction set.

/// Identifies the operation to perform.
///
/// Each variant corresponds to one case-sensitive mnemonic in quad-code text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Declarations
    /// Declare a jump target. Operand: `name:`.
    Label,
    /// Declare a subroutine entry point. Operand: `name:`.
    Def,

    // Stack & variables
    /// Push a literal, or the current value of a variable.
    Push,
    /// Without operand: discard the top of stack. With operand: pop into a variable.
    Pop,
    /// Push a copy of the top of stack.
    Dup,
    /// Pop the top of stack and write it to standard output.
    Print,

    // Arithmetic
    /// Pop b, pop a, push a + b.
    Plus,
    /// Pop b, pop a, push a - b.
    Minus,
    /// Pop b, pop a, push a * b.
    Mult,
    /// Pop b, pop a, push a / b (floor division for integers).
    Div,
    /// Pop one value, push its negation.
    Neg,

    // Comparison
    /// Pop b, pop a, push a < b.
    Lt,
    /// Pop b, pop a, push a > b.
    Gt,
    /// Pop b, pop a, push a >= b.
    Lteq,
    /// Pop b, pop a, push a <= b.
    Gteq,
    /// Pop b, pop a, push a == b.
    Eq,
    /// Pop b, pop a, push a != b.
    Neq,

    // Logic
    /// Pop b, pop a, push a if a is falsy, else b.
    And,
    /// Pop b, pop a, push a if a is truthy, else b.
    Or,
    /// Pop one value, push the Boolean negation of its truthiness.
    Not,

    // Conversion
    /// Convert an Integer on top of stack to Real.
    Int2Real,
    /// Convert a Real on top of stack to Integer, truncating.
    Real2Int,

    // Control flow
    /// Unconditional jump to a label.
    Jmp,
    /// Pop; jump if the value is zero or false.
    Jz,
    /// Pop; jump if the value is non-zero or true.
    Jnz,
    /// Push the current index onto the call stack and jump.
    Call,
    /// Pop the call stack and resume after the matching CALL.
    Ret,
}

/// What an opcode expects after its mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// No operand.
    None,
    /// A declared name with a trailing `:` (LABEL, DEF).
    Declaration,
    /// A label name to jump or call to.
    Target,
    /// A literal or variable reference (PUSH).
    Value,
    /// An optional variable name (POP).
    OptionalVariable,
}

/// All valid opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 27] = [
    Opcode::Label,
    Opcode::Def,
    Opcode::Push,
    Opcode::Pop,
    Opcode::Dup,
    Opcode::Print,
    Opcode::Plus,
    Opcode::Minus,
    Opcode::Mult,
    Opcode::Div,
    Opcode::Neg,
    Opcode::Lt,
    Opcode::Gt,
    Opcode::Lteq,
    Opcode::Gteq,
    Opcode::Eq,
    Opcode::Neq,
    Opcode::And,
    Opcode::Or,
    Opcode::Not,
    Opcode::Int2Real,
    Opcode::Real2Int,
    Opcode::Jmp,
    Opcode::Jz,
    Opcode::Jnz,
    Opcode::Call,
    Opcode::Ret,
];

impl Opcode {
    /// Returns the quad-code mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Label => "LABEL",
            Opcode::Def => "DEF",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Dup => "DUP",
            Opcode::Print => "PRINT",
            Opcode::Plus => "PLUS",
            Opcode::Minus => "MINUS",
            Opcode::Mult => "MULT",
            Opcode::Div => "DIV",
            Opcode::Neg => "NEG",
            Opcode::Lt => "LT",
            Opcode::Gt => "GT",
            Opcode::Lteq => "LTEQ",
            Opcode::Gteq => "GTEQ",
            Opcode::Eq => "EQ",
            Opcode::Neq => "NEQ",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Not => "NOT",
            Opcode::Int2Real => "INT2REAL",
            Opcode::Real2Int => "REAL2INT",
            Opcode::Jmp => "JMP",
            Opcode::Jz => "JZ",
            Opcode::Jnz => "JNZ",
            Opcode::Call => "CALL",
            Opcode::Ret => "RET",
        }
    }

    /// Look up an opcode by its exact mnemonic.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        ALL_OPCODES
            .iter()
            .find(|op| op.mnemonic() == mnemonic)
            .copied()
    }

    /// The operand this opcode expects.
    pub fn operand_kind(&self) -> OperandKind {
        match self {
            Opcode::Label | Opcode::Def => OperandKind::Declaration,
            Opcode::Jmp | Opcode::Jz | Opcode::Jnz | Opcode::Call => OperandKind::Target,
            Opcode::Push => OperandKind::Value,
            Opcode::Pop => OperandKind::OptionalVariable,
            _ => OperandKind::None,
        }
    }
}
