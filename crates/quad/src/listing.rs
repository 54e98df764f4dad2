//! Listing: program → canonical quad-code text.
//!
//! One line per instruction, so line numbers in the listing match
//! instruction indices. LABEL and DEF sit flush-left; everything else is
//! indented with a tab. Comments are not preserved and list as blank lines.

use methanol_common::{Instruction, Program};

/// Render a program as canonical quad-code text.
///
/// For programs without invalid lines, `parse(&listing(p)) == p`.
pub fn listing(program: &Program) -> String {
    let mut out = String::new();
    for instr in &program.instructions {
        match instr {
            Instruction::Nop => {}
            Instruction::Label(_) | Instruction::Def(_) => out.push_str(&instr.to_string()),
            _ => {
                out.push('\t');
                out.push_str(&instr.to_string());
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use methanol_common::{Operand, Value};

    #[test]
    fn empty_program_lists_nothing() {
        assert_eq!(listing(&Program::default()), "");
    }

    #[test]
    fn labels_flush_left_instructions_indented() {
        let program = Program::new(vec![
            Instruction::Label("top".into()),
            Instruction::Push(Operand::Literal(Value::Integer(1))),
            Instruction::Nop,
            Instruction::Jmp("top".into()),
        ]);
        assert_eq!(listing(&program), "LABEL top:\n\tPUSH 1\n\n\tJMP top\n");
    }
}
