//! Methanol quad loader: quad-code text to [`Program`] and back.
//!
//! Loading is a mechanical line-by-line decode. It never rejects a program:
//! a line that cannot be decoded is kept as
//! [`Instruction::Invalid`](methanol_common::Instruction::Invalid) so that
//! instruction indices stay equal to line numbers and the VM can report the
//! problem when (and only if) execution reaches it. Use [`diagnostics`] to
//! find such lines up front.
//!
//! # Usage
//!
//! ```
//! use methanol_quad::{listing, parse};
//!
//! let text = "\tPUSH 1\n\tPRINT\n";
//! let program = parse(text);
//! assert_eq!(program.len(), 2);
//! assert_eq!(listing(&program), text);
//! ```

pub mod error;

mod lexer;
mod listing;
mod parser;

pub use error::LoadError;
pub use listing::listing;

use std::fs;
use std::path::Path;

use lexer::tokenize_line;
use methanol_common::{DecodeError, Program};
use parser::parse_line;

/// Parse quad-code text into a program, one instruction per line.
pub fn parse(text: &str) -> Program {
    parse_lines(text.lines())
}

/// Parse an ordered sequence of lines into a program.
pub fn parse_lines<I, S>(lines: I) -> Program
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let instructions = lines
        .into_iter()
        .map(|line| {
            let line = line.as_ref();
            parse_line(tokenize_line(line), line)
        })
        .collect();
    Program::new(instructions)
}

/// Read and parse a `.quad` file.
pub fn load_file(path: impl AsRef<Path>) -> Result<Program, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(parse(&text))
}

/// An undecodable line found by [`diagnostics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// One-based line number.
    pub line: usize,
    /// The trimmed line text.
    pub text: String,
    /// Why the line could not be decoded.
    pub error: DecodeError,
}

/// List every undecodable line of a program.
pub fn diagnostics(program: &Program) -> Vec<Diagnostic> {
    program
        .instructions
        .iter()
        .enumerate()
        .filter_map(|(i, instr)| match instr {
            methanol_common::Instruction::Invalid { text, error } => Some(Diagnostic {
                line: i + 1,
                text: text.clone(),
                error: error.clone(),
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use methanol_common::{Instruction, Operand, Value};

    #[test]
    fn parse_keeps_one_instruction_per_line() {
        let program = parse("/* header */\n\n\tPUSH 1\nLABEL end:\n");
        assert_eq!(
            program.instructions,
            vec![
                Instruction::Nop,
                Instruction::Nop,
                Instruction::Push(Operand::Literal(Value::Integer(1))),
                Instruction::Label("end".into()),
            ]
        );
    }

    #[test]
    fn parse_lines_accepts_owned_strings() {
        let lines = vec!["PUSH 2".to_string(), "PRINT".to_string()];
        let program = parse_lines(lines);
        assert_eq!(program.len(), 2);
        assert_eq!(program.instructions[1], Instruction::Print);
    }

    #[test]
    fn parse_handles_crlf() {
        let program = parse("PUSH 1\r\nPRINT\r\n");
        assert_eq!(program.instructions[1], Instruction::Print);
    }

    #[test]
    fn diagnostics_uses_one_based_lines() {
        let program = parse("PUSH 1\nBOGUS\nPRINT\nJMP\n");
        let found = diagnostics(&program);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].line, 2);
        assert_eq!(found[0].text, "BOGUS");
        assert_eq!(found[0].error, DecodeError::UnknownOpcode("BOGUS".into()));
        assert_eq!(found[1].line, 4);
        assert_eq!(found[1].error, DecodeError::MissingOperand("JMP"));
    }

    #[test]
    fn diagnostics_empty_for_valid_program() {
        assert!(diagnostics(&parse("PUSH 1\nPRINT\n")).is_empty());
    }

    #[test]
    fn load_missing_file() {
        let err = load_file("/nonexistent/prog.quad").unwrap_err();
        assert!(matches!(err, LoadError::Io { ref path, .. } if path == "/nonexistent/prog.quad"));
    }
}
