//! Line splitter for quad-code text.

/// The shape of a single quad-code line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineTokens<'a> {
    /// Empty or whitespace-only.
    Blank,
    /// Starts with `/*`.
    Comment,
    /// A mnemonic and the rest of the line as its operand.
    Statement {
        mnemonic: &'a str,
        operand: Option<&'a str>,
    },
}

/// Split one line into its mnemonic and operand.
///
/// Leading and trailing whitespace is ignored. The operand is everything
/// after the first run of whitespace, so quoted strings keep their spaces.
pub(crate) fn tokenize_line(line: &str) -> LineTokens<'_> {
    let line = line.trim();

    if line.is_empty() {
        return LineTokens::Blank;
    }
    if line.starts_with("/*") {
        return LineTokens::Comment;
    }

    match line.split_once(char::is_whitespace) {
        Some((mnemonic, rest)) => {
            let rest = rest.trim_start();
            LineTokens::Statement {
                mnemonic,
                operand: (!rest.is_empty()).then_some(rest),
            }
        }
        None => LineTokens::Statement {
            mnemonic: line,
            operand: None,
        },
    }
}
