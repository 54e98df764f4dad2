//! Label resolution: the pre-pass mapping LABEL/DEF names to indices.

use std::collections::HashMap;

use methanol_common::Program;
use tracing::debug;

/// Label and subroutine names mapped to the index of their declaration.
///
/// Built once per run by [`LabelTable::resolve`] and never mutated after.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    entries: HashMap<String, usize>,
}

impl LabelTable {
    /// Scan every instruction once, in order, and record each LABEL and DEF.
    ///
    /// A name declared more than once maps to its last declaration.
    pub fn resolve(program: &Program) -> Self {
        let mut entries = HashMap::new();

        for (index, instr) in program.instructions.iter().enumerate() {
            if let Some(name) = instr.declared_label() {
                if let Some(previous) = entries.insert(name.to_string(), index) {
                    debug!(label = name, previous, index, "label redeclared, keeping later index");
                }
            }
        }

        Self { entries }
    }

    /// The index declared for `name`.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries.get(name).copied()
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the program declares no labels.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, ordered by index.
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(name, &index)| (name.as_str(), index))
            .collect();
        entries.sort_by_key(|&(name, index)| (index, name));
        entries
    }
}
