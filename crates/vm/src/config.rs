//! VM configuration.
//!
//! Configuration specifies limits only; the dispatcher enforces them.

/// Default maximum number of pending CALLs.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 4096;

/// Runtime limits for one VM run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmConfig {
    /// Maximum call stack depth. A CALL that would exceed it fails with
    /// [`RuntimeError::CallStackOverflow`](crate::RuntimeError::CallStackOverflow).
    pub max_call_depth: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}

impl VmConfig {
    /// Create a configuration with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum call depth.
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }
}
