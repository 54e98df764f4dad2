//! Diagnostic logging setup.
//!
//! Logs go to stderr so they never interleave with PRINT output on stdout.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or empty.
pub const DEFAULT_FILTER: &str = "warn";

/// Directive added by `--trace`.
pub const TRACE_DIRECTIVE: &str = "methanol_vm=trace";

/// Build the filter directive string from `RUST_LOG` and `--trace`.
pub fn directives(env: Option<&str>, trace: bool) -> String {
    let base = env
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_FILTER);
    if trace {
        format!("{base},{TRACE_DIRECTIVE}")
    } else {
        base.to_string()
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(trace: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(directives(env.as_deref(), trace))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_warn() {
        assert_eq!(directives(None, false), "warn");
        assert_eq!(directives(Some("  "), false), "warn");
    }

    #[test]
    fn env_overrides_default() {
        assert_eq!(directives(Some("debug"), false), "debug");
    }

    #[test]
    fn trace_appends_vm_directive() {
        assert_eq!(directives(None, true), "warn,methanol_vm=trace");
        assert_eq!(
            directives(Some("info"), true),
            "info,methanol_vm=trace"
        );
    }
}
