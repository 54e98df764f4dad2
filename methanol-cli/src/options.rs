//! Command-line option parsing.
//!
//! Every command takes one input path plus a command-specific subset of
//! flags. Flags may appear before or after the input.

use methanol_vm::VmConfig;
use thiserror::Error;

/// Environment variable naming the compiler when `--compiler` is absent.
pub const COMPILER_ENV: &str = "METHANOL_COMPILER";

/// Compiler used when neither `--compiler` nor [`COMPILER_ENV`] is set.
pub const DEFAULT_COMPILER: &str = "./methanol.exe";

/// A recognized `--flag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    MaxCallDepth,
    Trace,
    Compiler,
    KeepSym,
}

/// Flags accepted by `run`.
pub const RUN_FLAGS: &[Flag] = &[Flag::MaxCallDepth, Flag::Trace];

/// Flags accepted by `compile`.
pub const COMPILE_FLAGS: &[Flag] = &[
    Flag::MaxCallDepth,
    Flag::Trace,
    Flag::Compiler,
    Flag::KeepSym,
];

impl Flag {
    /// The flag as written on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Flag::MaxCallDepth => "--max-call-depth",
            Flag::Trace => "--trace",
            Flag::Compiler => "--compiler",
            Flag::KeepSym => "--keep-sym",
        }
    }

    pub fn from_name(s: &str) -> Option<Flag> {
        match s {
            "--max-call-depth" => Some(Flag::MaxCallDepth),
            "--trace" => Some(Flag::Trace),
            "--compiler" => Some(Flag::Compiler),
            "--keep-sym" => Some(Flag::KeepSym),
            _ => None,
        }
    }
}

/// Errors in command-line arguments. All map to exit code 1.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("missing input file")]
    MissingInput,

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("unknown option '{0}'")]
    UnknownFlag(String),

    #[error("{0} requires a value")]
    MissingValue(&'static str),

    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: &'static str, value: String },
}

/// Parsed arguments of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// The quad file (or, for `compile`, the source file).
    pub input: String,
    /// VM limits.
    pub config: VmConfig,
    /// Force trace-level VM logging.
    pub trace: bool,
    /// Compiler path given with `--compiler`.
    pub compiler: Option<String>,
    /// Keep the compiler's `.sym` file.
    pub keep_sym: bool,
}

impl Options {
    /// Parse `args`, accepting only the flags in `allowed`.
    pub fn parse(args: &[String], allowed: &[Flag]) -> Result<Options, OptionsError> {
        let mut input = None;
        let mut config = VmConfig::default();
        let mut trace = false;
        let mut compiler = None;
        let mut keep_sym = false;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            if !arg.starts_with("--") {
                if input.is_some() {
                    return Err(OptionsError::UnexpectedArgument(arg.clone()));
                }
                input = Some(arg.clone());
                continue;
            }

            let flag = Flag::from_name(arg)
                .filter(|f| allowed.contains(f))
                .ok_or_else(|| OptionsError::UnknownFlag(arg.clone()))?;

            match flag {
                Flag::Trace => trace = true,
                Flag::KeepSym => keep_sym = true,
                Flag::Compiler => {
                    let value = iter.next().ok_or(OptionsError::MissingValue(flag.name()))?;
                    compiler = Some(value.clone());
                }
                Flag::MaxCallDepth => {
                    let value = iter.next().ok_or(OptionsError::MissingValue(flag.name()))?;
                    let depth = value
                        .parse::<usize>()
                        .map_err(|_| OptionsError::InvalidValue {
                            flag: flag.name(),
                            value: value.clone(),
                        })?;
                    config = config.with_max_call_depth(depth);
                }
            }
        }

        Ok(Options {
            input: input.ok_or(OptionsError::MissingInput)?,
            config,
            trace,
            compiler,
            keep_sym,
        })
    }

    /// The compiler to invoke: `--compiler`, then `env`, then [`DEFAULT_COMPILER`].
    pub fn compiler_path(&self, env: Option<String>) -> String {
        self.compiler
            .clone()
            .or(env.filter(|s| !s.is_empty()))
            .unwrap_or_else(|| DEFAULT_COMPILER.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn input_only() {
        let opts = Options::parse(&args(&["prog.quad"]), RUN_FLAGS).unwrap();
        assert_eq!(opts.input, "prog.quad");
        assert_eq!(opts.config, VmConfig::default());
        assert!(!opts.trace);
        assert!(!opts.keep_sym);
        assert_eq!(opts.compiler, None);
    }

    #[test]
    fn flags_before_and_after_input() {
        let opts = Options::parse(
            &args(&["--trace", "prog.quad", "--max-call-depth", "12"]),
            RUN_FLAGS,
        )
        .unwrap();
        assert!(opts.trace);
        assert_eq!(opts.config.max_call_depth, 12);
    }

    #[test]
    fn compile_flags() {
        let opts = Options::parse(
            &args(&["prog.met", "--compiler", "/opt/mc", "--keep-sym"]),
            COMPILE_FLAGS,
        )
        .unwrap();
        assert_eq!(opts.compiler.as_deref(), Some("/opt/mc"));
        assert!(opts.keep_sym);
    }

    #[test]
    fn compile_flag_rejected_by_run() {
        assert_eq!(
            Options::parse(&args(&["prog.quad", "--keep-sym"]), RUN_FLAGS),
            Err(OptionsError::UnknownFlag("--keep-sym".into()))
        );
    }

    #[test]
    fn no_flags_allowed() {
        assert_eq!(
            Options::parse(&args(&["prog.quad", "--trace"]), &[]),
            Err(OptionsError::UnknownFlag("--trace".into()))
        );
    }

    #[test]
    fn missing_input() {
        assert_eq!(
            Options::parse(&args(&["--trace"]), RUN_FLAGS),
            Err(OptionsError::MissingInput)
        );
    }

    #[test]
    fn second_input_rejected() {
        assert_eq!(
            Options::parse(&args(&["a.quad", "b.quad"]), RUN_FLAGS),
            Err(OptionsError::UnexpectedArgument("b.quad".into()))
        );
    }

    #[test]
    fn missing_value() {
        assert_eq!(
            Options::parse(&args(&["prog.quad", "--max-call-depth"]), RUN_FLAGS),
            Err(OptionsError::MissingValue("--max-call-depth"))
        );
    }

    #[test]
    fn invalid_depth() {
        let err = Options::parse(&args(&["prog.quad", "--max-call-depth", "-3"]), RUN_FLAGS)
            .unwrap_err();
        assert_eq!(
            err,
            OptionsError::InvalidValue {
                flag: "--max-call-depth",
                value: "-3".into()
            }
        );
        assert_eq!(err.to_string(), "invalid value '-3' for --max-call-depth");
    }

    #[test]
    fn compiler_precedence() {
        let mut opts = Options::parse(&args(&["prog.met"]), COMPILE_FLAGS).unwrap();
        assert_eq!(opts.compiler_path(None), DEFAULT_COMPILER);
        assert_eq!(opts.compiler_path(Some(String::new())), DEFAULT_COMPILER);
        assert_eq!(opts.compiler_path(Some("/env/mc".into())), "/env/mc");

        opts.compiler = Some("/flag/mc".into());
        assert_eq!(opts.compiler_path(Some("/env/mc".into())), "/flag/mc");
    }

    #[test]
    fn flag_names_round_trip() {
        for flag in COMPILE_FLAGS {
            assert_eq!(Flag::from_name(flag.name()), Some(*flag));
        }
        assert_eq!(Flag::from_name("--verbose"), None);
    }
}
