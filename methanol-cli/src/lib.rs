//! Support code for the `methanol` binary: argument parsing and logging setup.

pub mod logging;
pub mod options;

pub use options::{Options, OptionsError};
