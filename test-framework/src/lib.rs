//! Runs egg scripts through the full pipeline and checks their embedded
//! `///>`/`///<` expected-output directives (§6 "Test-harness scripts", §8)
//! against what the run actually logged.

mod directive;
mod error;
mod runner;

pub use directive::{parse_directives, Directive};
pub use error::{TestFailure, TestResult};
pub use runner::{run_script, run_script_named};
