//! Error types for simulation runs.

use thiserror::Error;

/// Errors encountered when driving a run.
///
/// A single step cannot fail; only run options are checked.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type SimResult<T> = Result<T, SimError>;
