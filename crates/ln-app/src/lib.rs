//! Session layer for leafnet front ends.
//!
//! Holds one network and its engine, and exposes load / save / configure /
//! step / query to the CLI.

pub mod error;
pub mod query;
pub mod session;

pub use error::{AppError, AppResult};
pub use query::{NetworkSummary, summarize};
pub use session::{Session, snapshot_path};
