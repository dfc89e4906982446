//! ln-core: stable foundation for leafnet.
//!
//! Contains:
//! - ids (generation-checked handles for junctions and channels)
//! - arena (slot storage addressed by those handles)
//! - numeric (Real + finiteness checks + particle arithmetic)
//! - config (simulation-wide parameters and their validation)
//! - error (shared error types)

pub mod arena;
pub mod config;
pub mod error;
pub mod ids;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use arena::Arena;
pub use config::{ConductanceLaw, SimConfig};
pub use error::{LnError, LnResult};
pub use ids::*;
pub use numeric::*;
