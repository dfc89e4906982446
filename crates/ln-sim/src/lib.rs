//! ln-sim: stochastic particle transport on leaf networks.
//!
//! Provides:
//! - Binomial and Poisson samplers driven by a caller-supplied generator
//! - The per-step transport engine with optional adaptive conductance
//! - Damped display extrema
//! - A multi-step runner with decimated recording

pub mod damping;
pub mod engine;
pub mod error;
pub mod run;
pub mod sampler;

pub use engine::{Engine, StepReport};
pub use error::{SimError, SimResult};
pub use run::{RunLength, RunOptions, RunSummary, run};
