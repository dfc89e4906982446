//! ln-graph: network model layer for leafnet.
//!
//! Provides:
//! - Network elements (Junction, Channel, Valve) and the Network aggregate
//! - Mutation and query operations (connect, disconnect, set_role, degree, ...)
//! - Aggregate extrema used for display scaling
//! - Batch edits over element selections
//! - Contiguous indexing for persistence
//!
//! # Example
//!
//! ```
//! use ln_graph::{Network, Position, Role};
//!
//! let mut net = Network::default();
//! let a = net.add_junction("A", Position::new(0.0, 0.0), Role::Source, 0);
//! let b = net.add_junction("B", Position::new(1.0, 0.0), Role::Sink, 0);
//! let ch = net.connect(a, b, 1.0, 1.0, Some(0.05)).unwrap();
//!
//! assert_eq!(net.degree(a).unwrap(), 1);
//! net.disconnect(ch).unwrap();
//! assert_eq!(net.degree(b).unwrap(), 0);
//! ```

pub mod edit;
pub mod error;
pub mod graph;
pub mod indexing;
pub mod network;
pub mod stats;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use edit::{Edit, EditSummary, Element};
pub use error::{GraphError, GraphResult};
pub use graph::{Channel, Junction, Position, Role, Valve};
pub use indexing::IndexMap;
pub use network::Network;
pub use stats::{Extrema, ExtremaAccumulator};
