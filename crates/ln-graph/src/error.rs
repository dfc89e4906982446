//! Graph-specific error types.

use ln_core::{ChannelId, JunctionId, LnError, Real};

/// Network mutation and consistency errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// The junction handle does not refer to a live junction.
    StaleJunction { junction: JunctionId },

    /// The channel handle does not refer to a live channel.
    StaleChannel { channel: ChannelId },

    /// The junction is not a Sink, so it owns no valve.
    NoValve { junction: JunctionId },

    /// A channel endpoint and the endpoint's incidence list disagree.
    InconsistentIncidence {
        channel: ChannelId,
        junction: JunctionId,
    },

    /// Valve presence does not match the junction's role.
    ValveRoleMismatch { junction: JunctionId },

    /// A geometry or conductance value outside its allowed range.
    InvalidValue {
        what: &'static str,
        bound: &'static str,
        value: Real,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::StaleJunction { junction } => {
                write!(f, "Junction {} does not exist", junction)
            }
            GraphError::StaleChannel { channel } => {
                write!(f, "Channel {} does not exist", channel)
            }
            GraphError::NoValve { junction } => {
                write!(f, "Junction {} is not a sink and has no valve", junction)
            }
            GraphError::InconsistentIncidence { channel, junction } => {
                write!(
                    f,
                    "Channel {} and junction {}'s incidence list disagree",
                    channel, junction
                )
            }
            GraphError::InvalidValue { what, bound, value } => {
                write!(f, "{} must be {}, got {}", what, bound, value)
            }
            GraphError::ValveRoleMismatch { junction } => {
                write!(
                    f,
                    "Junction {} has valve presence inconsistent with its role",
                    junction
                )
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for LnError {
    fn from(err: GraphError) -> Self {
        LnError::Invariant {
            what: err.to_string(),
        }
    }
}
