//! Network validation logic.

use ln_core::{Arena, ChannelKind, JunctionKind};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Channel, Junction, Role};

/// Validate structure: every endpoint is live and lists the channel exactly
/// as often as it is an endpoint of it; every listed channel is live; valves
/// exist exactly on sinks.
pub(crate) fn validate_network(
    junctions: &Arena<JunctionKind, Junction>,
    channels: &Arena<ChannelKind, Channel>,
) -> GraphResult<()> {
    for (ch_id, ch) in channels.iter() {
        for end in [ch.from, ch.to] {
            let junction = junctions
                .get(end)
                .ok_or(GraphError::StaleJunction { junction: end })?;
            let expected = usize::from(ch.from == end) + usize::from(ch.to == end);
            let listed = junction.channels.iter().filter(|&&c| c == ch_id).count();
            if listed != expected {
                return Err(GraphError::InconsistentIncidence {
                    channel: ch_id,
                    junction: end,
                });
            }
        }
    }

    for (j_id, junction) in junctions.iter() {
        for &ch_id in &junction.channels {
            let ch = channels
                .get(ch_id)
                .ok_or(GraphError::StaleChannel { channel: ch_id })?;
            if ch.from != j_id && ch.to != j_id {
                return Err(GraphError::InconsistentIncidence {
                    channel: ch_id,
                    junction: j_id,
                });
            }
        }

        if junction.valve.is_some() != (junction.role == Role::Sink) {
            return Err(GraphError::ValveRoleMismatch { junction: j_id });
        }
    }

    Ok(())
}
