//! Contiguous indexing for persistence.
//!
//! Handles are sparse (removed slots leave holes) and carry generations;
//! file formats want junctions numbered `0..N`. This module provides the
//! bidirectional mapping.

use ln_core::{ChannelId, JunctionId};

use crate::error::{GraphError, GraphResult};
use crate::network::Network;

/// Index map providing stable, contiguous indices for live network elements.
///
/// Provides O(1) bidirectional lookup between handles and indices.
#[derive(Debug, Clone)]
pub struct IndexMap {
    /// Contiguous list of junction handles (index -> JunctionId).
    junction_ids: Vec<JunctionId>,

    /// Contiguous list of channel handles (index -> ChannelId).
    channel_ids: Vec<ChannelId>,

    /// Reverse lookup by slot: JunctionId.index() -> index.
    junction_to_idx: Vec<Option<usize>>,

    /// Reverse lookup by slot: ChannelId.index() -> index.
    channel_to_idx: Vec<Option<usize>>,
}

impl IndexMap {
    /// Number junctions and channels in slot order.
    pub fn from_network(network: &Network) -> Self {
        Self::with_junction_order(network, network.junction_ids())
    }

    /// Number junctions in the given order (which must list every live junction once).
    pub fn with_junction_order(network: &Network, junction_ids: Vec<JunctionId>) -> Self {
        let channel_ids = network.channel_ids();

        let max_junction_slot = junction_ids
            .iter()
            .map(|id| id.index() as usize)
            .max()
            .unwrap_or(0);
        let max_channel_slot = channel_ids
            .iter()
            .map(|id| id.index() as usize)
            .max()
            .unwrap_or(0);

        let mut junction_to_idx = vec![None; max_junction_slot + 1];
        let mut channel_to_idx = vec![None; max_channel_slot + 1];

        for (i, &id) in junction_ids.iter().enumerate() {
            junction_to_idx[id.index() as usize] = Some(i);
        }
        for (i, &id) in channel_ids.iter().enumerate() {
            channel_to_idx[id.index() as usize] = Some(i);
        }

        Self {
            junction_ids,
            channel_ids,
            junction_to_idx,
            channel_to_idx,
        }
    }

    /// Number of junctions in the index.
    pub fn junction_count(&self) -> usize {
        self.junction_ids.len()
    }

    /// Number of channels in the index.
    pub fn channel_count(&self) -> usize {
        self.channel_ids.len()
    }

    /// Get the contiguous index for a junction handle.
    pub fn junction_idx(&self, id: JunctionId) -> GraphResult<usize> {
        self.junction_to_idx
            .get(id.index() as usize)
            .and_then(|&opt| opt)
            .filter(|&i| self.junction_ids[i] == id)
            .ok_or(GraphError::StaleJunction { junction: id })
    }

    /// Get the contiguous index for a channel handle.
    pub fn channel_idx(&self, id: ChannelId) -> GraphResult<usize> {
        self.channel_to_idx
            .get(id.index() as usize)
            .and_then(|&opt| opt)
            .filter(|&i| self.channel_ids[i] == id)
            .ok_or(GraphError::StaleChannel { channel: id })
    }

    /// Get the junction handle for a contiguous index (panics if out of bounds).
    pub fn junction_id(&self, i: usize) -> JunctionId {
        self.junction_ids[i]
    }

    /// Get the channel handle for a contiguous index (panics if out of bounds).
    pub fn channel_id(&self, i: usize) -> ChannelId {
        self.channel_ids[i]
    }

    /// All junction handles in index order.
    pub fn junction_ids(&self) -> &[JunctionId] {
        &self.junction_ids
    }

    /// All channel handles in index order.
    pub fn channel_ids(&self) -> &[ChannelId] {
        &self.channel_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Position, Role};

    #[test]
    fn index_map_skips_removed_slots() {
        let mut net = Network::default();
        let a = net.add_junction("A", Position::default(), Role::Transit, 0);
        let b = net.add_junction("B", Position::default(), Role::Transit, 0);
        let c = net.add_junction("C", Position::default(), Role::Transit, 0);
        net.remove_junction(b).unwrap();

        let idx = IndexMap::from_network(&net);
        assert_eq!(idx.junction_count(), 2);
        assert_eq!(idx.junction_idx(a).unwrap(), 0);
        assert_eq!(idx.junction_idx(c).unwrap(), 1);
        assert!(idx.junction_idx(b).is_err());
        assert_eq!(idx.junction_id(1), c);
    }

    #[test]
    fn index_map_rejects_stale_generation() {
        let mut net = Network::default();
        let old = net.add_junction("old", Position::default(), Role::Transit, 0);
        net.remove_junction(old).unwrap();
        let new = net.add_junction("new", Position::default(), Role::Transit, 0);
        assert_eq!(old.index(), new.index());

        let idx = IndexMap::from_network(&net);
        assert_eq!(idx.junction_idx(new).unwrap(), 0);
        assert!(idx.junction_idx(old).is_err());
    }

    #[test]
    fn custom_junction_order() {
        let mut net = Network::default();
        let a = net.add_junction("A", Position::default(), Role::Transit, 0);
        let b = net.add_junction("B", Position::default(), Role::Source, 0);
        let ch = net.connect(a, b, 1.0, 1.0, None).unwrap();

        let idx = IndexMap::with_junction_order(&net, vec![b, a]);
        assert_eq!(idx.junction_idx(b).unwrap(), 0);
        assert_eq!(idx.junction_idx(a).unwrap(), 1);
        assert_eq!(idx.channel_idx(ch).unwrap(), 0);
    }
}
