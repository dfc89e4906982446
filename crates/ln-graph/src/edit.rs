//! Batch edits over a selection of network elements.

use ln_core::{ChannelId, JunctionId, Real};

use crate::error::GraphResult;
use crate::graph::Role;
use crate::network::{Network, non_negative, positive};

/// Any element an interaction layer can pick out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Junction(JunctionId),
    Channel(ChannelId),
    /// A valve, addressed by the sink junction that owns it.
    Valve(JunctionId),
}

/// One property change applied to every element of a selection it makes sense for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Edit {
    SetParticles(u64),
    SetRole(Role),
    SetConductance(Real),
    SetLength(Real),
    SetWidth(Real),
    SetValveConductance(Real),
    /// Remove junctions and channels. Valves go away with their sink role only.
    Remove,
}

impl Edit {
    /// Reject values no channel or valve may hold.
    pub fn validate(self) -> GraphResult<Self> {
        match self {
            Edit::SetConductance(v) => non_negative(v, "channel conductance")?,
            Edit::SetLength(v) => positive(v, "channel length")?,
            Edit::SetWidth(v) => non_negative(v, "channel width")?,
            Edit::SetValveConductance(v) => non_negative(v, "valve conductance")?,
            _ => 0.0,
        };
        Ok(self)
    }
}

/// What a batch edit touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditSummary {
    pub applied: usize,
    /// Elements of the wrong kind for the edit, or no longer live.
    pub skipped: usize,
}

impl Network {
    /// Apply `edit` to every element of `selection` it applies to.
    ///
    /// Removal is two-phase: the live targets are collected first, channels
    /// are deleted next, then junctions (which drop their remaining channels).
    /// An out-of-range value is rejected before anything is touched.
    pub fn apply_edit(&mut self, selection: &[Element], edit: Edit) -> GraphResult<EditSummary> {
        let edit = edit.validate()?;
        if edit == Edit::Remove {
            return self.remove_selection(selection);
        }

        let mut summary = EditSummary::default();
        for &element in selection {
            if self.apply_one(element, edit)? {
                summary.applied += 1;
            } else {
                summary.skipped += 1;
            }
        }
        tracing::debug!(?edit, applied = summary.applied, skipped = summary.skipped, "batch edit");
        Ok(summary)
    }

    fn apply_one(&mut self, element: Element, edit: Edit) -> GraphResult<bool> {
        match (element, edit) {
            (Element::Junction(id), Edit::SetParticles(n)) => match self.junction_mut(id) {
                Some(j) => {
                    j.set_particles(n);
                    Ok(true)
                }
                None => Ok(false),
            },
            (Element::Junction(id), Edit::SetRole(role)) => {
                if self.junction(id).is_none() {
                    return Ok(false);
                }
                self.set_role(id, role)?;
                Ok(true)
            }
            (Element::Channel(id), edit @ (Edit::SetConductance(_) | Edit::SetLength(_))) => {
                let Some(ch) = self.channel_mut(id) else {
                    return Ok(false);
                };
                match edit {
                    Edit::SetConductance(v) => ch.conductance = v,
                    Edit::SetLength(v) => ch.length = v,
                    _ => {}
                }
                Ok(true)
            }
            (Element::Channel(id), Edit::SetWidth(v)) => {
                let Some(ch) = self.channel_mut(id) else {
                    return Ok(false);
                };
                ch.width = v;
                if v > self.extrema().max_width {
                    let mut extrema = *self.extrema();
                    extrema.max_width = v;
                    self.set_extrema(extrema);
                }
                Ok(true)
            }
            (Element::Valve(id), Edit::SetValveConductance(v)) => match self.valve_mut(id) {
                Ok(valve) => {
                    valve.conductance = v;
                    Ok(true)
                }
                Err(_) => Ok(false),
            },
            _ => Ok(false),
        }
    }

    fn remove_selection(&mut self, selection: &[Element]) -> GraphResult<EditSummary> {
        let mut channels = Vec::new();
        let mut junctions = Vec::new();
        let mut summary = EditSummary::default();
        for &element in selection {
            match element {
                Element::Channel(id) if self.channel(id).is_some() => channels.push(id),
                Element::Junction(id) if self.junction(id).is_some() => junctions.push(id),
                _ => summary.skipped += 1,
            }
        }
        channels.sort_unstable();
        channels.dedup();
        junctions.sort_unstable();
        junctions.dedup();

        for id in channels {
            self.disconnect(id)?;
            summary.applied += 1;
        }
        for id in junctions {
            self.remove_junction(id)?;
            summary.applied += 1;
        }
        tracing::debug!(removed = summary.applied, "batch removal");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;
    use crate::graph::Position;

    fn star() -> (Network, JunctionId, Vec<JunctionId>, Vec<ChannelId>) {
        let mut net = Network::default();
        let hub = net.add_junction("hub", Position::default(), Role::Transit, 0);
        let mut leaves = Vec::new();
        let mut spokes = Vec::new();
        for i in 0..4 {
            let leaf = net.add_junction(format!("leaf{i}"), Position::default(), Role::Sink, 0);
            spokes.push(net.connect(hub, leaf, 1.0, 1.0, None).unwrap());
            leaves.push(leaf);
        }
        (net, hub, leaves, spokes)
    }

    #[test]
    fn set_role_on_selection_skips_channels() {
        let (mut net, hub, leaves, spokes) = star();
        let selection = [
            Element::Junction(hub),
            Element::Junction(leaves[0]),
            Element::Channel(spokes[0]),
        ];
        let summary = net.apply_edit(&selection, Edit::SetRole(Role::Source)).unwrap();
        assert_eq!(summary, EditSummary { applied: 2, skipped: 1 });
        assert!(net.junction(leaves[0]).unwrap().valve().is_none());
        net.check_invariants().unwrap();
    }

    #[test]
    fn valve_conductance_only_on_sinks() {
        let (mut net, hub, leaves, _) = star();
        let selection = [Element::Valve(leaves[1]), Element::Valve(hub)];
        let summary = net
            .apply_edit(&selection, Edit::SetValveConductance(0.02))
            .unwrap();
        assert_eq!(summary.applied, 1);
        assert_eq!(net.valve(leaves[1]).unwrap().conductance, 0.02);
    }

    #[test]
    fn out_of_range_values_leave_network_untouched() {
        let (mut net, _, leaves, spokes) = star();
        let valves: Vec<Element> = leaves.iter().map(|&j| Element::Valve(j)).collect();
        assert!(matches!(
            net.apply_edit(&valves, Edit::SetValveConductance(-5.0)),
            Err(GraphError::InvalidValue { what: "valve conductance", .. })
        ));
        assert_eq!(net.valve(leaves[0]).unwrap().conductance, 0.0005);

        let channels: Vec<Element> = spokes.iter().map(|&c| Element::Channel(c)).collect();
        assert!(net.apply_edit(&channels, Edit::SetLength(0.0)).is_err());
        assert!(net.apply_edit(&channels, Edit::SetConductance(Real::NAN)).is_err());
        assert!(net.apply_edit(&channels, Edit::SetWidth(-1.0)).is_err());
        let ch = net.channel(spokes[0]).unwrap();
        assert_eq!((ch.length, ch.width, ch.conductance), (1.0, 1.0, 10.0));
    }

    #[test]
    fn remove_many_channels_is_two_phase() {
        let (mut net, hub, leaves, spokes) = star();
        let selection: Vec<Element> = spokes.iter().map(|&c| Element::Channel(c)).collect();
        let summary = net.apply_edit(&selection, Edit::Remove).unwrap();
        assert_eq!(summary.applied, 4);
        assert_eq!(net.channel_count(), 0);
        assert_eq!(net.degree(hub).unwrap(), 0);
        for leaf in leaves {
            assert_eq!(net.degree(leaf).unwrap(), 0);
        }
        net.check_invariants().unwrap();
    }

    #[test]
    fn remove_junction_and_its_channel_together() {
        let (mut net, hub, leaves, spokes) = star();
        let selection = [Element::Channel(spokes[0]), Element::Junction(hub)];
        net.apply_edit(&selection, Edit::Remove).unwrap();
        assert_eq!(net.junction_count(), 4);
        assert_eq!(net.channel_count(), 0);
        assert_eq!(net.degree(leaves[2]).unwrap(), 0);
        net.check_invariants().unwrap();
    }

    #[test]
    fn stale_elements_are_skipped() {
        let (mut net, _, leaves, _) = star();
        net.remove_junction(leaves[3]).unwrap();
        let summary = net
            .apply_edit(&[Element::Junction(leaves[3])], Edit::SetParticles(5))
            .unwrap();
        assert_eq!(summary, EditSummary { applied: 0, skipped: 1 });
    }
}
