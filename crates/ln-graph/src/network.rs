//! The network aggregate: owns junctions, channels and (through sinks) valves.

use ln_core::{Arena, ChannelId, ChannelKind, JunctionId, JunctionKind, LnResult, Real, SimConfig};

use crate::error::{GraphError, GraphResult};
use crate::graph::{Channel, Junction, Position, Role, Valve};
use crate::stats::{Extrema, ExtremaAccumulator};
use crate::validate;

/// Junctions and channels addressed by generation-checked handles.
///
/// Junctions hold handles to their incident channels and channels hold
/// handles to their endpoints; nothing owns anything cyclically. All
/// simulation-wide parameters travel with the network in its [`SimConfig`].
#[derive(Debug, Clone)]
pub struct Network {
    junctions: Arena<JunctionKind, Junction>,
    channels: Arena<ChannelKind, Channel>,
    config: SimConfig,
    extrema: Extrema,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            junctions: Arena::new(),
            channels: Arena::new(),
            config: SimConfig::default(),
            extrema: Extrema::default(),
        }
    }
}

impl Network {
    /// Create an empty network with validated parameters.
    pub fn new(config: SimConfig) -> LnResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Replace the simulation parameters. Invalid parameters leave the old ones in place.
    pub fn configure(&mut self, config: SimConfig) -> LnResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    // ----- junctions -----

    /// Add a junction. A Sink gets a valve with the configured default conductance.
    pub fn add_junction(
        &mut self,
        label: impl Into<String>,
        position: Position,
        role: Role,
        particles: u64,
    ) -> JunctionId {
        let valve = (role == Role::Sink).then(|| Valve::new(self.config.default_valve_conductance));
        self.junctions.insert(Junction {
            label: label.into(),
            position,
            particles,
            role,
            valve,
            channels: Vec::new(),
        })
    }

    /// Remove a junction together with its valve and every incident channel.
    pub fn remove_junction(&mut self, id: JunctionId) -> GraphResult<Junction> {
        let incident = self.junction_ref(id)?.channels.clone();
        for ch in incident {
            // Self-loops are listed twice; the second disconnect finds nothing.
            if self.channels.contains(ch) {
                self.disconnect(ch)?;
            }
        }
        self.junctions
            .remove(id)
            .ok_or(GraphError::StaleJunction { junction: id })
    }

    pub fn junction(&self, id: JunctionId) -> Option<&Junction> {
        self.junctions.get(id)
    }

    pub fn junction_mut(&mut self, id: JunctionId) -> Option<&mut Junction> {
        self.junctions.get_mut(id)
    }

    fn junction_ref(&self, id: JunctionId) -> GraphResult<&Junction> {
        self.junctions
            .get(id)
            .ok_or(GraphError::StaleJunction { junction: id })
    }

    fn junction_ref_mut(&mut self, id: JunctionId) -> GraphResult<&mut Junction> {
        self.junctions
            .get_mut(id)
            .ok_or(GraphError::StaleJunction { junction: id })
    }

    pub fn junctions(&self) -> impl Iterator<Item = (JunctionId, &Junction)> {
        self.junctions.iter()
    }

    pub fn junctions_mut(&mut self) -> impl Iterator<Item = (JunctionId, &mut Junction)> {
        self.junctions.iter_mut()
    }

    pub fn junction_ids(&self) -> Vec<JunctionId> {
        self.junctions.handles()
    }

    /// Change a junction's role, creating or destroying its valve to match.
    ///
    /// Re-affirming Sink keeps the existing valve and its conductance.
    pub fn set_role(&mut self, id: JunctionId, role: Role) -> GraphResult<()> {
        let default_valve = self.config.default_valve_conductance;
        let junction = self.junction_ref_mut(id)?;
        junction.role = role;
        match role {
            Role::Sink => {
                if junction.valve.is_none() {
                    junction.valve = Some(Valve::new(default_valve));
                }
            }
            Role::Source | Role::Transit => junction.valve = None,
        }
        Ok(())
    }

    /// Number of incident channels (a self-loop counts twice).
    pub fn degree(&self, id: JunctionId) -> GraphResult<usize> {
        Ok(self.junction_ref(id)?.degree())
    }

    pub fn valve(&self, id: JunctionId) -> GraphResult<&Valve> {
        self.junction_ref(id)?
            .valve
            .as_ref()
            .ok_or(GraphError::NoValve { junction: id })
    }

    pub fn valve_mut(&mut self, id: JunctionId) -> GraphResult<&mut Valve> {
        self.junction_ref_mut(id)?
            .valve
            .as_mut()
            .ok_or(GraphError::NoValve { junction: id })
    }

    // ----- channels -----

    /// Connect two junctions.
    ///
    /// Without an explicit `conductance`, it is derived from `width` and
    /// `length` with the configured conductance law.
    pub fn connect(
        &mut self,
        from: JunctionId,
        to: JunctionId,
        length: Real,
        width: Real,
        conductance: Option<Real>,
    ) -> GraphResult<ChannelId> {
        self.junction_ref(from)?;
        self.junction_ref(to)?;
        let length = positive(length, "channel length")?;
        let width = non_negative(width, "channel width")?;
        let conductance = non_negative(
            conductance.unwrap_or_else(|| self.config.conductance_law.conductance(width, length)),
            "channel conductance",
        )?;
        let id = self.channels.insert(Channel {
            from,
            to,
            conductance,
            length,
            width,
            flow: 0,
        });
        self.junction_ref_mut(from)?.channels.push(id);
        self.junction_ref_mut(to)?.channels.push(id);
        if width > self.extrema.max_width {
            self.extrema.max_width = width;
        }
        if conductance > self.extrema.max_conductance {
            self.extrema.max_conductance = conductance;
        }
        Ok(id)
    }

    /// Remove a channel and detach it from both endpoints. Other channels are untouched.
    pub fn disconnect(&mut self, id: ChannelId) -> GraphResult<Channel> {
        let channel = self
            .channels
            .remove(id)
            .ok_or(GraphError::StaleChannel { channel: id })?;
        for end in [channel.from, channel.to] {
            let junction = self.junction_ref_mut(end)?;
            let pos = junction
                .channels
                .iter()
                .position(|&c| c == id)
                .ok_or(GraphError::InconsistentIncidence {
                    channel: id,
                    junction: end,
                })?;
            junction.channels.swap_remove(pos);
        }
        Ok(channel)
    }

    pub fn channel(&self, id: ChannelId) -> Option<&Channel> {
        self.channels.get(id)
    }

    pub fn channel_mut(&mut self, id: ChannelId) -> Option<&mut Channel> {
        self.channels.get_mut(id)
    }

    pub fn channels(&self) -> impl Iterator<Item = (ChannelId, &Channel)> {
        self.channels.iter()
    }

    pub fn channel_ids(&self) -> Vec<ChannelId> {
        self.channels.handles()
    }

    /// Angle of the `from -> to` direction, in radians.
    pub fn orientation(&self, id: ChannelId) -> GraphResult<Real> {
        let ch = self
            .channels
            .get(id)
            .ok_or(GraphError::StaleChannel { channel: id })?;
        let a = self.junction_ref(ch.from)?.position;
        let b = self.junction_ref(ch.to)?.position;
        Ok((b.y - a.y).atan2(b.x - a.x))
    }

    /// Recompute every channel's conductance from its geometry.
    ///
    /// Nothing changes if the law yields a negative or non-finite value for
    /// any channel.
    pub fn derive_all_conductances(&mut self) -> GraphResult<()> {
        let law = self.config.conductance_law;
        for ch in self.channels.values() {
            non_negative(law.conductance(ch.width, ch.length), "derived conductance")?;
        }
        for (_, ch) in self.channels.iter_mut() {
            ch.conductance = law.conductance(ch.width, ch.length);
        }
        self.refresh_extrema();
        Ok(())
    }

    // ----- counts -----

    pub fn junction_count(&self) -> usize {
        self.junctions.len()
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn valve_count(&self) -> usize {
        self.junctions.values().filter(|j| j.valve.is_some()).count()
    }

    pub fn source_count(&self) -> usize {
        self.junctions.values().filter(|j| j.is_source()).count()
    }

    pub fn sink_count(&self) -> usize {
        self.junctions.values().filter(|j| j.is_sink()).count()
    }

    // ----- statistics -----

    pub fn extrema(&self) -> &Extrema {
        &self.extrema
    }

    pub fn set_extrema(&mut self, extrema: Extrema) {
        self.extrema = extrema;
    }

    /// Recompute undamped extrema from the current state.
    pub fn refresh_extrema(&mut self) {
        let mut acc = ExtremaAccumulator::new();
        let mut max_width: Real = 0.0;
        for ch in self.channels.values() {
            acc.fold_channel(ch.flow, ch.conductance);
            max_width = max_width.max(ch.width);
        }
        for j in self.junctions.values() {
            acc.fold_junction(j.particles);
        }
        let mut fresh = acc.finish(&Extrema::default());
        fresh.max_width = max_width;
        self.extrema = fresh;
    }

    /// Check the structural invariants: incidence lists agree with channel
    /// endpoints, and valves exist exactly on sinks.
    pub fn check_invariants(&self) -> GraphResult<()> {
        validate::validate_network(&self.junctions, &self.channels)
    }
}

/// Finite and >= 0.
pub(crate) fn non_negative(value: Real, what: &'static str) -> GraphResult<Real> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(GraphError::InvalidValue {
            what,
            bound: "finite and non-negative",
            value,
        })
    }
}

/// Finite and > 0.
pub(crate) fn positive(value: Real, what: &'static str) -> GraphResult<Real> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GraphError::InvalidValue {
            what,
            bound: "finite and positive",
            value,
        })
    }
}
