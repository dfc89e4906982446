//! Core network elements.

use ln_core::{ChannelId, JunctionId, Real, offset_particles};

/// What a junction does at the start of every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Refilled to the configured injection count every step.
    Source,
    /// Drains through its valve into the zero-potential reservoir.
    Sink,
    /// Pass-through.
    Transit,
}

/// 2-D placement of a junction. Only used for channel orientation and persistence.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    pub x: Real,
    pub y: Real,
}

impl Position {
    pub fn new(x: Real, y: Real) -> Self {
        Self { x, y }
    }
}

/// Conductive element between a Sink junction and the external reservoir.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Valve {
    pub conductance: Real,
    /// Particles that left the junction toward the reservoir during the last step.
    pub flow: u64,
}

impl Valve {
    pub fn new(conductance: Real) -> Self {
        Self {
            conductance,
            flow: 0,
        }
    }
}

/// A node of the network.
///
/// Role and valve are only changed through [`Network::set_role`](crate::Network::set_role),
/// which keeps "valve present iff Sink" true.
#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    pub label: String,
    pub position: Position,
    pub(crate) particles: u64,
    pub(crate) role: Role,
    pub(crate) valve: Option<Valve>,
    /// Incident channels; a self-loop appears twice.
    pub(crate) channels: Vec<ChannelId>,
}

impl Junction {
    pub fn particles(&self) -> u64 {
        self.particles
    }

    pub fn set_particles(&mut self, particles: u64) {
        self.particles = particles;
    }

    /// Add (or, for negative `delta`, remove) particles, clamping at zero.
    pub fn offset_particles(&mut self, delta: i64) {
        self.particles = offset_particles(self.particles, delta);
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_source(&self) -> bool {
        self.role == Role::Source
    }

    pub fn is_sink(&self) -> bool {
        self.role == Role::Sink
    }

    pub fn valve(&self) -> Option<&Valve> {
        self.valve.as_ref()
    }

    pub fn valve_mut(&mut self) -> Option<&mut Valve> {
        self.valve.as_mut()
    }

    pub fn channels(&self) -> &[ChannelId] {
        &self.channels
    }

    pub fn degree(&self) -> usize {
        self.channels.len()
    }
}

/// An undirected conductive link. `from`/`to` only fix the sign of `flow`:
/// positive flow moves particles from `from` to `to`.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub(crate) from: JunctionId,
    pub(crate) to: JunctionId,
    pub conductance: Real,
    pub length: Real,
    pub width: Real,
    pub flow: i64,
}

impl Channel {
    pub fn from(&self) -> JunctionId {
        self.from
    }

    pub fn to(&self) -> JunctionId {
        self.to
    }

    pub fn endpoints(&self) -> (JunctionId, JunctionId) {
        (self.from, self.to)
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_equality() {
        assert_eq!(Role::Sink, Role::Sink);
        assert_ne!(Role::Source, Role::Transit);
    }

    #[test]
    fn junction_particle_offsets_clamp() {
        let mut j = Junction {
            label: "a".into(),
            position: Position::default(),
            particles: 4,
            role: Role::Transit,
            valve: None,
            channels: Vec::new(),
        };
        j.offset_particles(3);
        assert_eq!(j.particles(), 7);
        j.offset_particles(-10);
        assert_eq!(j.particles(), 0);
    }

    #[test]
    fn new_valve_has_no_flow() {
        let v = Valve::new(0.0005);
        assert_eq!(v.flow, 0);
        assert_eq!(v.conductance, 0.0005);
    }
}
