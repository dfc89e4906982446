//! Aggregate statistics kept for display scaling.
//!
//! None of these values feed back into transport.

use ln_core::Real;

/// Running extrema over channel flow, channel conductance and junction particle counts.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Extrema {
    pub min_flow: i64,
    pub max_flow: i64,
    pub max_conductance: Real,
    pub min_particles: u64,
    pub max_particles: u64,
    /// Widest channel seen; only grows through edits and refreshes.
    pub max_width: Real,
}

/// Live accumulator for one pass over the network.
///
/// Starts from sentinels: minima at the largest representable value,
/// maxima at zero.
#[derive(Debug, Clone, Copy)]
pub struct ExtremaAccumulator {
    min_flow: i64,
    max_flow: i64,
    max_conductance: Real,
    min_particles: u64,
    max_particles: u64,
    channels_seen: usize,
    junctions_seen: usize,
}

impl Default for ExtremaAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtremaAccumulator {
    pub fn new() -> Self {
        Self {
            min_flow: i64::MAX,
            max_flow: 0,
            max_conductance: 0.0,
            min_particles: u64::MAX,
            max_particles: 0,
            channels_seen: 0,
            junctions_seen: 0,
        }
    }

    pub fn fold_channel(&mut self, flow: i64, conductance: Real) {
        self.channels_seen += 1;
        if conductance > self.max_conductance {
            self.max_conductance = conductance;
        }
        if flow > self.max_flow {
            self.max_flow = flow;
        }
        if flow < self.min_flow {
            self.min_flow = flow;
        }
    }

    pub fn fold_junction(&mut self, particles: u64) {
        self.junctions_seen += 1;
        if particles > self.max_particles {
            self.max_particles = particles;
        }
        if particles < self.min_particles {
            self.min_particles = particles;
        }
    }

    /// Raw extrema of this pass. Quantities with nothing folded in keep `previous`.
    pub fn finish(&self, previous: &Extrema) -> Extrema {
        let mut out = *previous;
        if self.channels_seen > 0 {
            out.min_flow = self.min_flow;
            out.max_flow = self.max_flow;
            out.max_conductance = self.max_conductance;
        }
        if self.junctions_seen > 0 {
            out.min_particles = self.min_particles;
            out.max_particles = self.max_particles;
        }
        out
    }
}
