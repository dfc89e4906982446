//! Read-only views of a session for display.

use ln_core::Real;
use ln_graph::{Extrema, Network};

/// Counts and extrema of a network at one point in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkSummary {
    pub junctions: usize,
    pub channels: usize,
    pub valves: usize,
    pub sources: usize,
    pub sinks: usize,
    pub total_particles: u64,
    pub extrema: Extrema,
    pub steps: u64,
    pub elapsed_time: Real,
}

pub fn summarize(network: &Network, steps: u64) -> NetworkSummary {
    NetworkSummary {
        junctions: network.junction_count(),
        channels: network.channel_count(),
        valves: network.valve_count(),
        sources: network.source_count(),
        sinks: network.sink_count(),
        total_particles: network.junctions().map(|(_, j)| j.particles()).sum(),
        extrema: *network.extrema(),
        steps,
        elapsed_time: steps as Real * network.config().dt,
    }
}
