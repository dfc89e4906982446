//! Stochastic transport step.
//!
//! One step refills sources, drains sinks through their valves, then moves
//! particles along every channel in a fresh random order. Channels visited
//! later see the counts left by earlier ones.

use std::cmp::Ordering;

use ln_core::{Real, SimConfig};
use ln_graph::{ExtremaAccumulator, Network, Role};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::damping;
use crate::sampler::binomial;

/// Totals for one step, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Step number after this step, counting from 1.
    pub step: u64,
    /// Particles leaving through sink valves.
    pub drained: u64,
    /// Sum of `|flow|` over all channels.
    pub moved: u64,
    /// Net change from resetting sources to the injection level.
    pub injected: i64,
}

/// Drives transport on a [`Network`] with its own random stream.
pub struct Engine<R = ChaCha8Rng> {
    rng: R,
    steps: u64,
}

impl Engine<ChaCha8Rng> {
    /// Seeded engines reproduce runs exactly. `None` seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self::with_rng(rng)
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.seed)
    }
}

impl<R: Rng> Engine<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, steps: 0 }
    }

    /// Steps taken since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time for the steps taken so far at step size `dt`.
    pub fn elapsed_time(&self, dt: Real) -> Real {
        self.steps as Real * dt
    }

    /// Advance `network` by one time step.
    pub fn step(&mut self, network: &mut Network) -> StepReport {
        let dt = network.config().dt;
        let injection = network.config().source_injection;
        let adaptive = network.config().adaptive_conductance;
        let charge = network.config().charge_per_particle;
        let floor = network.config().conductance_floor;
        let previous = *network.extrema();

        let mut report = StepReport::default();
        let mut acc = ExtremaAccumulator::new();

        for (_, junction) in network.junctions_mut() {
            match junction.role() {
                Role::Source => {
                    let before = junction.particles();
                    junction.set_particles(injection);
                    report.injected += injection as i64 - before as i64;
                }
                Role::Sink => {
                    let present = junction.particles();
                    let mut drained = 0;
                    if let Some(valve) = junction.valve_mut() {
                        drained = binomial(&mut self.rng, present, valve.conductance * dt);
                        valve.flow = drained;
                    }
                    junction.set_particles(present.saturating_sub(drained));
                    report.drained += drained;
                }
                Role::Transit => {}
            }
        }

        let mut order = network.channel_ids();
        order.shuffle(&mut self.rng);

        for id in order {
            let Some(channel) = network.channel(id) else {
                continue;
            };
            let (from, to) = channel.endpoints();
            let conductance = channel.conductance;
            let at_from = network.junction(from).map_or(0, |j| j.particles());
            let at_to = network.junction(to).map_or(0, |j| j.particles());

            let p = conductance * dt;
            let flow = match at_to.cmp(&at_from) {
                Ordering::Equal => 0,
                Ordering::Greater => -to_signed(binomial(&mut self.rng, at_to - at_from, p)),
                Ordering::Less => to_signed(binomial(&mut self.rng, at_from - at_to, p)),
            };

            if let Some(j) = network.junction_mut(from) {
                j.offset_particles(-flow);
            }
            if let Some(j) = network.junction_mut(to) {
                j.offset_particles(flow);
            }

            let conductance = if adaptive {
                (conductance * (1.0 - dt) + flow.unsigned_abs() as Real * charge).max(floor)
            } else {
                conductance
            };
            if let Some(channel) = network.channel_mut(id) {
                channel.flow = flow;
                channel.conductance = conductance;
            }
            acc.fold_channel(flow, conductance);
            report.moved += flow.unsigned_abs();
        }

        for (_, junction) in network.junctions() {
            acc.fold_junction(junction.particles());
        }
        let live = acc.finish(&previous);
        network.set_extrema(damping::settle(&live, &previous));

        self.steps += 1;
        report.step = self.steps;
        tracing::trace!(
            step = report.step,
            drained = report.drained,
            moved = report.moved,
            injected = report.injected,
            "transport step"
        );
        report
    }
}

fn to_signed(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}
