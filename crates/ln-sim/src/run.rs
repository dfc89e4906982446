//! Multi-step runner with decimated recording.

use ln_core::Real;
use ln_graph::Network;

use crate::engine::Engine;
use crate::error::{SimError, SimResult};
use rand::Rng;

/// How long a run lasts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RunLength {
    /// Exactly this many steps.
    Steps(u64),
    /// Simulated time. Runs `floor(time / dt) + 1` steps, matching a loop
    /// that steps while the step counter is at most `time / dt`.
    Time(Real),
}

/// Options for multi-step runs.
#[derive(Clone, Debug)]
pub struct RunOptions {
    pub length: RunLength,
    /// Call the recorder whenever the engine's step count is a multiple of this.
    pub record_every: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            length: RunLength::Time(200.0),
            record_every: Some(10),
        }
    }
}

impl RunOptions {
    /// Number of steps this run takes at step size `dt`.
    pub fn step_count(&self, dt: Real) -> SimResult<u64> {
        match self.length {
            RunLength::Steps(n) => Ok(n),
            RunLength::Time(t) => {
                if !t.is_finite() || t < 0.0 {
                    return Err(SimError::InvalidArg {
                        what: "run time must be finite and non-negative",
                    });
                }
                if !(dt.is_finite() && dt > 0.0) {
                    return Err(SimError::InvalidArg {
                        what: "dt must be positive for a timed run",
                    });
                }
                let too_long = SimError::InvalidArg {
                    what: "run time spans more steps than a u64 counts",
                };
                let whole = (t / dt).floor();
                if whole >= u64::MAX as Real {
                    return Err(too_long);
                }
                (whole as u64).checked_add(1).ok_or(too_long)
            }
        }
    }
}

/// Outcome of [`run`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunSummary {
    pub steps_run: u64,
    /// Engine step count at the end of the run.
    pub final_step: u64,
    pub elapsed_time: Real,
    pub records: u64,
    pub drained: u64,
}

/// Step `network` as `opts` says, handing recorded states to `on_record`.
///
/// The recorder receives the engine's step count and the network. A recorder
/// error stops the run after the step that produced it.
pub fn run<R, E, F>(
    engine: &mut Engine<R>,
    network: &mut Network,
    opts: &RunOptions,
    mut on_record: F,
) -> Result<RunSummary, E>
where
    R: Rng,
    E: From<SimError>,
    F: FnMut(u64, &Network) -> Result<(), E>,
{
    if opts.record_every == Some(0) {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        }
        .into());
    }
    let dt = network.config().dt;
    let total = opts.step_count(dt)?;

    tracing::info!(steps = total, dt, "starting run");
    let mut records = 0;
    let mut drained = 0;
    for _ in 0..total {
        let report = engine.step(network);
        drained += report.drained;
        if let Some(every) = opts.record_every
            && report.step % every == 0
        {
            on_record(report.step, network)?;
            records += 1;
        }
    }

    let summary = RunSummary {
        steps_run: total,
        final_step: engine.steps(),
        elapsed_time: engine.elapsed_time(dt),
        records,
        drained,
    };
    tracing::info!(
        steps = summary.steps_run,
        records = summary.records,
        drained = summary.drained,
        "run finished"
    );
    Ok(summary)
}
