//! Smoothing of the display extrema between steps.
//!
//! A range that widens is taken immediately. A range that narrows keeps
//! nine tenths of the previous value, so the display scale decays slowly
//! instead of flickering with every quiet step.

use ln_core::Real;
use ln_graph::Extrema;

/// Weight of the previous value when a range narrows.
pub const RETAINED_TENTHS: i128 = 9;

/// Blend `live` into `previous` for every extremum.
///
/// `max_width` is not a per-step quantity and is taken from `live` as-is.
pub fn settle(live: &Extrema, previous: &Extrema) -> Extrema {
    Extrema {
        min_flow: if live.min_flow > previous.min_flow {
            approach_i64(previous.min_flow, live.min_flow)
        } else {
            live.min_flow
        },
        max_flow: if live.max_flow < previous.max_flow {
            approach_i64(previous.max_flow, live.max_flow)
        } else {
            live.max_flow
        },
        max_conductance: if live.max_conductance < previous.max_conductance {
            approach_real(previous.max_conductance, live.max_conductance)
        } else {
            live.max_conductance
        },
        min_particles: if live.min_particles > previous.min_particles {
            approach_u64(previous.min_particles, live.min_particles)
        } else {
            live.min_particles
        },
        max_particles: if live.max_particles < previous.max_particles {
            approach_u64(previous.max_particles, live.max_particles)
        } else {
            live.max_particles
        },
        max_width: live.max_width,
    }
}

fn approach_real(previous: Real, live: Real) -> Real {
    (live + RETAINED_TENTHS as Real * previous) / 10.0
}

/// One tenth of the gap, rounded toward `previous`, but at least one unit
/// toward `live` so a held value is reached in finitely many steps.
fn approach(previous: i128, live: i128) -> i128 {
    let gap = live - previous;
    let step = gap * (10 - RETAINED_TENTHS) / 10;
    if step == 0 {
        previous + gap.signum()
    } else {
        previous + step
    }
}

fn approach_i64(previous: i64, live: i64) -> i64 {
    // Lies between the two inputs, so it always fits.
    approach(previous.into(), live.into()) as i64
}

fn approach_u64(previous: u64, live: u64) -> u64 {
    approach(previous.into(), live.into()) as u64
}
