//! Simulation-wide parameters.
//!
//! A `SimConfig` travels with the network it parameterizes; nothing here is
//! process-global. Validation happens once, at the configuration boundary.

use crate::error::LnResult;
use crate::numeric::{Real, ensure_finite, ensure_non_negative};

/// Conductance derived from channel geometry:
/// `factor * width^exponent / length`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ConductanceLaw {
    pub factor: Real,
    pub exponent: Real,
}

impl Default for ConductanceLaw {
    fn default() -> Self {
        Self {
            factor: 10.0,
            exponent: 2.0,
        }
    }
}

impl ConductanceLaw {
    /// Conductance for a channel of the given width and length.
    ///
    /// A zero length yields an infinite conductance; the sampler treats the
    /// resulting probability as certain transfer.
    pub fn conductance(&self, width: Real, length: Real) -> Real {
        self.factor * width.powf(self.exponent) / length
    }
}

/// Parameters for one network and the engine stepping it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SimConfig {
    /// Time increment per step
    pub dt: Real,
    /// Conductance gained per particle carried (adaptation rate)
    pub charge_per_particle: Real,
    /// Lower bound on adaptive channel conductance
    pub conductance_floor: Real,
    /// Particle count every Source is refilled to at the start of a step
    pub source_injection: u64,
    /// Particle count given to junctions built without an explicit count
    pub initial_particles: u64,
    /// Whether channel conductance adapts to the flow it carries
    pub adaptive_conductance: bool,
    /// Geometry-to-conductance law for channels built without a conductance
    pub conductance_law: ConductanceLaw,
    /// Conductance of a freshly created valve
    pub default_valve_conductance: Real,
    /// RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.001,
            charge_per_particle: 0.05,
            conductance_floor: 0.001,
            source_injection: 10,
            initial_particles: 10,
            adaptive_conductance: false,
            conductance_law: ConductanceLaw::default(),
            default_valve_conductance: 0.0005,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Reject parameters the transport step is not defined for.
    pub fn validate(&self) -> LnResult<()> {
        ensure_non_negative(self.dt, "dt")?;
        ensure_non_negative(self.charge_per_particle, "charge_per_particle")?;
        ensure_non_negative(self.conductance_floor, "conductance_floor")?;
        ensure_non_negative(self.conductance_law.factor, "conductance_law.factor")?;
        ensure_finite(self.conductance_law.exponent, "conductance_law.exponent")?;
        ensure_non_negative(self.default_valve_conductance, "default_valve_conductance")?;
        Ok(())
    }

    /// Builder-style validated copy with a different time step.
    pub fn with_dt(mut self, dt: Real) -> LnResult<Self> {
        self.dt = dt;
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LnError;

    #[test]
    fn defaults_are_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.dt, 0.001);
        assert_eq!(cfg.source_injection, 10);
        assert!(!cfg.adaptive_conductance);
    }

    #[test]
    fn negative_dt_rejected() {
        let err = SimConfig::default().with_dt(-0.1).unwrap_err();
        assert!(matches!(err, LnError::Config { what: "dt", .. }));
    }

    #[test]
    fn nan_exponent_rejected() {
        let mut cfg = SimConfig::default();
        cfg.conductance_law.exponent = Real::NAN;
        assert!(matches!(cfg.validate(), Err(LnError::NonFinite { .. })));
    }

    #[test]
    fn law_matches_formula() {
        let law = ConductanceLaw {
            factor: 10.0,
            exponent: 2.0,
        };
        assert_eq!(law.conductance(2.0, 4.0), 10.0);
        assert!(law.conductance(1.0, 0.0).is_infinite());
    }
}
