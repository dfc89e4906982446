//! The driver surface: one network, one engine, and the operations a
//! front end calls between steps.

use std::path::{Path, PathBuf};

use ln_core::{ConductanceLaw, SimConfig};
use ln_graph::Network;
use ln_sim::{Engine, RunOptions, RunSummary, StepReport};

use crate::error::{AppError, AppResult};
use crate::query::{NetworkSummary, summarize};

/// File name for the snapshot taken at `step`: `<stem><step, 8 digits>.txt`
/// next to `base`.
pub fn snapshot_path(base: &Path, step: u64) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    base.with_file_name(format!("{stem}{step:08}.txt"))
}

pub struct Session {
    network: Network,
    engine: Engine,
    source: Option<PathBuf>,
}

impl Session {
    /// Empty session with validated parameters.
    pub fn new(config: SimConfig) -> AppResult<Self> {
        let engine = Engine::from_config(&config);
        Ok(Self {
            network: Network::new(config)?,
            engine,
            source: None,
        })
    }

    /// Wrap an existing network. The engine is seeded from its config.
    pub fn with_network(network: Network) -> Self {
        Self {
            engine: Engine::from_config(network.config()),
            network,
            source: None,
        }
    }

    /// Replace the network with the one in `path`. On failure the current
    /// network is kept. A successful load restarts the simulation clock.
    pub fn load(&mut self, path: &Path) -> AppResult<()> {
        let network = ln_io::load(path, self.network.config())?;
        self.engine = Engine::from_config(network.config());
        self.network = network;
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        ln_io::save(&self.network, path)?;
        tracing::info!(path = %path.display(), "saved network");
        Ok(())
    }

    /// Path of the last successful load.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Swap in new parameters. Rejected parameters leave the old ones in
    /// place. The seed only matters at the next load or [`Session::reseed`].
    pub fn configure(&mut self, config: SimConfig) -> AppResult<()> {
        self.network.configure(config)?;
        Ok(())
    }

    pub fn config(&self) -> &SimConfig {
        self.network.config()
    }

    /// Restart the random stream and the clock from the configured seed.
    pub fn reseed(&mut self) {
        self.engine = Engine::from_config(self.network.config());
    }

    /// Install a conductance law and re-derive every channel from its geometry.
    pub fn derive_conductances(&mut self, law: ConductanceLaw) -> AppResult<()> {
        let previous = self.network.config().clone();
        let config = SimConfig {
            conductance_law: law,
            ..previous.clone()
        };
        self.network.configure(config)?;
        if let Err(err) = self.network.derive_all_conductances() {
            self.network.configure(previous)?;
            return Err(err.into());
        }
        Ok(())
    }

    pub fn step(&mut self) -> StepReport {
        self.engine.step(&mut self.network)
    }

    /// Run as `opts` says, saving a text snapshot at every recorded step
    /// when `record_to` is given.
    pub fn run(&mut self, opts: &RunOptions, record_to: Option<&Path>) -> AppResult<RunSummary> {
        if record_to.is_some() && opts.record_every.is_none() {
            return Err(AppError::InvalidInput(
                "recording needs a record interval".to_string(),
            ));
        }
        ln_sim::run::<_, AppError, _>(&mut self.engine, &mut self.network, opts, |step, network| {
            if let Some(base) = record_to {
                let path = snapshot_path(base, step);
                ln_io::text::write(network, &path)?;
                tracing::info!(step, path = %path.display(), "recorded snapshot");
            }
            Ok(())
        })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    pub fn steps(&self) -> u64 {
        self.engine.steps()
    }

    pub fn summary(&self) -> NetworkSummary {
        summarize(&self.network, self.engine.steps())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_names_are_zero_padded() {
        assert_eq!(
            snapshot_path(Path::new("out/leaf.txt"), 120),
            PathBuf::from("out/leaf00000120.txt")
        );
        assert_eq!(
            snapshot_path(Path::new("run"), 7),
            PathBuf::from("run00000007.txt")
        );
    }

    #[test]
    fn rejected_config_keeps_previous() {
        let mut session = Session::new(SimConfig::default()).unwrap();
        let bad = SimConfig {
            dt: -1.0,
            ..SimConfig::default()
        };
        assert!(matches!(session.configure(bad), Err(AppError::Config(_))));
        assert_eq!(session.config().dt, SimConfig::default().dt);
    }

    #[test]
    fn failed_derivation_keeps_law_and_conductances() {
        use ln_graph::{Position, Role};

        let mut session = Session::new(SimConfig::default()).unwrap();
        let net = session.network_mut();
        let a = net.add_junction("a", Position::default(), Role::Source, 0);
        let b = net.add_junction("b", Position::default(), Role::Sink, 0);
        let ch = net.connect(a, b, 1.0, 0.0, Some(0.2)).unwrap();

        // Zero width to a negative power has no finite conductance.
        let law = ConductanceLaw {
            factor: 1.0,
            exponent: -1.0,
        };
        assert!(matches!(session.derive_conductances(law), Err(AppError::Graph(_))));
        assert_eq!(session.config().conductance_law, ConductanceLaw::default());
        assert_eq!(session.network().channel(ch).unwrap().conductance, 0.2);
    }

    #[test]
    fn recording_needs_interval() {
        let mut session = Session::new(SimConfig::default()).unwrap();
        let opts = RunOptions {
            length: ln_sim::RunLength::Steps(3),
            record_every: None,
        };
        let result = session.run(&opts, Some(Path::new("snap.txt")));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert_eq!(session.steps(), 0);
    }
}
