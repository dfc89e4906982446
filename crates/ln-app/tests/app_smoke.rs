//! Smoke test for the ln-app session layer.

use std::path::PathBuf;

use ln_app::{AppError, Session, snapshot_path};
use ln_core::{ConductanceLaw, SimConfig};
use ln_sim::{RunLength, RunOptions};

fn write_network(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("ln_app_smoke");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

const CHAIN: &str = "*Vertices 3\n\
    1 src 0 0 0 Source\n\
    2 mid 1 0 0 Neither\n\
    3 tip 2 0 0 Sink 0.5\n\
    *Edges\n\
    1 2 1 1 5\n\
    2 3 1 1 5\n";

fn seeded() -> SimConfig {
    SimConfig {
        dt: 0.05,
        source_injection: 100,
        seed: Some(2024),
        ..SimConfig::default()
    }
}

#[test]
fn load_run_and_record() {
    let path = write_network("chain.txt", CHAIN);
    let mut session = Session::new(seeded()).unwrap();
    session.load(&path).unwrap();
    assert_eq!(session.source(), Some(path.as_path()));

    let summary = session.summary();
    assert_eq!(summary.junctions, 3);
    assert_eq!(summary.channels, 2);
    assert_eq!(summary.valves, 1);
    assert_eq!(summary.sources, 1);
    assert_eq!(summary.sinks, 1);

    let base = std::env::temp_dir().join("ln_app_smoke").join("snap.txt");
    let opts = RunOptions {
        length: RunLength::Steps(30),
        record_every: Some(10),
    };
    let run = session.run(&opts, Some(&base)).unwrap();
    assert_eq!(run.records, 3);
    assert_eq!(session.steps(), 30);

    for step in [10, 20, 30] {
        let snap = snapshot_path(&base, step);
        assert!(snap.exists(), "missing {}", snap.display());
        let mut reloaded = Session::new(seeded()).unwrap();
        reloaded.load(&snap).unwrap();
        assert_eq!(reloaded.summary().channels, 2);
    }

    let after = session.summary();
    assert!(after.total_particles > 0);
    assert!((after.elapsed_time - 1.5).abs() < 1e-9);
}

#[test]
fn failed_load_keeps_network() {
    let good = write_network("good.txt", CHAIN);
    let bad = write_network("bad.txt", "*Vertices 2\n1 a 0 0\n");
    let mut session = Session::new(SimConfig::default()).unwrap();
    session.load(&good).unwrap();

    let err = session.load(&bad).unwrap_err();
    assert!(matches!(err, AppError::Codec(_)));
    assert_eq!(session.network().junction_count(), 3);
    assert_eq!(session.source(), Some(good.as_path()));
}

#[test]
fn same_seed_same_trajectory() {
    let path = write_network("repeat.txt", CHAIN);
    let mut totals = Vec::new();
    for _ in 0..2 {
        let mut session = Session::new(seeded()).unwrap();
        session.load(&path).unwrap();
        for _ in 0..50 {
            session.step();
        }
        totals.push(session.summary().total_particles);
    }
    assert_eq!(totals[0], totals[1]);
}

#[test]
fn derive_conductances_uses_new_law() {
    let path = write_network("derive.txt", CHAIN);
    let mut session = Session::new(SimConfig::default()).unwrap();
    session.load(&path).unwrap();
    session
        .derive_conductances(ConductanceLaw {
            factor: 3.0,
            exponent: 1.0,
        })
        .unwrap();
    assert!(
        session
            .network()
            .channels()
            .all(|(_, c)| (c.conductance - 3.0).abs() < 1e-12)
    );
    assert_eq!(session.summary().extrema.max_conductance, 3.0);
}

#[test]
fn save_then_export() {
    let path = write_network("export.txt", CHAIN);
    let mut session = Session::new(SimConfig::default()).unwrap();
    session.load(&path).unwrap();

    let out = std::env::temp_dir().join("ln_app_smoke").join("export.eln");
    session.save(&out).unwrap();
    let nodes = out.with_file_name("export_nodes.eln");
    assert_eq!(std::fs::read_to_string(nodes).unwrap(), "0 0\n1 0\n2 0\n");
}
