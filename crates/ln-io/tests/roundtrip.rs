use ln_core::SimConfig;
use ln_graph::{Network, Position, Role};
use ln_io::{CodecError, ParseErrorKind, load, load_config, save, save_config, split};

const THREE_NODES: &str = "*Vertices 3\n\
    1 A 0 0 Source\n\
    2 B 1 0 Sink\n\
    3 C 2 0 Neither\n\
    *Edges\n\
    1 2 1.0 1.0 0.05\n\
    2 3 1.0 1.0 0.05\n";

fn channel_values(net: &Network) -> Vec<(f64, f64, f64)> {
    net.channels()
        .map(|(_, c)| (c.conductance, c.length, c.width))
        .collect()
}

#[test]
fn roundtrip_text_three_nodes() {
    let temp_dir = std::env::temp_dir();
    let original = temp_dir.join("ln_io_roundtrip_three.txt");
    let copy = temp_dir.join("ln_io_roundtrip_three_copy.net");
    std::fs::write(&original, THREE_NODES).unwrap();

    let config = SimConfig::default();
    let first = load(&original, &config).unwrap();
    save(&first, &copy).unwrap();
    let second = load(&copy, &config).unwrap();

    assert_eq!(first.junction_count(), second.junction_count());
    assert_eq!(first.channel_count(), second.channel_count());
    assert_eq!(second.source_count(), 1);
    assert_eq!(second.sink_count(), 1);
    for (a, b) in channel_values(&first).iter().zip(channel_values(&second).iter()) {
        assert!((a.0 - b.0).abs() < 1e-12);
        assert!((a.1 - b.1).abs() < 1e-12);
        assert!((a.2 - b.2).abs() < 1e-12);
    }
    let labels: Vec<String> = second.junctions().map(|(_, j)| j.label.clone()).collect();
    assert_eq!(labels, vec!["A", "B", "C"]);
}

#[test]
fn roundtrip_preserves_particles_and_valves() {
    let mut net = Network::default();
    let a = net.add_junction("root", Position::new(0.25, -1.0), Role::Source, 12);
    let b = net.add_junction("tip", Position::new(3.0, 4.0), Role::Sink, 7);
    let c = net.add_junction("mid", Position::new(1.0, 1.0), Role::Transit, 0);
    net.valve_mut(b).unwrap().conductance = 0.0125;
    net.connect(a, c, 1.5, 0.3, None).unwrap();
    net.connect(c, b, 2.0, 0.7, Some(0.42)).unwrap();

    let path = std::env::temp_dir().join("ln_io_roundtrip_valves.txt");
    save(&net, &path).unwrap();
    let loaded = load(&path, &SimConfig::default()).unwrap();

    let particles: Vec<u64> = loaded.junctions().map(|(_, j)| j.particles()).collect();
    assert_eq!(particles, vec![12, 7, 0]);
    let valves: Vec<f64> = loaded
        .junctions()
        .filter_map(|(_, j)| j.valve().map(|v| v.conductance))
        .collect();
    assert_eq!(valves, vec![0.0125]);
    assert_eq!(channel_values(&loaded), channel_values(&net));
    loaded.check_invariants().unwrap();
}

#[test]
fn missing_file_is_io_error() {
    let path = std::env::temp_dir().join("ln_io_definitely_missing.txt");
    let _ = std::fs::remove_file(&path);
    let err = load(&path, &SimConfig::default()).unwrap_err();
    assert!(matches!(err, CodecError::Io { .. }));
}

#[test]
fn parse_error_reports_line() {
    let path = std::env::temp_dir().join("ln_io_bad_vertex.txt");
    std::fs::write(&path, "*Vertices 2\n1 a 0 0\n2 b 0\n").unwrap();
    let err = load(&path, &SimConfig::default()).unwrap_err();
    match err {
        CodecError::Parse { line, kind } => {
            assert_eq!(line, 3);
            assert_eq!(kind, ParseErrorKind::ShortVertexLine { fields: 3 });
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn split_export_writes_five_files() {
    let dir = std::env::temp_dir().join("ln_io_split_export");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("leaf.eln");

    let config = SimConfig::default();
    let net = ln_io::text::decode(THREE_NODES, &config).unwrap();
    save(&net, &path).unwrap();

    for part in ["nodes", "neigh", "edges", "conductivities", "edge_length_and_width"] {
        let companion = split::companion_path(&path, part);
        assert!(companion.exists(), "missing {}", companion.display());
    }
    let edges = std::fs::read_to_string(split::companion_path(&path, "edges")).unwrap();
    assert_eq!(edges, "1 2\n2 3\n");
}

#[test]
fn roundtrip_config_yaml_and_json() {
    let config = SimConfig {
        dt: 0.01,
        adaptive_conductance: true,
        seed: Some(42),
        ..SimConfig::default()
    };
    for name in ["ln_io_config.yaml", "ln_io_config.json"] {
        let path = std::env::temp_dir().join(name);
        save_config(&path, &config).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }
}

#[test]
fn invalid_config_rejected_on_load() {
    let path = std::env::temp_dir().join("ln_io_bad_config.yaml");
    std::fs::write(&path, "dt: -1.0\n").unwrap();
    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, CodecError::Config(_)));
}
