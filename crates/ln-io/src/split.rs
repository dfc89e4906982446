//! Export-only "split" format: one logical network spread over five files.
//!
//! For `leaf.eln` the companions are `leaf_nodes.eln` (x y per junction),
//! `leaf_neigh.eln` (degree per junction), `leaf_edges.eln` (endpoint pairs,
//! lower number first), `leaf_conductivities.eln` and
//! `leaf_edge_length_and_width.eln`. Sources are numbered before all other
//! junctions. Nothing reads these files back.

use std::path::{Path, PathBuf};

use ln_graph::{IndexMap, Network};

use crate::error::CodecResult;
use crate::files;

/// Contents of the five companion files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitFiles {
    pub nodes: String,
    pub neighbours: String,
    pub edges: String,
    pub conductivities: String,
    pub lengths_and_widths: String,
}

impl SplitFiles {
    fn parts(&self) -> [(&'static str, &str); 5] {
        [
            ("nodes", self.nodes.as_str()),
            ("neigh", self.neighbours.as_str()),
            ("edges", self.edges.as_str()),
            ("conductivities", self.conductivities.as_str()),
            ("edge_length_and_width", self.lengths_and_widths.as_str()),
        ]
    }
}

/// Junction order for export: sources first, then the rest, each in slot order.
pub fn export_order(network: &Network) -> IndexMap {
    let (mut order, rest): (Vec<_>, Vec<_>) = network
        .junctions()
        .map(|(id, j)| (id, j.is_source()))
        .partition(|&(_, source)| source);
    order.extend(rest);
    IndexMap::with_junction_order(network, order.into_iter().map(|(id, _)| id).collect())
}

pub fn encode(network: &Network) -> SplitFiles {
    let map = export_order(network);
    let mut out = SplitFiles::default();

    for &id in map.junction_ids() {
        let Some(j) = network.junction(id) else {
            continue;
        };
        out.nodes
            .push_str(&format!("{} {}\n", j.position.x, j.position.y));
        out.neighbours.push_str(&format!("{}\n", j.degree()));
    }

    for (_, ch) in network.channels() {
        let (Ok(a), Ok(b)) = (map.junction_idx(ch.from()), map.junction_idx(ch.to())) else {
            continue;
        };
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        out.edges.push_str(&format!("{} {}\n", lo + 1, hi + 1));
        out.conductivities
            .push_str(&format!("{}\n", ch.conductance));
        out.lengths_and_widths
            .push_str(&format!("{} {}\n", ch.length, ch.width));
    }
    out
}

/// Path of one companion file for `path`.
pub fn companion_path(path: &Path, part: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}_{part}.eln"))
}

/// Write all five companion files next to `path`.
pub fn write(network: &Network, path: &Path) -> CodecResult<()> {
    let out = encode(network);
    for (part, content) in out.parts() {
        files::write(&companion_path(path, part), content)?;
    }
    tracing::info!(path = %path.display(), "exported split network");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ln_graph::{Position, Role};

    #[test]
    fn sources_come_first() {
        let mut net = Network::default();
        let a = net.add_junction("a", Position::new(0.0, 0.0), Role::Transit, 0);
        let b = net.add_junction("b", Position::new(1.0, 0.0), Role::Sink, 0);
        let s = net.add_junction("s", Position::new(5.0, 5.0), Role::Source, 0);
        net.connect(a, s, 2.0, 0.5, Some(0.1)).unwrap();
        net.connect(b, a, 1.0, 1.0, Some(0.2)).unwrap();

        let files = encode(&net);
        assert_eq!(files.nodes, "5 5\n0 0\n1 0\n");
        assert_eq!(files.neighbours, "1\n2\n1\n");
        assert_eq!(files.edges, "1 2\n2 3\n");
        assert_eq!(files.conductivities, "0.1\n0.2\n");
        assert_eq!(files.lengths_and_widths, "2 0.5\n1 1\n");
    }

    #[test]
    fn companion_names() {
        let p = Path::new("/tmp/run/leaf.eln");
        assert_eq!(
            companion_path(p, "nodes"),
            PathBuf::from("/tmp/run/leaf_nodes.eln")
        );
        assert_eq!(
            companion_path(p, "edge_length_and_width"),
            PathBuf::from("/tmp/run/leaf_edge_length_and_width.eln")
        );
    }
}
