//! Line-oriented network text format.
//!
//! ```text
//! *Vertices 3
//! 1 A 0 0 10 Source
//! 2 B 1 0 0 Sink 0.0005
//! 3 C 2 0 0 Neither
//! *Edges
//! 1 2 1 1 0.05
//! 2 3 1 1 0.05
//! ```
//!
//! Vertex lines are `id label x y [particles role [valve conductance]]`.
//! Edge lines are read by field count:
//!
//! | fields | meaning |
//! |---|---|
//! | 2 | `from to` (length and width 1) |
//! | 3 | `from to length` (width 1) |
//! | 5 | `from to length width conductance` |
//! | 14 | `from to length`, nine unused columns, `width`, one unused column |
//! | other | `from to length width`, extra columns unused |
//!
//! Without an explicit conductance the network's conductance law derives one.

use std::collections::BTreeMap;
use std::path::Path;

use ln_core::{JunctionId, Real, SimConfig};
use ln_graph::{IndexMap, Network, Position, Role};

use crate::error::{CodecError, CodecResult, ParseErrorKind};
use crate::files;

/// Parsed vertex line, kept until the whole vertex section is known.
struct VertexLine<'a> {
    label: &'a str,
    position: Position,
    particles: u64,
    role: Role,
    valve: Option<Real>,
}

struct EdgeLine {
    from: usize,
    to: usize,
    length: Real,
    width: Real,
    conductance: Option<Real>,
}

/// Parse a network. `config` becomes the network's configuration and
/// supplies defaults the file leaves out.
pub fn decode(input: &str, config: &SimConfig) -> CodecResult<Network> {
    let mut network = Network::new(config.clone())?;
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text))
        .filter(|(_, text)| !text.trim().is_empty());

    let (header_line, header) = lines
        .next()
        .ok_or(CodecError::parse(1, ParseErrorKind::MalformedHeader))?;
    let count = parse_header(header)
        .ok_or(CodecError::parse(header_line, ParseErrorKind::MalformedHeader))?;

    // Keyed by id so memory follows the lines actually read, not the header count.
    let mut vertices: BTreeMap<usize, VertexLine> = BTreeMap::new();
    let mut section_end = header_line;
    for (line, text) in lines.by_ref() {
        section_end = line;
        if is_marker(text) {
            break;
        }
        let (id, vertex) = parse_vertex(text, count, config).map_err(|k| CodecError::parse(line, k))?;
        if vertices.insert(id, vertex).is_some() {
            return Err(CodecError::parse(line, ParseErrorKind::DuplicateVertex { id }));
        }
    }
    if vertices.len() < count {
        let id = vertices
            .keys()
            .zip(1..)
            .find(|&(&id, expected)| id != expected)
            .map_or(vertices.len() + 1, |(_, expected)| expected);
        return Err(CodecError::parse(section_end, ParseErrorKind::MissingVertex { id }));
    }

    let mut ids: Vec<JunctionId> = Vec::with_capacity(vertices.len());
    for vertex in vertices.values() {
        let junction = network.add_junction(vertex.label, vertex.position, vertex.role, vertex.particles);
        if let Some(conductance) = vertex.valve {
            network.valve_mut(junction)?.conductance = conductance;
        }
        ids.push(junction);
    }

    for (line, text) in lines {
        let edge = parse_edge(text).map_err(|k| CodecError::parse(line, k))?;
        let endpoint = |n: usize| {
            n.checked_sub(1)
                .and_then(|i| ids.get(i).copied())
                .ok_or(CodecError::parse(line, ParseErrorKind::UnknownEndpoint { id: n }))
        };
        let (from, to) = (endpoint(edge.from)?, endpoint(edge.to)?);
        network.connect(from, to, edge.length, edge.width, edge.conductance)?;
    }

    network.refresh_extrema();
    tracing::debug!(
        junctions = network.junction_count(),
        channels = network.channel_count(),
        "decoded network"
    );
    Ok(network)
}

/// Serialize in the text format. Junctions are numbered from 1 in slot order.
pub fn encode(network: &Network) -> String {
    let map = IndexMap::from_network(network);
    let mut out = format!("*Vertices {}\n", map.junction_count());
    for (i, &id) in map.junction_ids().iter().enumerate() {
        let Some(j) = network.junction(id) else {
            continue;
        };
        out.push_str(&format!(
            "{} {} {} {} {} {}",
            i + 1,
            sanitize_label(&j.label),
            j.position.x,
            j.position.y,
            j.particles(),
            role_name(j.role())
        ));
        if let Some(valve) = j.valve() {
            out.push_str(&format!(" {}", valve.conductance));
        }
        out.push('\n');
    }
    out.push_str("*Edges\n");
    for (_, ch) in network.channels() {
        let (Ok(a), Ok(b)) = (map.junction_idx(ch.from()), map.junction_idx(ch.to())) else {
            continue;
        };
        out.push_str(&format!(
            "{} {} {} {} {}\n",
            a + 1,
            b + 1,
            ch.length,
            ch.width,
            ch.conductance
        ));
    }
    out
}

/// Load a text-format network from disk.
pub fn read(path: &Path, config: &SimConfig) -> CodecResult<Network> {
    let content = files::read(path)?;
    decode(&content, config)
}

/// Save a network in the text format.
pub fn write(network: &Network, path: &Path) -> CodecResult<()> {
    files::write(path, &encode(network))
}

pub(crate) fn role_name(role: Role) -> &'static str {
    match role {
        Role::Source => "Source",
        Role::Sink => "Sink",
        Role::Transit => "Neither",
    }
}

fn parse_role(token: &str) -> Option<Role> {
    match token {
        "Source" => Some(Role::Source),
        "Sink" => Some(Role::Sink),
        "Neither" => Some(Role::Transit),
        _ => None,
    }
}

/// Labels are a single token on disk.
fn sanitize_label(label: &str) -> String {
    let joined: String = label
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    if joined.is_empty() { "-".to_string() } else { joined }
}

fn is_marker(text: &str) -> bool {
    text.trim_start().starts_with('*')
}

fn parse_header(text: &str) -> Option<usize> {
    let mut tokens = text.split_whitespace();
    tokens.next()?;
    tokens.next()?.parse().ok()
}

fn parse_vertex<'a>(
    text: &'a str,
    count: usize,
    config: &SimConfig,
) -> Result<(usize, VertexLine<'a>), ParseErrorKind> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(ParseErrorKind::ShortVertexLine {
            fields: fields.len(),
        });
    }
    let id: usize = integer(fields[0], "vertex id")?;
    if id == 0 || id > count {
        return Err(ParseErrorKind::VertexIdOutOfRange { id, count });
    }
    let position = Position::new(
        number(fields[2], "x coordinate")?,
        number(fields[3], "y coordinate")?,
    );

    let (particles, role, valve) = match &fields[4..] {
        [] => (config.initial_particles, Role::Sink, None),
        [single] => match parse_role(single) {
            Some(role) => (config.initial_particles, role, None),
            None => (integer(single, "particle count")?, Role::Sink, None),
        },
        [n, role, rest @ ..] => {
            let particles = integer(n, "particle count")?;
            let role = parse_role(role).ok_or_else(|| ParseErrorKind::UnknownRole {
                token: role.to_string(),
            })?;
            let valve = match rest.first() {
                Some(token) if role == Role::Sink => {
                    Some(non_negative(number(token, "valve conductance")?, "valve conductance")?)
                }
                Some(_) => {
                    tracing::warn!(id, "valve conductance on a non-sink vertex ignored");
                    None
                }
                None => None,
            };
            if rest.len() > 1 {
                tracing::warn!(id, extra = rest.len() - 1, "trailing vertex fields ignored");
            }
            (particles, role, valve)
        }
    };

    Ok((
        id,
        VertexLine {
            label: fields[1],
            position,
            particles,
            role,
            valve,
        },
    ))
}

fn parse_edge(text: &str) -> Result<EdgeLine, ParseErrorKind> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() < 2 {
        return Err(ParseErrorKind::ShortEdgeLine);
    }
    let from = integer(fields[0], "edge endpoint")?;
    let to = integer(fields[1], "edge endpoint")?;
    let (length, width, conductance) = match fields.len() {
        2 => (1.0, 1.0, None),
        3 => (number(fields[2], "edge length")?, 1.0, None),
        5 => (
            number(fields[2], "edge length")?,
            number(fields[3], "edge width")?,
            Some(non_negative(number(fields[4], "edge conductance")?, "edge conductance")?),
        ),
        14 => (
            number(fields[2], "edge length")?,
            number(fields[12], "edge width")?,
            None,
        ),
        n => {
            if n > 4 {
                tracing::warn!(fields = n, "edge fields after the fourth ignored");
            }
            (
                number(fields[2], "edge length")?,
                number(fields[3], "edge width")?,
                None,
            )
        }
    };
    if length <= 0.0 {
        return Err(ParseErrorKind::OutOfRange {
            what: "edge length",
            bound: "positive",
            value: length,
        });
    }
    Ok(EdgeLine {
        from,
        to,
        length,
        width: non_negative(width, "edge width")?,
        conductance,
    })
}

fn integer<T: std::str::FromStr>(token: &str, what: &'static str) -> Result<T, ParseErrorKind> {
    token.parse().map_err(|_| ParseErrorKind::UnreadableNumber {
        what,
        token: token.to_string(),
    })
}

fn number(token: &str, what: &'static str) -> Result<Real, ParseErrorKind> {
    match token.parse::<Real>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ParseErrorKind::UnreadableNumber {
            what,
            token: token.to_string(),
        }),
    }
}

fn non_negative(value: Real, what: &'static str) -> Result<Real, ParseErrorKind> {
    if value < 0.0 {
        Err(ParseErrorKind::OutOfRange {
            what,
            bound: "non-negative",
            value,
        })
    } else {
        Ok(value)
    }
}
