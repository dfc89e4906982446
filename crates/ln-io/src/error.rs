//! Codec error types.

use std::path::PathBuf;

use ln_core::LnError;
use ln_graph::GraphError;
use thiserror::Error;

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Parse error at line {line}: {kind}")]
    Parse { line: usize, kind: ParseErrorKind },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid configuration: {0}")]
    Config(#[from] LnError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What was wrong with a line of a network file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    #[error("header must be `<tag> <vertex count>`")]
    MalformedHeader,

    #[error("vertex line needs at least `id label x y`, found {fields} field(s)")]
    ShortVertexLine { fields: usize },

    #[error("vertex id {id} outside 1..={count}")]
    VertexIdOutOfRange { id: usize, count: usize },

    #[error("vertex id {id} appears twice")]
    DuplicateVertex { id: usize },

    #[error("vertex id {id} is never defined")]
    MissingVertex { id: usize },

    #[error("cannot read {what} from `{token}`")]
    UnreadableNumber { what: &'static str, token: String },

    #[error("unknown role `{token}` (expected Source, Sink or Neither)")]
    UnknownRole { token: String },

    #[error("{what} must be {bound}, got {value}")]
    OutOfRange {
        what: &'static str,
        bound: &'static str,
        value: f64,
    },

    #[error("edge line needs at least `from to`")]
    ShortEdgeLine,

    #[error("edge endpoint {id} is not a defined vertex")]
    UnknownEndpoint { id: usize },
}

impl CodecError {
    pub(crate) fn parse(line: usize, kind: ParseErrorKind) -> Self {
        CodecError::Parse { line, kind }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CodecError::Io {
            path: path.into(),
            source,
        }
    }
}
