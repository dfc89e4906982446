//! Format selection by file extension.

use std::path::Path;

use ln_core::SimConfig;
use ln_graph::Network;

use crate::error::{CodecError, CodecResult};
use crate::{split, text};

/// On-disk network formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkFormat {
    /// `.txt` / `.net`: the line-oriented text format.
    Text,
    /// `.eln`: five companion files, write-only.
    Split,
}

impl NetworkFormat {
    pub fn from_path(path: &Path) -> CodecResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("txt") | Some("net") => Ok(NetworkFormat::Text),
            Some("eln") => Ok(NetworkFormat::Split),
            _ => Err(CodecError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn is_readable(self) -> bool {
        matches!(self, NetworkFormat::Text)
    }
}

/// Load a network, choosing the format from the extension.
pub fn load(path: &Path, config: &SimConfig) -> CodecResult<Network> {
    match NetworkFormat::from_path(path)? {
        NetworkFormat::Text => {
            let network = text::read(path, config)?;
            tracing::info!(
                path = %path.display(),
                junctions = network.junction_count(),
                channels = network.channel_count(),
                "loaded network"
            );
            Ok(network)
        }
        NetworkFormat::Split => Err(CodecError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Save a network, choosing the format from the extension.
pub fn save(network: &Network, path: &Path) -> CodecResult<()> {
    match NetworkFormat::from_path(path)? {
        NetworkFormat::Text => text::write(network, path),
        NetworkFormat::Split => split::write(network, path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions() {
        assert_eq!(
            NetworkFormat::from_path(Path::new("a/leaf.txt")).unwrap(),
            NetworkFormat::Text
        );
        assert_eq!(
            NetworkFormat::from_path(Path::new("leaf.NET")).unwrap(),
            NetworkFormat::Text
        );
        assert_eq!(
            NetworkFormat::from_path(Path::new("leaf.eln")).unwrap(),
            NetworkFormat::Split
        );
        assert!(matches!(
            NetworkFormat::from_path(Path::new("leaf.csv")),
            Err(CodecError::UnsupportedFormat { .. })
        ));
        assert!(NetworkFormat::from_path(Path::new("leaf")).is_err());
    }

    #[test]
    fn split_is_not_readable() {
        assert!(!NetworkFormat::Split.is_readable());
        let err = load(Path::new("leaf.eln"), &SimConfig::default()).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedFormat { .. }));
    }
}
