//! File access with the path attached to failures.

use std::path::Path;

use crate::error::{CodecError, CodecResult};

pub(crate) fn read(path: &Path) -> CodecResult<String> {
    std::fs::read_to_string(path).map_err(|e| CodecError::io(path, e))
}

pub(crate) fn write(path: &Path, content: &str) -> CodecResult<()> {
    std::fs::write(path, content).map_err(|e| CodecError::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}
