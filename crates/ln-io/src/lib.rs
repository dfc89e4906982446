//! ln-io: network files and config files.
//!
//! The text format is the only one read back; the split format is export-only.

pub mod config_file;
pub mod error;
mod files;
pub mod format;
pub mod split;
pub mod text;

pub use config_file::{load_config, save_config};
pub use error::{CodecError, CodecResult, ParseErrorKind};
pub use format::{NetworkFormat, load, save};
