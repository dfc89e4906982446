//! Simulation parameters on disk, as YAML or JSON.

use std::path::Path;

use ln_core::SimConfig;

use crate::error::{CodecError, CodecResult};
use crate::files;

enum ConfigFormat {
    Yaml,
    Json,
}

fn config_format(path: &Path) -> CodecResult<ConfigFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
        Some("json") => Ok(ConfigFormat::Json),
        _ => Err(CodecError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load and validate a config. Missing fields take their defaults.
pub fn load_config(path: &Path) -> CodecResult<SimConfig> {
    let content = files::read(path)?;
    let config: SimConfig = match config_format(path)? {
        ConfigFormat::Yaml => serde_yaml::from_str(&content)?,
        ConfigFormat::Json => serde_json::from_str(&content)?,
    };
    config.validate()?;
    Ok(config)
}

pub fn save_config(path: &Path, config: &SimConfig) -> CodecResult<()> {
    config.validate()?;
    let content = match config_format(path)? {
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
    };
    files::write(path, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_takes_defaults() {
        let config: SimConfig = serde_yaml::from_str("dt: 0.01\nadaptive_conductance: true\n").unwrap();
        assert_eq!(config.dt, 0.01);
        assert!(config.adaptive_conductance);
        assert_eq!(config.source_injection, SimConfig::default().source_injection);
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<SimConfig, _> = serde_json::from_str(r#"{"dt": 0.1, "speed": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unsupported_extension() {
        assert!(matches!(
            save_config(Path::new("settings.toml"), &SimConfig::default()),
            Err(CodecError::UnsupportedFormat { .. })
        ));
    }
}
