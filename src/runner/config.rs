//! Engine configuration.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_MAXIMUM_EXECUTION_TIME: Duration = Duration::from_secs(60);
const DEFAULT_MAX_CALL_DEPTH: usize = 512;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// On-disk layout. Tables other than `[engine]` and unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    engine: Option<EngineSection>,
}

#[derive(Debug, Deserialize)]
struct EngineSection {
    maximum_execution_time_ms: Option<u64>,
    max_call_depth: Option<usize>,
    install_std_lib: Option<bool>,
}

/// Settings applied when an engine is created.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Ceiling for any single execute/evaluate/call.
    pub maximum_execution_time: Duration,
    /// Nested user-function calls allowed before a `RangeError`.
    pub max_call_depth: usize,
    /// Whether the standard natives are installed on the global object.
    pub install_std_lib: bool,
}

impl EngineConfig {
    pub fn new() -> Self {
        EngineConfig {
            maximum_execution_time: DEFAULT_MAXIMUM_EXECUTION_TIME,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            install_std_lib: true,
        }
    }

    pub fn with_maximum_execution_time(mut self, timeout: Duration) -> Self {
        self.maximum_execution_time = timeout;
        self
    }

    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn with_std_lib(mut self, install: bool) -> Self {
        self.install_std_lib = install;
        self
    }

    /// Load configuration from a TOML file.
    ///
    /// Expected format:
    /// ```toml
    /// [engine]
    /// maximum_execution_time_ms = 5000
    /// max_call_depth = 256
    /// install_std_lib = true
    /// ```
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string. Keys missing from the
    /// `[engine]` table keep their defaults.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        let mut config = EngineConfig::new();
        if let Some(engine) = file.engine {
            if let Some(ms) = engine.maximum_execution_time_ms {
                config.maximum_execution_time = Duration::from_millis(ms);
            }
            if let Some(depth) = engine.max_call_depth {
                config.max_call_depth = depth;
            }
            if let Some(install) = engine.install_std_lib {
                config.install_std_lib = install;
            }
        }
        Ok(config)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(EngineConfig::parse("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_parse_engine_section() {
        let config = EngineConfig::parse(
            r#"
            # limits
            [engine]
            maximum_execution_time_ms = 250 # quarter second
            max_call_depth = 64
            install_std_lib = false
            colour = "blue"

            [other]
            max_call_depth = 1
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            EngineConfig::new()
                .with_maximum_execution_time(Duration::from_millis(250))
                .with_max_call_depth(64)
                .with_std_lib(false)
        );
    }

    #[test]
    fn test_toml_number_forms() {
        let config = EngineConfig::parse(
            "engine = { maximum_execution_time_ms = 5_000, max_call_depth = 0x40 }",
        )
        .unwrap();
        assert_eq!(config.maximum_execution_time, Duration::from_millis(5000));
        assert_eq!(config.max_call_depth, 64);
        assert!(config.install_std_lib);
    }

    #[test]
    fn test_malformed_values_are_errors() {
        for bad in [
            "[engine]\nmax_call_depth = lots",
            "[engine]\nmax_call_depth = -1",
            "[engine]\ninstall_std_lib = \"yes\"",
            "[engine]\nmaximum_execution_time_ms = 1.5",
        ] {
            let err = EngineConfig::parse(bad).unwrap_err();
            assert!(matches!(err, ConfigError::Parse(_)), "{}", bad);
            assert!(err.to_string().starts_with("Invalid config: "));
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            EngineConfig::load(Path::new("/definitely/not/here.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
