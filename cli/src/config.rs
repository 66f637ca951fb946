//! `cinder` configuration.
//!
//! Loaded from a TOML file via [`CliConfig::from_toml_file`]; every field has
//! a default, so an empty file is valid. Command-line flags and `CINDER_*`
//! environment variables override file values.

use std::path::{Path, PathBuf};

use cinder_types::LedgerParams;
use cinder_utils::LogFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the ledger snapshot is kept between invocations.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    #[serde(default)]
    pub log_format: LogFormat,

    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Genesis values used by `cinder init`.
    #[serde(default)]
    pub token: TokenConfig,

    /// Protocol parameters for newly created ledgers.
    #[serde(default)]
    pub params: LedgerParams,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    /// Address or label of the initial owner; falls back to `--caller`.
    pub owner: Option<String>,
    /// Address or label of the treasury; a derived address when unset.
    pub treasury: Option<String>,
    /// Whole-token decimal string credited to the owner at genesis.
    pub initial_supply: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "Cinder".to_string(),
            symbol: "CDR".to_string(),
            owner: None,
            treasury: None,
            initial_supply: "0".to_string(),
        }
    }
}

fn default_state_file() -> PathBuf {
    PathBuf::from("cinder-state.bin")
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl CliConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            token: TokenConfig::default(),
            params: LedgerParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = CliConfig::default();
        let rendered = config.to_toml_string().unwrap();
        let parsed = CliConfig::from_toml_str(&rendered).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = CliConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.state_file, PathBuf::from("cinder-state.bin"));
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.params.burn_rate_timelock_secs, 172_800);
        assert_eq!(config.token.symbol, "CDR");
    }

    #[test]
    fn partial_tables_override() {
        let toml = r#"
            log_format = "json"

            [token]
            symbol = "ASH"
            initial_supply = "1000"

            [params]
            mint_cooldown_secs = 60
        "#;
        let config = CliConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.token.symbol, "ASH");
        assert_eq!(config.token.name, "Cinder");
        assert_eq!(config.params.mint_cooldown_secs, 60);
        assert_eq!(config.params.max_proposed_rate, 100);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "state_file = \"/tmp/ledger.bin\"").unwrap();
        let config = CliConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.state_file, PathBuf::from("/tmp/ledger.bin"));
    }

    #[test]
    fn missing_file_returns_read_error() {
        let result = CliConfig::from_toml_file(Path::new("/nonexistent/cinder.toml"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
