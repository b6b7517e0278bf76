use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;
use yard_core::game::GameConfig;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root run configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RunConfig {
    pub run_id: String,
    /// Map file in the layout text format. Relative paths are resolved
    /// against the config file's directory by [`RunConfig::from_path`].
    pub layout: PathBuf,
    pub game: GameConfig,
    #[serde(default)]
    pub agents: AgentsConfig,
    pub games: GamesConfig,
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RunConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: RunConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        if cfg.layout.is_relative() {
            if let Some(dir) = path.parent() {
                cfg.layout = dir.join(&cfg.layout);
            }
        }
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        if self.layout.as_os_str().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "layout".to_string(),
                message: "layout path must not be empty".to_string(),
            });
        }
        self.game
            .validate()
            .map_err(|err| ValidationError::InvalidField {
                field: "game".to_string(),
                message: err.to_string(),
            })?;
        self.games.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        Ok(())
    }

    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: resolve_template(&self.run_id, &self.outputs.jsonl),
        }
    }
}

/// Which strategy drives each side.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct AgentsConfig {
    #[serde(default = "default_evader_kind")]
    pub evader: StrategyKind,
    #[serde(default = "default_seeker_kind")]
    pub seekers: StrategyKind,
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            evader: default_evader_kind(),
            seekers: default_seeker_kind(),
        }
    }
}

fn default_evader_kind() -> StrategyKind {
    StrategyKind::Random
}

fn default_seeker_kind() -> StrategyKind {
    StrategyKind::Belief
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Random,
    /// Tracks the evader with an exact belief; the evader side plays randomly.
    Belief,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GamesConfig {
    pub count: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GamesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.count == 0 {
            return Err(ValidationError::InvalidField {
                field: "games.count".to_string(),
                message: "number of games must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputsConfig {
    pub jsonl: String,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        if self.jsonl.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "outputs.jsonl".to_string(),
                message: "path must not be empty".to_string(),
            });
        }
        if resolve_template(run_id, &self.jsonl).file_name().is_none() {
            return Err(ValidationError::InvalidField {
                field: "outputs.jsonl".to_string(),
                message: "resolved path does not name a file".to_string(),
            });
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    PathBuf::from(template.replace("{run_id}", run_id))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: PathBuf,
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
