use pig_bot::{DEFAULT_THRESHOLD, ThresholdPolicy};
use pig_core::game::{CHEAT_BONUS, GameRules, WINNING_SCORE};
use pig_core::highscore::DEFAULT_HIGHSCORE_FILE;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_COMPUTER_NAME: &str = "Computer";
const DEFAULT_LOG_PATH: &str = "pig.log.jsonl";

/// Root game configuration, optionally loaded from YAML.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PigConfig {
    pub rules: RulesConfig,
    pub computer: ComputerConfig,
    pub highscores: HighScoresConfig,
    pub seed: Option<u64>,
    pub logging: LoggingConfig,
}

impl PigConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: PigConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.rules.validate()?;
        self.computer.validate()?;
        self.highscores.validate()?;
        self.logging.normalize();
        Ok(())
    }

    pub fn game_rules(&self) -> GameRules {
        GameRules {
            winning_score: self.rules.winning_score,
            cheat_bonus: self.rules.cheat_bonus,
            turn_limit: self.rules.turn_limit,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    pub winning_score: u32,
    pub cheat_bonus: u32,
    pub turn_limit: Option<u32>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            winning_score: WINNING_SCORE,
            cheat_bonus: CHEAT_BONUS,
            turn_limit: None,
        }
    }
}

impl RulesConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.winning_score == 0 {
            return Err(ValidationError::InvalidField {
                field: "rules.winning_score".to_string(),
                message: "winning score must be greater than zero".to_string(),
            });
        }

        if self.cheat_bonus == 0 || self.cheat_bonus >= self.winning_score {
            return Err(ValidationError::InvalidField {
                field: "rules.cheat_bonus".to_string(),
                message: format!(
                    "cheat bonus must be between 1 and {} (below the winning score)",
                    self.winning_score - 1
                ),
            });
        }

        if self.turn_limit == Some(0) {
            return Err(ValidationError::InvalidField {
                field: "rules.turn_limit".to_string(),
                message: "turn limit must be at least 1 when set".to_string(),
            });
        }

        Ok(())
    }
}

/// Defaults offered when setting up a computer opponent.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComputerConfig {
    pub name: String,
    pub threshold: u32,
}

impl Default for ComputerConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_COMPUTER_NAME.to_string(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ComputerConfig {
    fn validate(&mut self) -> Result<(), ValidationError> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "computer.name".to_string(),
                message: "computer name must not be empty".to_string(),
            });
        }
        self.name = trimmed.to_string();

        if self.threshold == 0 {
            return Err(ValidationError::InvalidField {
                field: "computer.threshold".to_string(),
                message: "threshold must be a positive integer".to_string(),
            });
        }

        Ok(())
    }

    /// Policy used when the threshold prompt gets unusable input.
    pub fn fallback_policy(&self) -> ThresholdPolicy {
        ThresholdPolicy::new(i64::from(self.threshold)).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HighScoresConfig {
    pub path: PathBuf,
}

impl Default for HighScoresConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_HIGHSCORE_FILE),
        }
    }
}

impl HighScoresConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "highscores.path".to_string(),
                message: "path must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Logging defaults to warnings on stderr; structured logs go to a file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub enable_structured: bool,
    pub tracing_level: String,
    pub log_path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
        if self.log_path.as_os_str().is_empty() {
            self.log_path = PathBuf::from(DEFAULT_LOG_PATH);
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
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
    "warn".to_string()
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

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
