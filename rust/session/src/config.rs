use serde::{Deserialize, Serialize};
use thiserror::Error;

use royale_engine::config::{MemoryConfig, TableConfig};
use royale_engine::errors::ConfigError as RulesError;

use crate::logging::DEFAULT_FILTER;

/// Environment variable overriding the RNG seed.
pub const SEED_ENV: &str = "ROYALE_SEED";
/// Environment variable overriding the opponent policy.
pub const OPPONENT_ENV: &str = "ROYALE_OPPONENT";

/// Delays used to pace the table. They never affect outcomes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PacingConfig {
    pub bot_delay_min_ms: u64,
    pub bot_delay_max_ms: u64,
    /// How long a missed memory pair stays face up
    pub conceal_delay_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            bot_delay_min_ms: 400,
            bot_delay_max_ms: 800,
            conceal_delay_ms: 900,
        }
    }
}

/// Everything fixed at session start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub table: TableConfig,
    pub memory: MemoryConfig,
    pub pacing: PacingConfig,
    /// Starting balance of the shared bankroll
    pub human_bankroll: u32,
    /// Fixed seed for a reproducible session; OS entropy when absent
    pub seed: Option<u64>,
    /// Opponent policy name, see `royale_ai::create_ai`
    pub opponent: String,
    /// `tracing` filter for `init_tracing`; `RUST_LOG` still wins
    pub log_filter: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            table: TableConfig::default(),
            memory: MemoryConfig::default(),
            pacing: PacingConfig::default(),
            human_bankroll: 500,
            seed: None,
            opponent: "baseline".into(),
            log_filter: DEFAULT_FILTER.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error("Bot delay range {min}..{max} ms is empty")]
    Pacing { min: u64, max: u64 },
    #[error("Invalid {name}: {value}")]
    Env { name: &'static str, value: String },
}

impl SessionConfig {
    /// Parses a TOML document; omitted keys keep their defaults.
    ///
    /// ```
    /// use royale_session::config::SessionConfig;
    ///
    /// let cfg = SessionConfig::from_toml_str("seed = 7\n[table]\nplayers = 6\n").unwrap();
    /// assert_eq!(cfg.seed, Some(7));
    /// assert_eq!(cfg.table.players, 6);
    /// assert_eq!(cfg.table.big_blind, 20);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: SessionConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.table.validate()?;
        self.memory.validate()?;
        let PacingConfig {
            bot_delay_min_ms: min,
            bot_delay_max_ms: max,
            ..
        } = self.pacing;
        if min > max {
            return Err(ConfigError::Pacing { min, max });
        }
        Ok(())
    }

    /// Applies `ROYALE_SEED` and `ROYALE_OPPONENT` when set and non-empty.
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(seed) = std::env::var(SEED_ENV).ok().filter(|s| !s.is_empty()) {
            self.seed = Some(seed.parse().map_err(|_| ConfigError::Env {
                name: SEED_ENV,
                value: seed.clone(),
            })?);
        }
        if let Some(opponent) = std::env::var(OPPONENT_ENV).ok().filter(|s| !s.is_empty()) {
            self.opponent = opponent;
        }
        Ok(())
    }
}
