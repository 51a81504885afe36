//! Configuration management with validation and defaults
//!
//! Centralized configuration for the session ledger and the game
//! engines, loadable from a TOML file.

use crate::errors::{ParlorError, ParlorResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level parlor configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ParlorConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub games: GamesConfig,
}

/// Session ledger configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Funny-money credited to a freshly registered player
    pub welcome_bonus: f64,
    /// Bankroll granted when the admin code is used at registration
    pub admin_bankroll: f64,
    /// Registration name that unlocks the operator profile
    pub admin_code: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            welcome_bonus: 10_000.0,
            admin_bankroll: 10_000_000.0,
            admin_code: "SUPERADMIN".to_string(),
        }
    }
}

/// Per-game knobs
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GamesConfig {
    /// Stake used when the caller does not specify one
    pub default_stake: f64,
    /// Mine count used when the caller does not specify one
    pub default_mine_count: u8,
}

impl Default for GamesConfig {
    fn default() -> Self {
        Self {
            default_stake: 10.0,
            default_mine_count: 3,
        }
    }
}

impl ParlorConfig {
    /// Configuration for demo sessions with a large starting bankroll.
    pub fn high_roller() -> Self {
        Self {
            session: SessionConfig {
                welcome_bonus: 1_000_000.0,
                ..Default::default()
            },
            games: GamesConfig {
                default_stake: 1_000.0,
                ..Default::default()
            },
        }
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> ParlorResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ParlorError::Config(format!("failed to read config file: {}", e)))?;
        let config: ParlorConfig =
            toml::from_str(&raw).map_err(|e| ParlorError::Config(format!("parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> ParlorResult<()> {
        if self.session.welcome_bonus <= 0.0 {
            return Err(ParlorError::Config(
                "welcome_bonus must be > 0".to_string(),
            ));
        }
        if self.session.admin_bankroll < self.session.welcome_bonus {
            return Err(ParlorError::Config(
                "admin_bankroll must be at least the welcome bonus".to_string(),
            ));
        }
        if self.session.admin_code.is_empty() {
            return Err(ParlorError::Config("admin_code must not be empty".to_string()));
        }
        if self.games.default_stake <= 0.0 {
            return Err(ParlorError::Config("default_stake must be > 0".to_string()));
        }
        if !(1..=24).contains(&self.games.default_mine_count) {
            return Err(ParlorError::Config(
                "default_mine_count must be in 1..=24".to_string(),
            ));
        }
        Ok(())
    }
}
