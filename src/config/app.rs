//! Main application configuration
//!
//! This module defines the top-level configuration for the solo arena
//! module, including environment variable loading, TOML files and validation.

use crate::config::solo::SoloQueueSettings;
use crate::config::talents::TalentTabSettings;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub solo: SoloQueueSettings,
    pub talents: TalentTabSettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "solo-arena".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Solo queue settings
        if let Ok(penalty) = env::var("SOLO_3V3_RATING_PENALTY_LEAVE_DURING_MATCH") {
            self.solo.rating_penalty_leave_during_match = penalty.parse().map_err(|_| {
                anyhow!(
                    "Invalid SOLO_3V3_RATING_PENALTY_LEAVE_DURING_MATCH value: {}",
                    penalty
                )
            })?;
        }
        if let Ok(penalty) = env::var("SOLO_3V3_RATING_PENALTY_LEAVE_BEFORE_MATCH_START") {
            self.solo.rating_penalty_leave_before_match_start = penalty.parse().map_err(|_| {
                anyhow!(
                    "Invalid SOLO_3V3_RATING_PENALTY_LEAVE_BEFORE_MATCH_START value: {}",
                    penalty
                )
            })?;
        }
        if let Ok(stop) = env::var("SOLO_3V3_STOP_GAME_INCOMPLETE") {
            self.solo.stop_game_incomplete = stop
                .parse()
                .map_err(|_| anyhow!("Invalid SOLO_3V3_STOP_GAME_INCOMPLETE value: {}", stop))?;
        }
        if let Ok(block) = env::var("ARENA_3V3_BLOCK_FORBIDDEN_TALENTS") {
            self.solo.block_forbidden_talents = block
                .parse()
                .map_err(|_| anyhow!("Invalid ARENA_3V3_BLOCK_FORBIDDEN_TALENTS value: {}", block))?;
        }
        if let Ok(threshold) = env::var("SOLO_3V3_FORBIDDEN_TALENT_THRESHOLD") {
            self.solo.forbidden_talent_threshold = threshold.parse().map_err(|_| {
                anyhow!("Invalid SOLO_3V3_FORBIDDEN_TALENT_THRESHOLD value: {}", threshold)
            })?;
        }
        if let Ok(balance) = env::var("SOLO_3V3_BALANCE_TEAMS_BY_MMR") {
            self.solo.balance_teams_by_mmr = balance
                .parse()
                .map_err(|_| anyhow!("Invalid SOLO_3V3_BALANCE_TEAMS_BY_MMR value: {}", balance))?;
        }
        if let Ok(mmr) = env::var("SOLO_3V3_DEFAULT_MMR") {
            self.solo.default_matchmaker_rating = mmr
                .parse()
                .map_err(|_| anyhow!("Invalid SOLO_3V3_DEFAULT_MMR value: {}", mmr))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    if config.solo.forbidden_talent_threshold == 0 {
        return Err(anyhow!("Forbidden talent threshold must be greater than 0"));
    }

    let talents = &config.talents;
    if talents.melee.is_empty() || talents.range.is_empty() || talents.healer.is_empty() {
        return Err(anyhow!("Every talent category needs at least one talent tab"));
    }
    if talents
        .melee
        .iter()
        .chain(&talents.range)
        .chain(&talents.healer)
        .chain(&talents.forbidden)
        .any(|tab| *tab == 0)
    {
        return Err(anyhow!("Talent tab id 0 is reserved"));
    }

    Ok(())
}
