use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const MAX_ROUNDS: u32 = 1000;
pub const MAX_ATTEMPTS: u32 = 100;
pub const MAX_ROUND_SECONDS: u32 = 3600;

/// Game rules. Every field falls back to its default when missing from the
/// TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rounds per session
    pub rounds: u32,
    /// Guesses allowed per round
    pub max_attempts: u32,
    /// Countdown per round
    pub round_seconds: u32,
    /// First attempt (1-based) whose wrong guess earns a compass hint
    pub hint_from_attempt: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds: 10,
            max_attempts: 5,
            round_seconds: 60,
            hint_from_attempt: 2,
        }
    }
}

impl GameConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("rounds", self.rounds, MAX_ROUNDS)?;
        check_range("max_attempts", self.max_attempts, MAX_ATTEMPTS)?;
        check_range("round_seconds", self.round_seconds, MAX_ROUND_SECONDS)?;
        Ok(())
    }

    /// Displayed target score; never enforced
    pub fn nominal_max_score(&self) -> u32 {
        self.rounds.saturating_mul(crate::quiz::round::BASE_POINTS)
    }
}

fn check_range(field: &str, value: u32, max: u32) -> Result<(), ConfigError> {
    if !(1..=max).contains(&value) {
        return Err(ConfigError::Invalid(format!(
            "{field} must be between 1 and {max}, got {value}"
        )));
    }
    Ok(())
}
