//! Scoring rules configuration.
//!
//! The payout table, wind names and the house-rule knobs live here. The same
//! YAML file can be shared between every front end that keeps score.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid rules: {0}")]
    Invalid(String),
}

/// What to do with a fan count above `max_fan`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FanOverflow {
    /// Refuse to score the round.
    #[default]
    Reject,
    /// Score the round as if `max_fan` had been entered.
    Clamp,
}

/// How a round without a winner is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TiePolicy {
    /// Record the round with an all-zero delta vector.
    #[default]
    RecordZero,
    /// Refuse to score the round.
    Reject,
}

/// How the deal passes between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    /// The deal passes after every round.
    #[default]
    Fixed,
    /// The dealer keeps the deal after winning or after a drawn round.
    RepeatOnDealerWinOrTie,
}

/// Root rules structure.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rules {
    /// Base loss per non-winner, indexed by fan.
    #[serde(default = "default_score_table")]
    pub score_table: Vec<i32>,
    /// Highest fan accepted at the scoring boundary.
    #[serde(default = "default_max_fan")]
    pub max_fan: u8,
    /// Loss forced onto a non-winner whose computed loss is zero.
    #[serde(default = "default_minimum_payment")]
    pub minimum_payment: i32,
    #[serde(default)]
    pub fan_overflow: FanOverflow,
    #[serde(default)]
    pub tie_policy: TiePolicy,
    #[serde(default)]
    pub rotation: Rotation,
    /// Prevailing wind names, East first.
    #[serde(default = "default_wind_names")]
    pub wind_names: Vec<String>,
    /// Seat names used by a fresh game.
    #[serde(default = "default_player_names")]
    pub default_player_names: Vec<String>,
}

/// Standard Hong Kong payout table, fan 0 through 14.
pub const STANDARD_SCORE_TABLE: [i32; 15] =
    [0, 1, 2, 4, 8, 12, 16, 24, 32, 48, 64, 96, 128, 192, 256];

/// Number of prevailing winds in a full game.
pub const NUM_WINDS: usize = 4;

fn default_score_table() -> Vec<i32> {
    STANDARD_SCORE_TABLE.to_vec()
}

fn default_max_fan() -> u8 {
    13
}

fn default_minimum_payment() -> i32 {
    1
}

fn default_wind_names() -> Vec<String> {
    ["East", "South", "West", "North"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_player_names() -> Vec<String> {
    default_wind_names()
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            score_table: default_score_table(),
            max_fan: default_max_fan(),
            minimum_payment: default_minimum_payment(),
            fan_overflow: FanOverflow::default(),
            tie_policy: TiePolicy::default(),
            rotation: Rotation::default(),
            wind_names: default_wind_names(),
            default_player_names: default_player_names(),
        }
    }
}

impl Rules {
    /// Load rules from a YAML file and validate them.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load rules from a YAML string and validate them.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let rules: Rules = serde_yaml::from_str(yaml)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.score_table.is_empty() {
            return Err(ConfigError::Invalid("score_table must be non-empty".to_string()));
        }
        if self.score_table.iter().any(|&v| v < 0) {
            return Err(ConfigError::Invalid("score_table entries must be >= 0".to_string()));
        }
        if !self.score_table.windows(2).all(|w| w[0] <= w[1]) {
            return Err(ConfigError::Invalid("score_table must be ascending".to_string()));
        }
        if (self.max_fan as usize) >= self.score_table.len() {
            return Err(ConfigError::Invalid(format!(
                "max_fan {} has no score_table entry (len {})",
                self.max_fan,
                self.score_table.len()
            )));
        }
        if self.minimum_payment < 0 {
            return Err(ConfigError::Invalid("minimum_payment must be >= 0".to_string()));
        }
        if self.wind_names.len() != NUM_WINDS {
            return Err(ConfigError::Invalid(format!(
                "wind_names must have {} entries",
                NUM_WINDS
            )));
        }
        if self.default_player_names.len() < 2 {
            return Err(ConfigError::Invalid(
                "default_player_names must name at least 2 players".to_string(),
            ));
        }
        Ok(())
    }

    /// Base loss for `fan`, or `None` when the table has no entry.
    pub fn base_value(&self, fan: u8) -> Option<i32> {
        self.score_table.get(fan as usize).copied()
    }

    /// Name of wind `wind`, cycling through `wind_names`; `"?"` when none are set.
    pub fn wind_name(&self, wind: usize) -> &str {
        match self.wind_names.len() {
            0 => "?",
            n => &self.wind_names[wind % n],
        }
    }
}

/// Process-wide standard rules, built once and never mutated.
pub fn standard_rules() -> &'static Rules {
    static RULES: OnceLock<Rules> = OnceLock::new();
    RULES.get_or_init(Rules::default)
}
