//! Table configuration models.

use serde::{Deserialize, Serialize};

/// Table speed variants, mapped to the human turn countdown length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableSpeed {
    Normal,
    Turbo,
    Hyper,
}

impl std::fmt::Display for TableSpeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableSpeed::Normal => write!(f, "normal"),
            TableSpeed::Turbo => write!(f, "turbo"),
            TableSpeed::Hyper => write!(f, "hyper"),
        }
    }
}

/// Table configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Table name
    pub name: String,

    /// Table speed
    pub speed: TableSpeed,

    /// Presentational delay before an AI seat moves, in ticks. The
    /// scheduling collaborator honors this; the controller does not
    /// enforce it.
    pub ai_think_delay_ticks: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "Lao Er Dai".to_string(),
            speed: TableSpeed::Normal,
            ai_think_delay_ticks: 1,
        }
    }
}

impl TableConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.name.is_empty() {
            return Err("Table name must not be empty".to_string());
        }

        if self.ai_think_delay_ticks > 60 {
            return Err("AI think delay must be at most 60 ticks".to_string());
        }

        Ok(())
    }

    /// Human turn countdown length based on table speed.
    pub fn turn_timeout_ticks(&self) -> u32 {
        match self.speed {
            TableSpeed::Normal => 30,
            TableSpeed::Turbo => 15,
            TableSpeed::Hyper => 5,
        }
    }
}
