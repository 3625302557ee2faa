//! Strategy configuration, loaded from TOML.
//!
//! ```toml
//! symbol = "rb2410"
//! ma_window = 20
//! fixed_size = 1.0
//! price_offset = 2.0
//! window_capacity = 100
//! cycle_minutes = 15
//! warmup_days = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("ma_window must be >= 2, got {0}")]
    MaWindowTooSmall(usize),

    #[error("window_capacity ({capacity}) must exceed ma_window ({ma_window})")]
    WindowTooShort { capacity: usize, ma_window: usize },

    #[error("fixed_size must be positive, got {0}")]
    NonPositiveSize(f64),

    #[error("price_offset must be finite and non-negative, got {0}")]
    NegativeOffset(f64),

    #[error("cycle_minutes must divide 60, got {0}")]
    BadCycleLength(u32),

    #[error("symbol must not be empty")]
    EmptySymbol,
}

/// Parameters of the breakout strategy for one instrument.
///
/// `ma_window` is the single parameter the host persists between runs; the
/// rest are fixed per deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub symbol: String,
    /// Moving-average length, in cycle bars.
    pub ma_window: usize,
    /// Lots per entry.
    pub fixed_size: f64,
    /// Price buffer added to entry and exit prices.
    pub price_offset: f64,
    /// Cycle bars retained by the indicator window.
    pub window_capacity: usize,
    pub cycle_minutes: u32,
    /// Days of 1-minute history `on_init` replays, counted back from the
    /// newest bar. Zero skips warm-up.
    pub warmup_days: u32,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            symbol: "rb2410".to_string(),
            ma_window: 20,
            fixed_size: 1.0,
            price_offset: 2.0,
            window_capacity: 100,
            cycle_minutes: 15,
            warmup_days: 10,
        }
    }
}

impl StrategyConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::EmptySymbol);
        }
        if self.ma_window < 2 {
            return Err(ConfigError::MaWindowTooSmall(self.ma_window));
        }
        if self.window_capacity <= self.ma_window {
            return Err(ConfigError::WindowTooShort {
                capacity: self.window_capacity,
                ma_window: self.ma_window,
            });
        }
        if !(self.fixed_size.is_finite() && self.fixed_size > 0.0) {
            return Err(ConfigError::NonPositiveSize(self.fixed_size));
        }
        if !(self.price_offset.is_finite() && self.price_offset >= 0.0) {
            return Err(ConfigError::NegativeOffset(self.price_offset));
        }
        if self.cycle_minutes == 0 || 60 % self.cycle_minutes != 0 {
            return Err(ConfigError::BadCycleLength(self.cycle_minutes));
        }
        Ok(())
    }
}
