//! Serializable engine configuration.
//!
//! Every field has a default matching the reference strategy, and every
//! section may be omitted from TOML. `validate` runs before any engine is
//! built from a config.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Longest accepted cooldown (one day).
pub const MAX_COOLDOWN_SECS: u64 = 86_400;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub gate: GateConfig,
    pub indicators: IndicatorConfig,
    pub scoring: ScoringConfig,
    pub confidence: ConfidenceConfig,
}

/// Rolling window and trend detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub capacity: usize,
    pub volatility_min_samples: usize,
    pub trend_short_period: usize,
    pub trend_long_period: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            volatility_min_samples: 20,
            trend_short_period: 20,
            trend_long_period: 50,
        }
    }
}

/// Cooldown and favorable-condition thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub cooldown_secs: u64,
    pub min_volatility: f64,
    pub min_trend_strength: f64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: 60,
            min_volatility: 0.005,
            min_trend_strength: 0.002,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
        }
    }
}

/// Bands and weights of the scoring rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub stochastic_oversold: f64,
    pub stochastic_overbought: f64,
    pub rsi_weight: f64,
    pub macd_weight: f64,
    pub stochastic_weight: f64,
    pub trend_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            stochastic_oversold: 20.0,
            stochastic_overbought: 80.0,
            rsi_weight: 2.0,
            macd_weight: 1.5,
            stochastic_weight: 1.0,
            trend_weight: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    pub base: f64,
    pub span: f64,
    pub volatility_bonus_threshold: f64,
    pub trend_bonus_threshold: f64,
    pub bonus: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            base: 0.75,
            span: 0.2,
            volatility_bonus_threshold: 0.01,
            trend_bonus_threshold: 0.005,
            bonus: 0.05,
            floor: 0.75,
            ceiling: 0.95,
        }
    }
}

impl EngineConfig {
    /// Load a config from a TOML file. The result is validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string. The result is validated.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::seconds(self.gate.cooldown_secs.min(MAX_COOLDOWN_SECS) as i64)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.window;
        let ind = &self.indicators;

        for (name, period) in [
            ("window.trend_short_period", w.trend_short_period),
            ("window.trend_long_period", w.trend_long_period),
            ("indicators.rsi_period", ind.rsi_period),
            ("indicators.macd_fast", ind.macd_fast),
            ("indicators.macd_slow", ind.macd_slow),
            ("indicators.macd_signal", ind.macd_signal),
        ] {
            if period == 0 {
                return invalid(format!("{name} must be >= 1"));
            }
        }
        if w.trend_short_period >= w.trend_long_period {
            return invalid(format!(
                "trend_short_period ({}) must be < trend_long_period ({})",
                w.trend_short_period, w.trend_long_period
            ));
        }
        if ind.macd_fast >= ind.macd_slow {
            return invalid(format!(
                "macd_fast ({}) must be < macd_slow ({})",
                ind.macd_fast, ind.macd_slow
            ));
        }

        let needed = w
            .trend_long_period
            .max(ind.macd_slow + ind.macd_signal)
            .max(ind.rsi_period + 1)
            .max(w.volatility_min_samples);
        if w.capacity < needed {
            return invalid(format!(
                "window.capacity ({}) must hold at least {needed} samples",
                w.capacity
            ));
        }

        if self.gate.cooldown_secs > MAX_COOLDOWN_SECS {
            return invalid(format!(
                "gate.cooldown_secs ({}) exceeds {MAX_COOLDOWN_SECS}",
                self.gate.cooldown_secs
            ));
        }

        let s = &self.scoring;
        let c = &self.confidence;
        for (name, value) in [
            ("gate.min_volatility", self.gate.min_volatility),
            ("gate.min_trend_strength", self.gate.min_trend_strength),
            ("scoring.rsi_weight", s.rsi_weight),
            ("scoring.macd_weight", s.macd_weight),
            ("scoring.stochastic_weight", s.stochastic_weight),
            ("scoring.trend_weight", s.trend_weight),
            ("confidence.base", c.base),
            ("confidence.span", c.span),
            ("confidence.volatility_bonus_threshold", c.volatility_bonus_threshold),
            ("confidence.trend_bonus_threshold", c.trend_bonus_threshold),
            ("confidence.bonus", c.bonus),
            ("confidence.floor", c.floor),
            ("confidence.ceiling", c.ceiling),
        ] {
            if !value.is_finite() || value < 0.0 {
                return invalid(format!("{name} must be finite and >= 0, got {value}"));
            }
        }
        for (name, value) in [
            ("scoring.rsi_oversold", s.rsi_oversold),
            ("scoring.rsi_overbought", s.rsi_overbought),
            ("scoring.stochastic_oversold", s.stochastic_oversold),
            ("scoring.stochastic_overbought", s.stochastic_overbought),
        ] {
            if !value.is_finite() {
                return invalid(format!("{name} must be finite, got {value}"));
            }
        }
        if s.rsi_oversold > s.rsi_overbought {
            return invalid("scoring.rsi_oversold must be <= scoring.rsi_overbought".into());
        }
        if s.stochastic_oversold > s.stochastic_overbought {
            return invalid(
                "scoring.stochastic_oversold must be <= scoring.stochastic_overbought".into(),
            );
        }
        if c.floor > c.ceiling {
            return invalid(format!(
                "confidence.floor ({}) must be <= confidence.ceiling ({})",
                c.floor, c.ceiling
            ));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid(msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_strategy() {
        let config = EngineConfig::default();
        assert_eq!(config.window.capacity, 100);
        assert_eq!(config.gate.cooldown_secs, 60);
        assert_eq!(config.cooldown(), Duration::seconds(60));
        assert_eq!(config.indicators.rsi_period, 14);
        assert_eq!(config.scoring.macd_weight, 1.5);
        assert_eq!(config.confidence.ceiling, 0.95);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn partial_toml_overrides_single_fields() {
        let config = EngineConfig::from_toml(
            r#"
            [gate]
            cooldown_secs = 300

            [scoring]
            rsi_weight = 3.0
            "#,
        )
        .unwrap();
        assert_eq!(config.gate.cooldown_secs, 300);
        assert_eq!(config.gate.min_volatility, 0.005);
        assert_eq!(config.scoring.rsi_weight, 3.0);
        assert_eq!(config.scoring.trend_weight, 1.5);
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = EngineConfig::default();
        config.window.capacity = 250;
        let text = config.to_toml().unwrap();
        assert_eq!(EngineConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn wrong_field_type_is_parse_error() {
        let err = EngineConfig::from_toml("[gate]\ncooldown_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_inverted_trend_periods() {
        let mut config = EngineConfig::default();
        config.window.trend_short_period = 50;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_window_too_small_for_macd() {
        let mut config = EngineConfig::default();
        config.window.capacity = 34;
        config.window.trend_long_period = 30;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at least 35"), "{err}");
    }

    #[test]
    fn rejects_zero_period() {
        let mut config = EngineConfig::default();
        config.indicators.rsi_period = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_or_nan_thresholds() {
        let mut config = EngineConfig::default();
        config.gate.min_volatility = -0.1;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.confidence.bonus = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_floor_above_ceiling() {
        let mut config = EngineConfig::default();
        config.confidence.floor = 0.99;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_excessive_cooldown() {
        let mut config = EngineConfig::default();
        config.gate.cooldown_secs = MAX_COOLDOWN_SECS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn from_file_reads_and_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[window]\ncapacity = 120").unwrap();
        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.window.capacity, 120);
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
