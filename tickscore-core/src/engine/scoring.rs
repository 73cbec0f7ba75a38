//! Weighted indicator scoring and confidence.
//!
//! Each rule adds its weight to the buy or the sell side on its own, so both
//! sides can score on the same tick. Ties resolve to SELL.

use serde::Serialize;

use crate::config::{ConfidenceConfig, ScoringConfig};
use crate::domain::{SignalDirection, TrendDirection};
use crate::indicators::MacdValue;

/// Indicator values at the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorReadout {
    pub rsi: f64,
    pub macd: Option<MacdValue>,
    pub stochastic: f64,
    pub trend: TrendDirection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ScoreCard {
    pub buy: f64,
    pub sell: f64,
}

impl ScoreCard {
    pub fn score(readout: &IndicatorReadout, cfg: &ScoringConfig) -> Self {
        let mut card = Self::default();

        if readout.rsi < cfg.rsi_oversold {
            card.buy += cfg.rsi_weight;
        }
        if readout.rsi > cfg.rsi_overbought {
            card.sell += cfg.rsi_weight;
        }

        // Unavailable MACD scores nothing.
        if let Some(macd) = readout.macd {
            if macd.macd > macd.signal {
                card.buy += cfg.macd_weight;
            }
            if macd.macd < macd.signal {
                card.sell += cfg.macd_weight;
            }
        }

        if readout.stochastic < cfg.stochastic_oversold {
            card.buy += cfg.stochastic_weight;
        }
        if readout.stochastic > cfg.stochastic_overbought {
            card.sell += cfg.stochastic_weight;
        }

        match readout.trend {
            TrendDirection::Up => card.buy += cfg.trend_weight,
            TrendDirection::Down => card.sell += cfg.trend_weight,
            TrendDirection::Flat => {}
        }

        card
    }

    pub fn total(&self) -> f64 {
        self.buy + self.sell
    }

    pub fn direction(&self) -> SignalDirection {
        if self.buy > self.sell {
            SignalDirection::Buy
        } else {
            SignalDirection::Sell
        }
    }

    /// Confidence of the winning side, clamped to `[floor, ceiling]`.
    ///
    /// `None` when nothing scored; the caller treats that like an unfavorable tick.
    pub fn confidence(
        &self,
        volatility: f64,
        trend_strength: f64,
        cfg: &ConfidenceConfig,
    ) -> Option<f64> {
        let total = self.total();
        if total <= 0.0 || !total.is_finite() {
            return None;
        }

        let winning = self.buy.max(self.sell);
        let mut confidence = cfg.base + (winning / total) * cfg.span;
        if volatility > cfg.volatility_bonus_threshold {
            confidence += cfg.bonus;
        }
        if trend_strength > cfg.trend_bonus_threshold {
            confidence += cfg.bonus;
        }
        Some(confidence.clamp(cfg.floor, cfg.ceiling))
    }
}
