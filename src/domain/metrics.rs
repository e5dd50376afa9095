//! The metrics record and its field-level defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentiment classification published alongside the fear & greed index.
///
/// `Unknown` is the documented fallback, not a parse error: an
/// unrecognized label degrades to it silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentGrade {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
    #[default]
    Unknown,
}

impl SentimentGrade {
    /// Parse an upstream classification label, case-insensitively.
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "extreme fear" => Self::ExtremeFear,
            "fear" => Self::Fear,
            "neutral" => Self::Neutral,
            "greed" => Self::Greed,
            "extreme greed" => Self::ExtremeGreed,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExtremeFear => "Extreme Fear",
            Self::Fear => "Fear",
            Self::Neutral => "Neutral",
            Self::Greed => "Greed",
            Self::ExtremeGreed => "Extreme Greed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SentimentGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Taker volume split for one lookback bucket, quote-asset denominated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TakerVolume {
    pub buy: f64,
    pub sell: f64,
}

/// One fear & greed index observation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentiment {
    pub value: f64,
    pub grade: SentimentGrade,
}

/// Fixed-shape aggregate of every per-field metric, built fresh per
/// request.
///
/// Every field always holds a numeric or labeled value. Under partial
/// upstream failure the affected fields carry their defaults (zero,
/// `Unknown`), so an all-default record is a valid output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRecord {
    /// Outstanding contracts.
    pub open_interest: f64,
    /// Most recent funding rate, as a fraction; can be negative.
    pub funding_rate: f64,
    /// Taker buy volume over the last 1-hour bucket.
    pub taker_buy_volume: f64,
    /// Taker sell volume over the last 1-hour bucket.
    pub taker_sell_volume: f64,
    /// Long vs short account ratio over the last 15-minute bucket.
    pub long_short_ratio: f64,
    pub current_price: f64,
    /// Fear & greed index in [0, 100].
    pub fear_greed_index_value: f64,
    pub fear_greed_index_grade: SentimentGrade,
}

impl Default for MetricsRecord {
    fn default() -> Self {
        Self {
            open_interest: 0.0,
            funding_rate: 0.0,
            taker_buy_volume: 0.0,
            taker_sell_volume: 0.0,
            long_short_ratio: 0.0,
            current_price: 0.0,
            fear_greed_index_value: 0.0,
            fear_greed_index_grade: SentimentGrade::Unknown,
        }
    }
}
