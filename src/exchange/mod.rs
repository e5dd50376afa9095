//! Metric source adapters.
//!
//! Trait seams sit at the I/O boundary so the aggregator can be driven by
//! scripted sources in tests:
//!
//! - [`MetricSource`] - per-symbol futures metrics (five fetchers)
//! - [`SentimentSource`] - the market-wide fear & greed index
//! - [`MetricsAggregator`] - fan-out/fan-in reducer producing one
//!   [`MetricsRecord`](crate::domain::MetricsRecord) per request

pub mod aggregator;
pub mod binance;
pub mod sentiment;

pub use aggregator::MetricsAggregator;
pub use binance::BinanceFuturesClient;
pub use sentiment::SentimentIndexClient;

use async_trait::async_trait;

use crate::domain::{FetchOutcome, InstrumentSymbol, Sentiment, TakerVolume};

/// Per-symbol futures metrics.
///
/// Each method performs exactly one network request and never fails as a
/// Rust error; faults are carried inside the [`FetchOutcome`].
#[async_trait]
pub trait MetricSource: Send + Sync {
    async fn open_interest(&self, symbol: &InstrumentSymbol) -> FetchOutcome<f64>;

    /// Most recent funding rate.
    async fn funding_rate(&self, symbol: &InstrumentSymbol) -> FetchOutcome<f64>;

    /// Taker buy/sell volume over the most recent 1-hour bucket.
    async fn taker_volume(&self, symbol: &InstrumentSymbol) -> FetchOutcome<TakerVolume>;

    /// Long vs short account ratio over the most recent 15-minute bucket.
    async fn long_short_ratio(&self, symbol: &InstrumentSymbol) -> FetchOutcome<f64>;

    async fn current_price(&self, symbol: &InstrumentSymbol) -> FetchOutcome<f64>;
}

/// Market-wide sentiment, independent of any instrument.
#[async_trait]
pub trait SentimentSource: Send + Sync {
    /// Most recent fear & greed index observation.
    async fn fear_greed_index(&self) -> FetchOutcome<Sentiment>;
}
