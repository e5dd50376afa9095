#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use coinsage::domain::{FetchOutcome, InstrumentSymbol, Sentiment, TakerVolume};
use coinsage::exchange::{MetricSource, SentimentSource};

/// Scripted per-symbol metric source with call counting and an optional
/// per-fetch delay for latency assertions.
pub struct ScriptedMarket {
    pub open_interest: FetchOutcome<f64>,
    pub funding_rate: FetchOutcome<f64>,
    pub taker_volume: FetchOutcome<TakerVolume>,
    pub long_short_ratio: FetchOutcome<f64>,
    pub current_price: FetchOutcome<f64>,
    pub delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedMarket {
    /// Every fetcher fails with a transport-style reason.
    pub fn all_failing() -> Self {
        Self {
            open_interest: FetchOutcome::Failure("connection refused".into()),
            funding_rate: FetchOutcome::Failure("connection refused".into()),
            taker_volume: FetchOutcome::Failure("connection refused".into()),
            long_short_ratio: FetchOutcome::Failure("connection refused".into()),
            current_price: FetchOutcome::Failure("connection refused".into()),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Every fetcher succeeds with distinct, recognizable values.
    pub fn all_succeeding() -> Self {
        Self {
            open_interest: FetchOutcome::Value(10659.5),
            funding_rate: FetchOutcome::Value(-0.000125),
            taker_volume: FetchOutcome::Value(TakerVolume {
                buy: 12345.6,
                sell: 11870.2,
            }),
            long_short_ratio: FetchOutcome::Value(1.25),
            current_price: FetchOutcome::Value(65000.0),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Total fetcher invocations across all five metrics.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }

    async fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl MetricSource for ScriptedMarket {
    async fn open_interest(&self, _symbol: &InstrumentSymbol) -> FetchOutcome<f64> {
        self.record().await;
        self.open_interest.clone()
    }

    async fn funding_rate(&self, _symbol: &InstrumentSymbol) -> FetchOutcome<f64> {
        self.record().await;
        self.funding_rate.clone()
    }

    async fn taker_volume(&self, _symbol: &InstrumentSymbol) -> FetchOutcome<TakerVolume> {
        self.record().await;
        self.taker_volume.clone()
    }

    async fn long_short_ratio(&self, _symbol: &InstrumentSymbol) -> FetchOutcome<f64> {
        self.record().await;
        self.long_short_ratio.clone()
    }

    async fn current_price(&self, _symbol: &InstrumentSymbol) -> FetchOutcome<f64> {
        self.record().await;
        self.current_price.clone()
    }
}

/// Scripted sentiment source.
pub struct ScriptedSentiment {
    pub outcome: FetchOutcome<Sentiment>,
    pub delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSentiment {
    pub fn failing() -> Self {
        Self {
            outcome: FetchOutcome::Failure("connection refused".into()),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn succeeding(value: f64, grade: coinsage::domain::SentimentGrade) -> Self {
        Self {
            outcome: FetchOutcome::Value(Sentiment { value, grade }),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl SentimentSource for ScriptedSentiment {
    async fn fear_greed_index(&self) -> FetchOutcome<Sentiment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}
