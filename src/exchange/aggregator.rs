//! Fan-out/fan-in metrics reducer.
//!
//! One request resolves the coin code, issues all six fetchers
//! concurrently, waits for every one of them to settle, and merges the
//! outcomes field by field into a [`MetricsRecord`]. A fetcher fault never
//! fails the request; the affected fields degrade to their documented
//! defaults. The only propagated error is an unresolved coin code, which
//! issues no fetches at all.

use tracing::{debug, warn};

use super::{MetricSource, SentimentSource};
use crate::domain::{MetricsRecord, Sentiment, SentimentGrade, SymbolTable, TakerVolume};
use crate::error::{Error, Result};

/// Coordinator over one [`MetricSource`] and one [`SentimentSource`].
pub struct MetricsAggregator<M, S> {
    symbols: SymbolTable,
    market: M,
    sentiment: S,
}

impl<M, S> MetricsAggregator<M, S>
where
    M: MetricSource,
    S: SentimentSource,
{
    #[must_use]
    pub fn new(market: M, sentiment: S) -> Self {
        Self {
            symbols: SymbolTable::new(),
            market,
            sentiment,
        }
    }

    /// The instrument symbol table this aggregator resolves against.
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Produce one fully-populated metrics record for a coin code.
    ///
    /// Total fetch failure across all six sources still yields a valid,
    /// fully-defaulted record; the advisory consumer degrades gracefully
    /// with zero-valued inputs but cannot proceed with no record at all.
    pub async fn aggregate(&self, coin: &str) -> Result<MetricsRecord> {
        let Some(symbol) = self.symbols.resolve(coin) else {
            warn!(coin, "unresolved coin code");
            return Err(Error::UnsupportedCoin(coin.to_string()));
        };

        let (open_interest, funding_rate, taker_volume, long_short_ratio, price, sentiment) = tokio::join!(
            self.market.open_interest(&symbol),
            self.market.funding_rate(&symbol),
            self.market.taker_volume(&symbol),
            self.market.long_short_ratio(&symbol),
            self.market.current_price(&symbol),
            self.sentiment.fear_greed_index(),
        );

        // The two-field fetchers settle to a pair default so one fault
        // degrades both of their fields together.
        let volume = taker_volume.settle("taker_volume", TakerVolume { buy: 0.0, sell: 0.0 });
        let index = sentiment.settle(
            "fear_greed_index",
            Sentiment {
                value: 0.0,
                grade: SentimentGrade::Unknown,
            },
        );

        let record = MetricsRecord {
            open_interest: open_interest.settle("open_interest", 0.0),
            funding_rate: funding_rate.settle("funding_rate", 0.0),
            taker_buy_volume: volume.buy,
            taker_sell_volume: volume.sell,
            long_short_ratio: long_short_ratio.settle("long_short_ratio", 0.0),
            current_price: price.settle("current_price", 0.0),
            fear_greed_index_value: index.value,
            fear_greed_index_grade: index.grade,
        };

        debug!(symbol = %symbol, ?record, "metrics merged");
        Ok(record)
    }
}
