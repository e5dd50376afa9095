//! Fan-out/fan-in reducer behavior.

mod support;

use std::sync::atomic::Ordering;
use std::time::Duration;

use coinsage::domain::{FetchOutcome, MetricsRecord, SentimentGrade};
use coinsage::error::Error;
use coinsage::exchange::MetricsAggregator;

use support::{ScriptedMarket, ScriptedSentiment};

#[tokio::test]
async fn unsupported_coin_issues_no_fetches() {
    let market = ScriptedMarket::all_succeeding();
    let sentiment = ScriptedSentiment::succeeding(50.0, SentimentGrade::Neutral);
    let market_calls = market.call_counter();
    let sentiment_calls = sentiment.call_counter();

    let aggregator = MetricsAggregator::new(market, sentiment);
    let result = aggregator.aggregate("FOO").await;

    assert!(matches!(result, Err(Error::UnsupportedCoin(ref c)) if c == "FOO"));
    assert_eq!(market_calls.load(Ordering::SeqCst), 0);
    assert_eq!(sentiment_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn total_failure_yields_the_all_default_record() {
    let aggregator =
        MetricsAggregator::new(ScriptedMarket::all_failing(), ScriptedSentiment::failing());

    let record = aggregator.aggregate("BTC").await.unwrap();

    assert_eq!(record, MetricsRecord::default());
    assert_eq!(record.fear_greed_index_grade, SentimentGrade::Unknown);
}

#[tokio::test]
async fn single_success_populates_only_its_field() {
    let mut market = ScriptedMarket::all_failing();
    market.current_price = FetchOutcome::Value(65000.0);

    let aggregator = MetricsAggregator::new(market, ScriptedSentiment::failing());
    let record = aggregator.aggregate("BTC").await.unwrap();

    assert_eq!(record.current_price, 65000.0);
    assert_eq!(record.open_interest, 0.0);
    assert_eq!(record.funding_rate, 0.0);
    assert_eq!(record.taker_buy_volume, 0.0);
    assert_eq!(record.taker_sell_volume, 0.0);
    assert_eq!(record.long_short_ratio, 0.0);
    assert_eq!(record.fear_greed_index_value, 0.0);
    assert_eq!(record.fear_greed_index_grade, SentimentGrade::Unknown);
}

#[tokio::test]
async fn malformed_payload_merges_like_a_transport_failure() {
    let mut failing = ScriptedMarket::all_failing();
    failing.funding_rate = FetchOutcome::Fallback("empty funding rate series".into());

    let aggregator = MetricsAggregator::new(failing, ScriptedSentiment::failing());
    let record = aggregator.aggregate("BTC").await.unwrap();

    // Fallback and Failure are distinct internally but identical in the
    // returned record.
    assert_eq!(record, MetricsRecord::default());
}

#[tokio::test]
async fn full_success_populates_every_field() {
    let aggregator = MetricsAggregator::new(
        ScriptedMarket::all_succeeding(),
        ScriptedSentiment::succeeding(34.0, SentimentGrade::Fear),
    );

    let record = aggregator.aggregate("BTC").await.unwrap();

    assert_eq!(record.open_interest, 10659.5);
    assert_eq!(record.funding_rate, -0.000125);
    assert_eq!(record.taker_buy_volume, 12345.6);
    assert_eq!(record.taker_sell_volume, 11870.2);
    assert_eq!(record.long_short_ratio, 1.25);
    assert_eq!(record.current_price, 65000.0);
    assert_eq!(record.fear_greed_index_value, 34.0);
    assert_eq!(record.fear_greed_index_grade, SentimentGrade::Fear);
}

#[tokio::test]
async fn legitimate_zero_survives_the_merge() {
    let mut market = ScriptedMarket::all_succeeding();
    market.funding_rate = FetchOutcome::Value(0.0);

    let aggregator = MetricsAggregator::new(
        market,
        ScriptedSentiment::succeeding(50.0, SentimentGrade::Neutral),
    );
    let record = aggregator.aggregate("BTC").await.unwrap();

    assert_eq!(record.funding_rate, 0.0);
    // The rest of the record is untouched, so the zero came from the
    // value, not the default path.
    assert_eq!(record.current_price, 65000.0);
}

#[tokio::test]
async fn resolution_is_case_insensitive() {
    let aggregator = MetricsAggregator::new(
        ScriptedMarket::all_succeeding(),
        ScriptedSentiment::succeeding(50.0, SentimentGrade::Neutral),
    );

    assert!(aggregator.aggregate("btc").await.is_ok());
    assert!(aggregator.aggregate("Eth").await.is_ok());
    assert!(aggregator.aggregate("SHIB").await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn latency_is_bounded_by_the_slowest_fetcher_not_the_sum() {
    let delay = Duration::from_secs(1);
    let aggregator = MetricsAggregator::new(
        ScriptedMarket::all_succeeding().with_delay(delay),
        ScriptedSentiment::succeeding(50.0, SentimentGrade::Neutral).with_delay(delay),
    );

    let started = tokio::time::Instant::now();
    aggregator.aggregate("BTC").await.unwrap();
    let elapsed = started.elapsed();

    // Six sequential 1s fetches would take 6s of virtual time; a true
    // fan-out takes 1s.
    assert!(elapsed >= delay);
    assert!(elapsed < delay * 2, "fetches ran sequentially: {elapsed:?}");
}

#[tokio::test]
async fn repeated_aggregation_is_deterministic_and_stateless() {
    let market = ScriptedMarket::all_succeeding();
    let sentiment = ScriptedSentiment::succeeding(50.0, SentimentGrade::Neutral);
    let market_calls = market.call_counter();

    let aggregator = MetricsAggregator::new(market, sentiment);

    let first = aggregator.aggregate("BTC").await.unwrap();
    let second = aggregator.aggregate("BTC").await.unwrap();

    assert_eq!(first, second);
    // Five market fetches per request, no caching between requests.
    assert_eq!(market_calls.load(Ordering::SeqCst), 10);
    // The symbol table is untouched by aggregation.
    assert_eq!(aggregator.symbols().len(), 11);
}
