//! Binance USDT-margined futures REST client.
//!
//! Five read-only endpoints, one per metric. Binance serializes numeric
//! fields as JSON strings, so every DTO field is an `Option<String>` and
//! parsing happens after deserialization: a body that is not the expected
//! JSON shape at all is a Failure, while a well-formed response with a
//! missing or unparsable field is a Fallback.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use tracing::{debug, warn};

use super::MetricSource;
use crate::config::ExchangeConfig;
use crate::domain::{FetchOutcome, InstrumentSymbol, TakerVolume};

/// HTTP client for the Binance futures REST API.
pub struct BinanceFuturesClient {
    http: HttpClient,
    base_url: String,
}

impl BinanceFuturesClient {
    /// Create a client with default timeouts.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(HttpClient::new(), base_url)
    }

    /// Create a client with timeouts taken from configuration.
    #[must_use]
    pub fn from_config(config: &ExchangeConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self::with_http(http, config.base_url.clone())
    }

    fn with_http(http: HttpClient, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    /// GET a URL and deserialize the JSON body.
    ///
    /// Any transport fault, non-2xx status, or undeserializable body comes
    /// back as `Err(reason)` so callers can turn it into a Failure.
    async fn get_json<T>(&self, url: &str) -> Result<T, String>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!(url, "fetching");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        response.json::<T>().await.map_err(|e| e.to_string())
    }
}

fn parse_field(field: &str, value: Option<&str>) -> FetchOutcome<f64> {
    match value {
        Some(raw) => match raw.parse::<f64>() {
            Ok(v) => FetchOutcome::Value(v),
            Err(_) => FetchOutcome::Fallback(format!("unparsable {field}: {raw:?}")),
        },
        None => FetchOutcome::Fallback(format!("missing {field}")),
    }
}

#[derive(Debug, Deserialize)]
struct OpenInterestDto {
    #[serde(rename = "openInterest")]
    open_interest: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FundingRateDto {
    #[serde(rename = "fundingRate")]
    funding_rate: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TakerVolumeDto {
    #[serde(rename = "buyVol")]
    buy_vol: Option<String>,
    #[serde(rename = "sellVol")]
    sell_vol: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LongShortRatioDto {
    #[serde(rename = "longShortRatio")]
    long_short_ratio: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TickerPriceDto {
    price: Option<String>,
}

#[async_trait]
impl MetricSource for BinanceFuturesClient {
    async fn open_interest(&self, symbol: &InstrumentSymbol) -> FetchOutcome<f64> {
        let url = format!("{}/fapi/v1/openInterest?symbol={symbol}", self.base_url);
        match self.get_json::<OpenInterestDto>(&url).await {
            Ok(dto) => parse_field("openInterest", dto.open_interest.as_deref()),
            Err(reason) => FetchOutcome::Failure(reason),
        }
    }

    async fn funding_rate(&self, symbol: &InstrumentSymbol) -> FetchOutcome<f64> {
        let url = format!(
            "{}/fapi/v1/fundingRate?symbol={symbol}&limit=1",
            self.base_url
        );
        match self.get_json::<Vec<FundingRateDto>>(&url).await {
            Ok(rows) => match rows.last() {
                Some(dto) => parse_field("fundingRate", dto.funding_rate.as_deref()),
                None => FetchOutcome::Fallback("empty funding rate series".into()),
            },
            Err(reason) => FetchOutcome::Failure(reason),
        }
    }

    async fn taker_volume(&self, symbol: &InstrumentSymbol) -> FetchOutcome<TakerVolume> {
        let url = format!(
            "{}/futures/data/takerlongshortRatio?symbol={symbol}&period=1h&limit=1",
            self.base_url
        );
        match self.get_json::<Vec<TakerVolumeDto>>(&url).await {
            Ok(rows) => match rows.last() {
                Some(dto) => {
                    let buy = parse_field("buyVol", dto.buy_vol.as_deref());
                    let sell = parse_field("sellVol", dto.sell_vol.as_deref());
                    match (buy, sell) {
                        (FetchOutcome::Value(buy), FetchOutcome::Value(sell)) => {
                            FetchOutcome::Value(TakerVolume { buy, sell })
                        }
                        (FetchOutcome::Fallback(r) | FetchOutcome::Failure(r), _)
                        | (_, FetchOutcome::Fallback(r) | FetchOutcome::Failure(r)) => {
                            FetchOutcome::Fallback(r)
                        }
                    }
                }
                None => FetchOutcome::Fallback("empty taker volume series".into()),
            },
            Err(reason) => FetchOutcome::Failure(reason),
        }
    }

    async fn long_short_ratio(&self, symbol: &InstrumentSymbol) -> FetchOutcome<f64> {
        let url = format!(
            "{}/futures/data/globalLongShortAccountRatio?symbol={symbol}&period=15m&limit=1",
            self.base_url
        );
        match self.get_json::<Vec<LongShortRatioDto>>(&url).await {
            Ok(rows) => match rows.last() {
                Some(dto) => parse_field("longShortRatio", dto.long_short_ratio.as_deref()),
                None => FetchOutcome::Fallback("empty long/short ratio series".into()),
            },
            Err(reason) => FetchOutcome::Failure(reason),
        }
    }

    async fn current_price(&self, symbol: &InstrumentSymbol) -> FetchOutcome<f64> {
        let url = format!("{}/fapi/v1/ticker/price?symbol={symbol}", self.base_url);
        match self.get_json::<TickerPriceDto>(&url).await {
            Ok(dto) => parse_field("price", dto.price.as_deref()),
            Err(reason) => FetchOutcome::Failure(reason),
        }
    }
}
