//! Coinsage - crypto futures metrics aggregation with LLM trade advice.
//!
//! A Telegram bot that, per request, fans out six concurrent fetches of
//! market-microstructure metrics (open interest, funding rate, taker
//! buy/sell volume, long/short account ratio, price, and the fear & greed
//! index), merges them into one fixed-shape record with per-field
//! default-on-failure, and forwards the record to an LLM for a short trade
//! suggestion with persisted per-user history.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Symbol table, fetch outcomes, the metrics record
//! - [`error`] - Error types for the crate
//! - [`exchange`] - Metric source adapters and the fan-out/fan-in reducer
//! - [`llm`] - Advisor trait, prompt builder, Gemini client
//! - [`store`] - Per-user advice history backends
//! - [`bot`] - Telegram front-end
//! - [`app`] - Application wiring
//!
//! # Degradation contract
//!
//! A fetcher fault never fails a request: the affected fields carry their
//! documented defaults and the record stays fully populated. The only
//! error surfaced to the caller is an unsupported coin code, which issues
//! no network calls at all.

pub mod app;
pub mod bot;
pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod llm;
pub mod store;
