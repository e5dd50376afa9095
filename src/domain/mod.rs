//! Exchange-agnostic domain types.
//!
//! - [`SymbolTable`] - Immutable coin-code to instrument-symbol mapping
//! - [`FetchOutcome`] - Three-way result of a single metric fetch
//! - [`MetricsRecord`] - Fixed-shape aggregate of all per-field values
//! - [`AdviceEntry`] - One generated advice in a user's history

pub mod advice;
pub mod metrics;
pub mod outcome;
pub mod symbol;

pub use advice::AdviceEntry;
pub use metrics::{MetricsRecord, Sentiment, SentimentGrade, TakerVolume};
pub use outcome::FetchOutcome;
pub use symbol::{InstrumentSymbol, SymbolTable};
