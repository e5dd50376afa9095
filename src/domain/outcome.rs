//! Per-fetch result type.
//!
//! Every metric fetcher returns a [`FetchOutcome`] instead of propagating
//! errors. The merge step collapses `Fallback` and `Failure` to the field's
//! documented default; the two stay distinct until then so the logs can
//! tell "endpoint answered with an unexpected shape" apart from "endpoint
//! unreachable or broken".

use tracing::warn;

/// Outcome of a single metric fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    /// Well-shaped payload, parsed value.
    Value(T),
    /// Endpoint answered 2xx with valid JSON, but the payload was not the
    /// expected shape (missing key, empty time series, unparsable number).
    Fallback(String),
    /// Transport fault, non-2xx status, or a body that was not valid JSON.
    Failure(String),
}

impl<T> FetchOutcome<T> {
    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    /// Map the carried value, preserving Fallback/Failure reasons.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            Self::Value(v) => FetchOutcome::Value(f(v)),
            Self::Fallback(reason) => FetchOutcome::Fallback(reason),
            Self::Failure(reason) => FetchOutcome::Failure(reason),
        }
    }

    /// Collapse to a value, substituting `default` for Fallback and
    /// Failure. Degradation is logged, never surfaced to the caller.
    #[must_use]
    pub fn settle(self, field: &'static str, default: T) -> T {
        match self {
            Self::Value(v) => v,
            Self::Fallback(reason) => {
                warn!(field, %reason, "unexpected payload, using default");
                default
            }
            Self::Failure(reason) => {
                warn!(field, %reason, "fetch failed, using default");
                default
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_keeps_value() {
        let outcome = FetchOutcome::Value(42.0);
        assert_eq!(outcome.settle("open_interest", 0.0), 42.0);
    }

    #[test]
    fn settle_defaults_on_fallback() {
        let outcome: FetchOutcome<f64> = FetchOutcome::Fallback("empty list".into());
        assert_eq!(outcome.settle("funding_rate", 0.0), 0.0);
    }

    #[test]
    fn settle_defaults_on_failure() {
        let outcome: FetchOutcome<f64> = FetchOutcome::Failure("connection refused".into());
        assert_eq!(outcome.settle("current_price", 0.0), 0.0);
    }

    #[test]
    fn settle_keeps_legitimate_zero() {
        // A true zero reading from upstream is a Value, not a Fallback.
        let outcome = FetchOutcome::Value(0.0);
        assert!(outcome.is_value());
        assert_eq!(outcome.settle("funding_rate", 1.0), 0.0);
    }

    #[test]
    fn map_preserves_reasons() {
        let outcome: FetchOutcome<f64> = FetchOutcome::Fallback("missing key".into());
        let mapped = outcome.map(|v| v * 2.0);
        assert_eq!(mapped, FetchOutcome::Fallback("missing key".into()));
    }
}
