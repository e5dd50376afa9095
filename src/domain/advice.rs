//! Advice history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One generated advice, as persisted in a user's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceEntry {
    pub timestamp: DateTime<Utc>,
    pub coin: String,
    pub advice: String,
}

impl AdviceEntry {
    /// Create an entry stamped with the current time.
    #[must_use]
    pub fn new(coin: impl Into<String>, advice: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            coin: coin.into(),
            advice: advice.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_roundtrips_through_json() {
        let entry = AdviceEntry::new("BTC", "Hold.");
        let json = serde_json::to_string(&entry).unwrap();
        let back: AdviceEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
