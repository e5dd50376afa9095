//! Coin-code resolution.
//!
//! The bot accepts short coin codes ("BTC") and the exchange wants
//! instrument symbols ("BTCUSDT"). The mapping is fixed at build time and
//! shared read-only by every request.

use std::fmt;

/// Exchange-specific trading-pair identifier, e.g. `BTCUSDT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstrumentSymbol(String);

impl InstrumentSymbol {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstrumentSymbol {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// USDT-margined perpetuals the bot knows about.
const SUPPORTED: &[(&str, &str)] = &[
    ("BTC", "BTCUSDT"),
    ("ETH", "ETHUSDT"),
    ("SOL", "SOLUSDT"),
    ("BNB", "BNBUSDT"),
    ("XRP", "XRPUSDT"),
    ("DOGE", "DOGEUSDT"),
    ("ADA", "ADAUSDT"),
    ("LINK", "LINKUSDT"),
    ("DOT", "DOTUSDT"),
    ("AVAX", "AVAXUSDT"),
    ("SHIB", "SHIBUSDT"),
];

/// Immutable map from coin code to instrument symbol.
///
/// Lookup is case-insensitive on the coin code. An unknown code resolves to
/// `None`; there is no default symbol.
#[derive(Debug, Clone, Copy)]
pub struct SymbolTable {
    entries: &'static [(&'static str, &'static str)],
}

impl SymbolTable {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: SUPPORTED }
    }

    /// Resolve a coin code to its instrument symbol.
    #[must_use]
    pub fn resolve(&self, coin: &str) -> Option<InstrumentSymbol> {
        let coin = coin.trim().to_ascii_uppercase();
        self.entries
            .iter()
            .find(|(code, _)| *code == coin)
            .map(|(_, symbol)| InstrumentSymbol::from(*symbol))
    }

    /// Coin codes in display order.
    pub fn coins(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(code, _)| *code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
