//! LLM advisor.
//!
//! The [`Advisor`] trait abstracts the text-generation provider; the
//! [`gemini`] module implements it against the Gemini `generateContent`
//! API. The prompt embeds every metrics field so degraded (defaulted)
//! fields are visible to the model as zeros rather than omitted.

pub mod gemini;

pub use gemini::GeminiAdvisor;

use async_trait::async_trait;

use crate::domain::MetricsRecord;
use crate::error::Result;

/// A text-generation provider.
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Complete a prompt into advice text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Build the analyst prompt for one coin and its metrics record.
#[must_use]
pub fn build_prompt(coin: &str, metrics: &MetricsRecord) -> String {
    format!(
        "You are an experienced crypto analyst specializing in futures markets. \
         Analyze the following metrics for {coin} and propose a CONCRETE trading \
         plan for a short-term trade; the metrics are 15-minute based. \
         Keep the advice short (4-5 sentences at most) and include:\n\
         1. **Trade type:** (e.g. Buy, Sell, Hold).\n\
         2. **Suggested entry:** (a number close to the current price).\n\
         3. **Suggested stop-loss (SL):** (a number, to cap losses).\n\
         4. **Suggested take-profit (TP):** (a number, to lock in gains).\n\
         Justify the choice from the data. Answer in a structured form like:\n\n\
         **Trade type:** Buy\n\
         **Entry:** [value] USDT\n\
         **SL:** [value] USDT\n\
         **TP:** [value] USDT\n\
         **Reasoning:** [your analysis]\n\n\
         Current data for {coin}:\n\
         - Current price: {price:.2} USDT\n\
         - Open interest: {oi:.2}\n\
         - Funding rate: {funding:.5}\n\
         - Taker buy volume: {buy:.2}\n\
         - Taker sell volume: {sell:.2}\n\
         - Long/short ratio: {ratio:.2}\n\
         - Fear & greed index: {fng:.0} ({grade})\n",
        coin = coin,
        price = metrics.current_price,
        oi = metrics.open_interest,
        funding = metrics.funding_rate,
        buy = metrics.taker_buy_volume,
        sell = metrics.taker_sell_volume,
        ratio = metrics.long_short_ratio,
        fng = metrics.fear_greed_index_value,
        grade = metrics.fear_greed_index_grade,
    )
}
