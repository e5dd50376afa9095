//! HTML message rendering and chunking.

use crate::domain::{AdviceEntry, MetricsRecord};

/// Telegram's hard message limit is 4096 chars; stay under it with room
/// for headers added around chunks.
pub const CHUNK_LIMIT: usize = 4000;

/// Escape text for Telegram HTML parse mode.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the per-coin analysis message: metrics summary, advice, and the
/// not-financial-advice note.
#[must_use]
pub fn format_analysis(coin: &str, metrics: &MetricsRecord, advice: &str) -> String {
    format!(
        "📊 <b>Analysis for {coin}</b>\n\n\
         💰 <b>Price:</b> {price:.2} USDT\n\
         📈 <b>Open interest:</b> {oi:.2}\n\
         💸 <b>Funding rate:</b> {funding:.5}\n\
         🟢 <b>Taker buy volume:</b> {buy:.2}\n\
         🔴 <b>Taker sell volume:</b> {sell:.2}\n\
         ⚖️ <b>Long/short ratio:</b> {ratio:.2}\n\
         😱 <b>Fear &amp; greed index:</b> {fng:.0} ({grade})\n\
         \n🧠 <b>AI advice:</b>\n{advice}\n\n\
         <i>(Note: this is AI-generated, not financial advice. Futures trading carries risk.)</i>",
        coin = escape_html(coin),
        price = metrics.current_price,
        oi = metrics.open_interest,
        funding = metrics.funding_rate,
        buy = metrics.taker_buy_volume,
        sell = metrics.taker_sell_volume,
        ratio = metrics.long_short_ratio,
        fng = metrics.fear_greed_index_value,
        grade = metrics.fear_greed_index_grade,
        advice = escape_html(advice),
    )
}

/// Render the last `limit` history entries, oldest first, with a
/// truncation note when the history is longer.
#[must_use]
pub fn format_history(entries: &[AdviceEntry], limit: usize) -> String {
    let start = entries.len().saturating_sub(limit);
    let mut text = String::from("📜 <b>Your advice history:</b>\n\n");

    for (i, entry) in entries[start..].iter().enumerate() {
        text.push_str(&format!(
            "--- Advice #{n} ---\n\
             📅 Date: {date}\n\
             💰 Coin: {coin}\n\
             🧠 Advice:\n{advice}\n\n",
            n = i + 1,
            date = entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            coin = escape_html(&entry.coin),
            advice = escape_html(&entry.advice),
        ));
    }

    if entries.len() > limit {
        text.push_str(&format!(
            "Showing the last {limit} of {total} entries.\n",
            total = entries.len()
        ));
    }

    text
}

/// Split a message into chunks below [`CHUNK_LIMIT`] chars, breaking on
/// char boundaries.
#[must_use]
pub fn chunk_message(text: &str) -> Vec<String> {
    if text.len() <= CHUNK_LIMIT {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if current.len() + c.len_utf8() > CHUNK_LIMIT {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
