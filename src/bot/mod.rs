//! Telegram chat front-end.
//!
//! Long-polling dispatcher with two handlers: plain messages (only
//! `/start`/`/help` matter) and inline-keyboard callbacks carrying every
//! menu action. Per-user coin selection lives in memory; generated advice
//! goes through the injected [`HistoryStore`].

pub mod command;
pub mod format;
pub mod keyboard;

use std::sync::Arc;

use dashmap::DashMap;
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tracing::{error, info, warn};

use crate::domain::AdviceEntry;
use crate::exchange::{BinanceFuturesClient, MetricsAggregator, SentimentIndexClient};
use crate::llm::{build_prompt, Advisor};
use crate::store::HistoryStore;
use command::{parse_callback, MenuAction};

const GREETING: &str = "👋 Hi! I'm a crypto futures assistant. Pick a coin and generate a trading idea.";

/// Shared state injected into every handler.
pub struct ChatState {
    pub aggregator: MetricsAggregator<BinanceFuturesClient, SentimentIndexClient>,
    pub advisor: Arc<dyn Advisor>,
    pub store: Arc<dyn HistoryStore>,
    /// Per-user current coin selection.
    pub sessions: DashMap<String, String>,
    /// Maximum entries rendered by the history view.
    pub history_limit: usize,
}

/// Run the dispatcher until shutdown (ctrl-c).
pub async fn run(bot: Bot, state: Arc<ChatState>) {
    info!("Telegram dispatcher starting");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Telegram dispatcher stopped");
}

async fn handle_message(bot: Bot, msg: Message) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    if matches!(text.trim(), "/start" | "/help") {
        bot.send_message(msg.chat.id, GREETING)
            .reply_markup(keyboard::main_menu())
            .await?;
    }

    Ok(())
}

async fn handle_callback(bot: Bot, q: CallbackQuery, state: Arc<ChatState>) -> ResponseResult<()> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(action) = q.data.as_deref().and_then(parse_callback) else {
        return Ok(());
    };
    let Some(message) = q.message.as_ref() else {
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();
    let user_id = q.from.id.to_string();

    match action {
        MenuAction::ChooseCoin => {
            bot.edit_message_text(chat_id, message_id, "Pick a coin:")
                .reply_markup(keyboard::coin_menu(state.aggregator.symbols()))
                .await?;
        }
        MenuAction::SelectCoin(coin) => {
            // The menu is built from the symbol table, so this only fires
            // if a stale keyboard outlives a table change.
            if state.aggregator.symbols().resolve(&coin).is_none() {
                bot.edit_message_text(chat_id, message_id, format!("⚠️ Coin {coin} is not supported."))
                    .reply_markup(keyboard::main_menu())
                    .await?;
                return Ok(());
            }
            state.sessions.insert(user_id, coin.clone());
            bot.edit_message_text(chat_id, message_id, format!("✅ Coin selected: {coin}"))
                .reply_markup(keyboard::main_menu())
                .await?;
        }
        MenuAction::Back => {
            bot.edit_message_text(chat_id, message_id, "Main menu:")
                .reply_markup(keyboard::main_menu())
                .await?;
        }
        MenuAction::History => {
            show_history(&bot, chat_id, message_id, &user_id, &state).await?;
        }
        MenuAction::Advise => {
            advise(&bot, chat_id, &user_id, &state).await?;
        }
    }

    Ok(())
}

async fn show_history(
    bot: &Bot,
    chat_id: ChatId,
    message_id: teloxide::types::MessageId,
    user_id: &str,
    state: &ChatState,
) -> ResponseResult<()> {
    let entries = state.store.get(user_id).await;
    if entries.is_empty() {
        bot.edit_message_text(chat_id, message_id, "📜 Your advice history is empty.")
            .reply_markup(keyboard::main_menu())
            .await?;
        return Ok(());
    }

    let text = format::format_history(&entries, state.history_limit);
    let chunks = format::chunk_message(&text);

    if let [only] = chunks.as_slice() {
        bot.edit_message_text(chat_id, message_id, only.as_str())
            .parse_mode(ParseMode::Html)
            .reply_markup(keyboard::main_menu())
            .await?;
        return Ok(());
    }

    bot.edit_message_text(
        chat_id,
        message_id,
        "📜 <b>Your advice history:</b> (long, shown in parts)",
    )
    .parse_mode(ParseMode::Html)
    .reply_markup(keyboard::main_menu())
    .await?;
    for chunk in chunks {
        bot.send_message(chat_id, chunk)
            .parse_mode(ParseMode::Html)
            .await?;
    }

    Ok(())
}

async fn advise(bot: &Bot, chat_id: ChatId, user_id: &str, state: &ChatState) -> ResponseResult<()> {
    let Some(coin) = state.sessions.get(user_id).map(|c| c.value().clone()) else {
        bot.send_message(chat_id, "⚠️ Pick a coin first.").await?;
        return Ok(());
    };

    bot.send_message(
        chat_id,
        format!("⏳ Fetching {coin} data and generating advice..."),
    )
    .await?;

    let metrics = match state.aggregator.aggregate(&coin).await {
        Ok(metrics) => metrics,
        Err(e) => {
            // Only unresolved symbols propagate out of the aggregator.
            warn!(coin = %coin, error = %e, "aggregation rejected");
            bot.send_message(chat_id, format!("❌ Coin {coin} is not supported."))
                .await?;
            return Ok(());
        }
    };

    let advice = match state
        .advisor
        .complete(&build_prompt(&coin, &metrics))
        .await
    {
        Ok(advice) => advice,
        Err(e) => {
            error!(advisor = state.advisor.name(), error = %e, "advice generation failed");
            bot.send_message(chat_id, "The AI could not generate advice. Please try again.")
                .await?;
            return Ok(());
        }
    };

    bot.send_message(chat_id, format::format_analysis(&coin, &metrics, &advice))
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard::main_menu())
        .await?;

    state
        .store
        .append(user_id, AdviceEntry::new(coin, advice))
        .await;
    if let Err(e) = state.store.flush().await {
        error!(error = %e, "failed to flush advice history");
    }

    Ok(())
}
