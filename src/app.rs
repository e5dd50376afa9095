//! App orchestration.
//!
//! Wires configuration into the metric clients, the LLM advisor, the
//! history store, and the Telegram dispatcher, then runs until shutdown.

use std::sync::Arc;

use dashmap::DashMap;
use teloxide::Bot;
use tracing::info;

use crate::bot::{self, ChatState};
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};
use crate::exchange::{BinanceFuturesClient, MetricsAggregator, SentimentIndexClient};
use crate::llm::GeminiAdvisor;
use crate::store::{HistoryStore, JsonFileStore};

pub struct App;

impl App {
    /// Run the bot until the dispatcher stops, then flush history.
    pub async fn run(config: Config) -> Result<()> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN").map_err(|_| {
            Error::Config(ConfigError::MissingField {
                field: "TELEGRAM_BOT_TOKEN",
            })
        })?;

        let advisor = GeminiAdvisor::from_env(&config.llm)?;
        let market = BinanceFuturesClient::from_config(&config.exchange);
        let sentiment = SentimentIndexClient::from_config(&config.sentiment);
        let aggregator = MetricsAggregator::new(market, sentiment);

        let store: Arc<dyn HistoryStore> = Arc::new(JsonFileStore::load(&config.history.path).await);

        info!(
            coins = aggregator.symbols().len(),
            model = %config.llm.model,
            history = %config.history.path,
            "coinsage configured"
        );

        let state = Arc::new(ChatState {
            aggregator,
            advisor: Arc::new(advisor),
            store: store.clone(),
            sessions: DashMap::new(),
            history_limit: config.history.display_limit,
        });

        bot::run(Bot::new(bot_token), state).await;

        // History also flushes after every append; this catches the tail.
        store.flush().await?;
        Ok(())
    }
}
