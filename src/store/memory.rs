//! In-memory history store for tests and ephemeral runs.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::HistoryStore;
use crate::domain::AdviceEntry;
use crate::error::Result;

#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<AdviceEntry>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn get(&self, user_id: &str) -> Vec<AdviceEntry> {
        self.entries
            .read()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn append(&self, user_id: &str, entry: AdviceEntry) {
        self.entries
            .write()
            .entry(user_id.to_string())
            .or_default()
            .push(entry);
    }

    async fn flush(&self) -> Result<()> {
        Ok(())
    }
}
