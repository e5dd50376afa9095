//! Per-user advice history with pluggable storage backends.

mod json;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::domain::AdviceEntry;
use crate::error::Result;

/// Storage operations for advice history.
///
/// Injected into the chat layer so persistence format and atomicity stay a
/// backend concern. Entries are append-only per user.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// All entries for a user, oldest first.
    async fn get(&self, user_id: &str) -> Vec<AdviceEntry>;

    /// Append one entry to a user's history.
    async fn append(&self, user_id: &str, entry: AdviceEntry);

    /// Persist the current state. A no-op for ephemeral backends.
    async fn flush(&self) -> Result<()>;
}
