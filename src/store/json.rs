//! JSON flat-file history store.
//!
//! The whole history is one JSON object keyed by user ID. It loads once at
//! startup; a missing or corrupt file yields an empty history. Flush
//! serializes the full map and renames a temp file over the target so a
//! crash mid-write cannot truncate the previous history.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{info, warn};

use super::HistoryStore;
use crate::domain::AdviceEntry;
use crate::error::Result;

pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, Vec<AdviceEntry>>>,
}

impl JsonFileStore {
    /// Open a store backed by `path`, loading any existing history.
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(entries) => {
                    info!(path = %path.display(), "advice history loaded");
                    entries
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "corrupt history file, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no history file, starting empty");
                HashMap::new()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable history file, starting empty");
                HashMap::new()
            }
        };

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl HistoryStore for JsonFileStore {
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
        // Serialize outside the lock; the guard must not live across await.
        let json = {
            let entries = self.entries.read();
            serde_json::to_string_pretty(&*entries)?
        };

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json.as_bytes()).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
