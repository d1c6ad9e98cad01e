use async_trait::async_trait;
use anyhow::Result;
use crate::models::Offer;

mod sqlite;
pub use sqlite::SqliteStorage;

/// Maximum number of remembered queries, most recent first.
pub const HISTORY_LIMIT: usize = 20;

/// Persistence for the current offer list, the last query, and the query
/// history. Plain data in and out; last write wins.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn migrate(&self) -> Result<()>;
    async fn load_offers(&self) -> Result<Vec<Offer>>;
    async fn save_offers(&self, offers: &[Offer]) -> Result<()>;
    async fn last_query(&self) -> Result<Option<String>>;
    /// Record the query as the last one used and prepend it to the
    /// history, unless empty or already present. The history is capped at
    /// [`HISTORY_LIMIT`] entries.
    async fn save_query(&self, query: &str) -> Result<()>;
    async fn history(&self) -> Result<Vec<String>>;
}
