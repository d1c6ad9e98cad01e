use async_trait::async_trait;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::models::Offer;
use crate::storage::{Storage, HISTORY_LIMIT};

// Storage key names; the "bj:" prefix namespaces them within the kv table.
const KEY_OFFERS: &str = "bj:offers";
const KEY_QUERY: &str = "bj:query";
const KEY_HISTORY: &str = "bj:history";

pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStorage {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path)
            .context("Failed to open SQLite database")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let value = conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        info!("Database migration completed");
        Ok(())
    }

    async fn load_offers(&self) -> Result<Vec<Offer>> {
        match self.get(KEY_OFFERS)? {
            Some(json) => Ok(serde_json::from_str(&json).unwrap_or_default()),
            None => Ok(vec![]),
        }
    }

    async fn save_offers(&self, offers: &[Offer]) -> Result<()> {
        self.set(KEY_OFFERS, &serde_json::to_string(offers)?)
    }

    async fn last_query(&self) -> Result<Option<String>> {
        self.get(KEY_QUERY)
    }

    async fn save_query(&self, query: &str) -> Result<()> {
        self.set(KEY_QUERY, query)?;

        if query.is_empty() {
            return Ok(());
        }

        let mut history: Vec<String> = match self.get(KEY_HISTORY)? {
            Some(json) => serde_json::from_str(&json).unwrap_or_default(),
            None => vec![],
        };

        // an already-known query keeps its old position
        if !history.iter().any(|q| q == query) {
            history.insert(0, query.to_string());
            history.truncate(HISTORY_LIMIT);
            self.set(KEY_HISTORY, &serde_json::to_string(&history)?)?;
        }

        Ok(())
    }

    async fn history(&self) -> Result<Vec<String>> {
        match self.get(KEY_HISTORY)? {
            Some(json) => Ok(serde_json::from_str(&json).unwrap_or_default()),
            None => Ok(vec![]),
        }
    }
}
