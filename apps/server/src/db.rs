//! SQLite wallet registry.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::str::FromStr;
use thiserror::Error;
use tronwatch_core::MonitoredAddress;
use tronwatch_monitor::{AddressRegistry, RegistryError};

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Wallet registry storage. Rows are keyed by `(chat_id, address)`: several
/// chats may watch the same address, each under its own remark.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to SQLite at the given URL, creating the file if needed.
    pub async fn connect(database_url: &str) -> Result<Self, DbError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.run_migrations().await?;
        Ok(db)
    }

    async fn run_migrations(&self) -> Result<(), DbError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS wallet_addresses (
                chat_id TEXT NOT NULL,
                address TEXT NOT NULL,
                remark TEXT NOT NULL DEFAULT '',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (chat_id, address)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Every registered wallet across all chats, one row per
    /// `(chat_id, address)` pair.
    pub async fn get_all_wallet_addresses(&self) -> Result<Vec<MonitoredAddress>, DbError> {
        let rows = sqlx::query("SELECT chat_id, address, remark FROM wallet_addresses")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| MonitoredAddress {
                destination_id: row.get("chat_id"),
                address: row.get("address"),
                remark: row.get("remark"),
            })
            .collect())
    }

    /// Wallets registered by one chat.
    pub async fn get_wallet_addresses(
        &self,
        chat_id: &str,
    ) -> Result<Vec<MonitoredAddress>, DbError> {
        let rows =
            sqlx::query("SELECT chat_id, address, remark FROM wallet_addresses WHERE chat_id = ?")
                .bind(chat_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows
            .into_iter()
            .map(|row| MonitoredAddress {
                destination_id: row.get("chat_id"),
                address: row.get("address"),
                remark: row.get("remark"),
            })
            .collect())
    }

    /// Register a wallet for a chat; re-registering updates the remark.
    pub async fn add_wallet_address(
        &self,
        chat_id: &str,
        address: &str,
        remark: &str,
    ) -> Result<(), DbError> {
        sqlx::query(
            "INSERT OR REPLACE INTO wallet_addresses (chat_id, address, remark) VALUES (?, ?, ?)",
        )
        .bind(chat_id)
        .bind(address)
        .bind(remark)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Remove a wallet from a chat. Returns true if a row was deleted.
    pub async fn delete_wallet_address(
        &self,
        chat_id: &str,
        address: &str,
    ) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM wallet_addresses WHERE chat_id = ? AND address = ?")
            .bind(chat_id)
            .bind(address)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl AddressRegistry for Database {
    async fn list_monitored_addresses(&self) -> Result<Vec<MonitoredAddress>, RegistryError> {
        self.get_all_wallet_addresses()
            .await
            .map_err(|e| RegistryError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn test_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("test.db").display());
        let db = Database::connect(&url).await.unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn test_add_and_list_addresses() {
        let (_dir, db) = test_db().await;
        db.add_wallet_address("1001", "TWalletA", "ops").await.unwrap();
        db.add_wallet_address("1002", "TWalletA", "shared").await.unwrap();
        db.add_wallet_address("1001", "TWalletB", "cold").await.unwrap();

        let all = db.get_all_wallet_addresses().await.unwrap();
        assert_eq!(all.len(), 3);

        let mine = db.get_wallet_addresses("1001").await.unwrap();
        assert_eq!(mine.len(), 2);
    }

    #[tokio::test]
    async fn test_reregistering_updates_remark() {
        let (_dir, db) = test_db().await;
        db.add_wallet_address("1001", "TWalletA", "old").await.unwrap();
        db.add_wallet_address("1001", "TWalletA", "new").await.unwrap();

        let mine = db.get_wallet_addresses("1001").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].remark, "new");
    }

    #[tokio::test]
    async fn test_delete_address() {
        let (_dir, db) = test_db().await;
        db.add_wallet_address("1001", "TWalletA", "ops").await.unwrap();

        assert!(db.delete_wallet_address("1001", "TWalletA").await.unwrap());
        assert!(!db.delete_wallet_address("1001", "TWalletA").await.unwrap());
        assert!(db.get_all_wallet_addresses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_registry_trait_lists_all() {
        let (_dir, db) = test_db().await;
        db.add_wallet_address("1001", "TWalletA", "ops").await.unwrap();

        let listed = db.list_monitored_addresses().await.unwrap();
        assert_eq!(
            listed,
            vec![MonitoredAddress::new("1001", "TWalletA", "ops")]
        );
    }
}
