//! redb-based persistence adapter for engine state
//!
//! One table (`state`) keyed by namespace, holding the full
//! JSON-serialized state of the owning engine. Each engine persists
//! under its own namespace so restoring one never clobbers the other.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default: once
//! `persist` returns, the snapshot survives process exit. Writes are
//! copy-on-write with an atomic pointer swap, so the file is always
//! in a consistent state even across power loss.

use redb::{Database, ReadableDatabase, TableDefinition};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for engine snapshots: key = namespace, value = JSON bytes
const STATE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("state");

/// Namespace for the cart engine snapshot
pub const CART_NAMESPACE: &str = "cart";

/// Namespace for the favorites engine snapshot
pub const FAVORITES_NAMESPACE: &str = "favorites";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Engine state store backed by redb
#[derive(Clone)]
pub struct StateStore {
    db: Arc<Database>,
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore").finish_non_exhaustive()
    }
}

impl StateStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;

        // Create the table up front so restores on a fresh file see
        // an empty table instead of a TableDoesNotExist error
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(STATE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(STATE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Persist the full state of a namespace, replacing any previous
    /// snapshot. Committed (durable) before this returns.
    pub fn persist<T: Serialize>(&self, namespace: &str, state: &T) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(STATE_TABLE)?;
            let value = serde_json::to_vec(state)?;
            table.insert(namespace, value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Restore the snapshot for a namespace
    ///
    /// `Ok(None)` when the namespace was never persisted. A snapshot
    /// that no longer deserializes surfaces as a `Serialization`
    /// error; engines treat that as "start empty".
    pub fn restore<T: DeserializeOwned>(&self, namespace: &str) -> StorageResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STATE_TABLE)?;

        match table.get(namespace)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Remove the snapshot for a namespace
    pub fn clear(&self, namespace: &str) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(STATE_TABLE)?;
            table.remove(namespace)?;
        }
        txn.commit()?;
        Ok(())
    }
}
