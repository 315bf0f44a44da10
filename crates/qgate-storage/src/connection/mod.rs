//! `DatabaseManager`: one serialized write connection plus a round-robin
//! pool of read-only connections.
//!
//! In-memory databases are private to the connection that opened them, so
//! an in-memory manager has no read pool and routes reads to the writer.

pub mod pragmas;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use qgate_core::config::StorageConfig;
use qgate_core::errors::StorageError;
use rusqlite::{Connection, OpenFlags, Transaction, TransactionBehavior};
use tracing::{debug, info};

use crate::to_storage_err;

pub struct DatabaseManager {
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    next_reader: AtomicUsize,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a file-backed database with default settings.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let config = StorageConfig {
            path: Some(path.to_path_buf()),
            ..StorageConfig::default()
        };
        Self::open_with_config(&config)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::open_with_config(&StorageConfig::default())
    }

    /// Open according to `config`; `config.path == None` means in-memory.
    pub fn open_with_config(config: &StorageConfig) -> Result<Self, StorageError> {
        let Some(path) = config.path.as_deref() else {
            let writer = Connection::open_in_memory().map_err(to_storage_err)?;
            pragmas::apply_pragmas(&writer, config)?;
            debug!("opened in-memory database");
            return Ok(Self {
                writer: Mutex::new(writer),
                readers: Vec::new(),
                next_reader: AtomicUsize::new(0),
                path: None,
            });
        };

        let writer = Connection::open(path).map_err(to_storage_err)?;
        pragmas::apply_pragmas(&writer, config)?;

        let mut readers = Vec::with_capacity(config.read_pool_size);
        for _ in 0..config.read_pool_size {
            let reader = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .map_err(to_storage_err)?;
            pragmas::apply_read_pragmas(&reader, config)?;
            readers.push(Mutex::new(reader));
        }

        info!(path = %path.display(), readers = readers.len(), "opened database");
        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            next_reader: AtomicUsize::new(0),
            path: Some(path.to_path_buf()),
        })
    }

    /// Run `f` against a read connection.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        if self.readers.is_empty() {
            return self.with_writer(f);
        }
        let idx = self.next_reader.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let guard = lock(&self.readers[idx])?;
        f(&guard)
    }

    /// Run `f` against the write connection, outside any transaction.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = lock(&self.writer)?;
        f(&guard)
    }

    /// Run `f` inside an IMMEDIATE transaction on the write connection.
    /// Commits when `f` returns `Ok`; any error rolls the transaction back.
    pub fn with_transaction<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, StorageError>,
    {
        let mut guard = lock(&self.writer)?;
        let tx = guard
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(to_storage_err)?;
        let out = f(&tx)?;
        tx.commit().map_err(to_storage_err)?;
        Ok(out)
    }

    /// Truncating WAL checkpoint. A no-op for in-memory databases.
    pub fn checkpoint(&self) -> Result<(), StorageError> {
        if self.path.is_none() {
            return Ok(());
        }
        self.with_writer(|conn| {
            conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
                .map_err(to_storage_err)
        })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn read_pool_size(&self) -> usize {
        self.readers.len()
    }
}

fn lock(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, StorageError> {
    conn.lock().map_err(|_| StorageError::SqliteError {
        message: "connection mutex poisoned".to_string(),
    })
}
