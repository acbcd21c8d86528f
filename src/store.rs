// Copyright (c) 2025 Kakei contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{Connection, params};
use thiserror::Error;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("app.kakei", "Kakei", "kakei"));

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("'{0}' not found")]
    NotFound(String),
    #[error("malformed data in '{collection}': {reason}")]
    Malformed { collection: String, reason: String },
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

/// A named collection as the external store sees it: a header row plus
/// text rows. Every field is coerced to text on save.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: &[&str]) -> Self {
        Table {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read/write of named record collections.
///
/// `load` of a missing or empty collection yields an empty table, never an
/// error. `save` is clear-then-rewrite of the whole collection; there is no
/// incremental upsert and no durability guarantee across a crash mid-save.
pub trait CollectionStore {
    fn load(&self, name: &str) -> Result<Table, StoreError>;
    fn save(&self, name: &str, table: &Table) -> Result<(), StoreError>;
}

impl<S: CollectionStore + ?Sized> CollectionStore for &S {
    fn load(&self, name: &str) -> Result<Table, StoreError> {
        (**self).load(name)
    }

    fn save(&self, name: &str, table: &Table) -> Result<(), StoreError> {
        (**self).save(name, table)
    }
}

/// Cell-level access to one row by column name, tolerant of schema drift:
/// a column missing from the stored header reads as empty.
pub struct RowView<'a> {
    header: &'a [String],
    cells: &'a [String],
}

impl<'a> RowView<'a> {
    pub fn new(header: &'a [String], cells: &'a [String]) -> Self {
        RowView { header, cells }
    }

    pub fn get(&self, column: &str) -> &str {
        self.header
            .iter()
            .position(|h| h == column)
            .and_then(|i| self.cells.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// A record type bound to one named collection.
pub trait Record: Sized {
    const COLLECTION: &'static str;
    const HEADER: &'static [&'static str];
    fn to_row(&self) -> Vec<String>;
    /// `None` drops the row silently.
    fn from_row(row: &RowView<'_>) -> Option<Self>;
}

pub fn load_records<R: Record>(store: &dyn CollectionStore) -> Result<Vec<R>, StoreError> {
    let table = store.load(R::COLLECTION)?;
    Ok(table
        .rows
        .iter()
        .filter_map(|cells| R::from_row(&RowView::new(&table.header, cells)))
        .collect())
}

/// Read-path degradation: store failure reads as "no data".
pub fn load_or_empty<R: Record>(store: &dyn CollectionStore) -> Vec<R> {
    load_records(store).unwrap_or_default()
}

pub fn save_records<R: Record>(
    store: &dyn CollectionStore,
    records: &[R],
) -> Result<(), StoreError> {
    let mut table = Table::new(R::HEADER);
    table.rows = records.iter().map(Record::to_row).collect();
    store.save(R::COLLECTION, &table)
}

/// SQLite-backed store. Each collection lives as positioned rows in one
/// table, cells JSON-encoded as text, with position 0 holding the header.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn data_path() -> Result<PathBuf> {
        let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
            .context("Could not determine platform-specific data dir")?;
        let data_dir = proj.data_dir();
        fs::create_dir_all(data_dir).context("Failed to create data dir")?;
        Ok(data_dir.join("kakei.sqlite"))
    }

    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Open store at {}", path.display()))?;
        Self::init_schema(&conn)?;
        Ok(SqliteStore { conn })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(&Self::data_path()?)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Open in-memory store")?;
        Self::init_schema(&conn)?;
        Ok(SqliteStore { conn })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
        CREATE TABLE IF NOT EXISTS collections(
            name TEXT NOT NULL,
            pos INTEGER NOT NULL,
            cells TEXT NOT NULL,
            PRIMARY KEY(name, pos)
        );
        "#,
        )?;
        Ok(())
    }
}

impl CollectionStore for SqliteStore {
    fn load(&self, name: &str) -> Result<Table, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT cells FROM collections WHERE name=?1 ORDER BY pos")?;
        let mut rows = stmt.query(params![name])?;
        let mut table = Table::default();
        let mut first = true;
        while let Some(r) = rows.next()? {
            let cells_json: String = r.get(0)?;
            let cells: Vec<String> =
                serde_json::from_str(&cells_json).map_err(|e| StoreError::Malformed {
                    collection: name.to_string(),
                    reason: e.to_string(),
                })?;
            if first {
                table.header = cells;
                first = false;
            } else {
                table.rows.push(cells);
            }
        }
        Ok(table)
    }

    fn save(&self, name: &str, table: &Table) -> Result<(), StoreError> {
        // Clear-then-rewrite inside one statement batch. A process crash
        // between the two leaves the collection truncated; accepted risk.
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM collections WHERE name=?1", params![name])?;
        let encode = |cells: &Vec<String>| -> Result<String, StoreError> {
            serde_json::to_string(cells).map_err(|e| StoreError::Malformed {
                collection: name.to_string(),
                reason: e.to_string(),
            })
        };
        tx.execute(
            "INSERT INTO collections(name, pos, cells) VALUES (?1, 0, ?2)",
            params![name, encode(&table.header)?],
        )?;
        for (i, row) in table.rows.iter().enumerate() {
            tx.execute(
                "INSERT INTO collections(name, pos, cells) VALUES (?1, ?2, ?3)",
                params![name, (i + 1) as i64, encode(row)?],
            )?;
        }
        tx.commit()?;
        Ok(())
    }
}

/// In-memory store for tests and dry runs.
#[derive(Default)]
pub struct MemStore {
    tables: Mutex<HashMap<String, Table>>,
    offline: Mutex<bool>,
}

impl MemStore {
    pub fn new() -> Self {
        MemStore::default()
    }

    /// Simulate store unavailability.
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap() = offline;
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if *self.offline.lock().unwrap() {
            Err(StoreError::Unavailable("offline".to_string()))
        } else {
            Ok(())
        }
    }
}

impl CollectionStore for MemStore {
    fn load(&self, name: &str) -> Result<Table, StoreError> {
        self.check_online()?;
        Ok(self
            .tables
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    fn save(&self, name: &str, table: &Table) -> Result<(), StoreError> {
        self.check_online()?;
        self.tables
            .lock()
            .unwrap()
            .insert(name.to_string(), table.clone());
        Ok(())
    }
}

/// Read-through cache with a short TTL. Staleness is bounded by the TTL;
/// every save writes through and invalidates its entry.
pub struct CachedStore<S: CollectionStore> {
    inner: S,
    ttl: Duration,
    cache: Mutex<HashMap<String, (Instant, Table)>>,
}

impl<S: CollectionStore> CachedStore<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        CachedStore {
            inner,
            ttl,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: CollectionStore> CollectionStore for CachedStore<S> {
    fn load(&self, name: &str) -> Result<Table, StoreError> {
        {
            let cache = self.cache.lock().unwrap();
            if let Some((at, table)) = cache.get(name) {
                if at.elapsed() < self.ttl {
                    return Ok(table.clone());
                }
            }
        }
        let table = self.inner.load(name)?;
        self.cache
            .lock()
            .unwrap()
            .insert(name.to_string(), (Instant::now(), table.clone()));
        Ok(table)
    }

    fn save(&self, name: &str, table: &Table) -> Result<(), StoreError> {
        self.inner.save(name, table)?;
        self.cache.lock().unwrap().remove(name);
        Ok(())
    }
}
