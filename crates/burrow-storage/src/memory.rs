use crate::{Insertion, ReadRepository, Repository, Result, StorageError, UrlRecord};
use async_trait::async_trait;
use burrow_core::ShortCode;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, trace};

/// The mapping table and its URL index, always updated together.
#[derive(Debug, Default)]
struct Table {
    records: HashMap<ShortCode, UrlRecord>,
    /// Canonical URL to the first code stored for it.
    codes_by_url: HashMap<String, ShortCode>,
}

impl Table {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            records: HashMap::with_capacity(capacity),
            codes_by_url: HashMap::with_capacity(capacity),
        }
    }

    fn find_by_url(&self, url: &str) -> Option<&UrlRecord> {
        self.codes_by_url
            .get(url)
            .and_then(|code| self.records.get(code))
    }

    fn insert(&mut self, code: &ShortCode, original_url: &str) -> Result<UrlRecord> {
        if self.records.contains_key(code) {
            return Err(StorageError::Conflict(code.to_string()));
        }

        let record = UrlRecord::new(code.clone(), original_url);
        self.codes_by_url
            .entry(original_url.to_owned())
            .or_insert_with(|| code.clone());
        self.records.insert(code.clone(), record.clone());

        Ok(record)
    }
}

/// In-memory implementation of the Repository trait.
///
/// A single `RwLock` guards the whole table. Writers (`insert`,
/// `insert_unique`, `increment_access`) hold the write guard for the whole
/// operation; readers share the read guard and get clones, so no caller can
/// observe a half-written record or keep a reference into the table.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    table: RwLock<Table>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            table: RwLock::new(Table::with_capacity(capacity)),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.table.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        Ok(self.table.read().records.get(code).cloned())
    }

    async fn find_by_url(&self, url: &str) -> Result<Option<UrlRecord>> {
        Ok(self.table.read().find_by_url(url).cloned())
    }

    async fn list(&self) -> Result<Vec<UrlRecord>> {
        Ok(self.table.read().records.values().cloned().collect())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &ShortCode, original_url: &str) -> Result<UrlRecord> {
        let record = self.table.write().insert(code, original_url)?;
        debug!(code = %code, url = %original_url, "stored new record");
        Ok(record)
    }

    async fn insert_unique(&self, code: &ShortCode, original_url: &str) -> Result<Insertion> {
        let mut table = self.table.write();

        if let Some(existing) = table.find_by_url(original_url) {
            trace!(code = %existing.code, url = %original_url, "url already stored");
            return Ok(Insertion::Existing(existing.clone()));
        }

        let record = table.insert(code, original_url)?;
        drop(table);

        debug!(code = %code, url = %original_url, "stored new record");
        Ok(Insertion::Created(record))
    }

    async fn increment_access(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        let mut table = self.table.write();

        let Some(record) = table.records.get_mut(code) else {
            trace!(code = %code, "increment on unknown code");
            return Ok(None);
        };

        record.access_count += 1;
        Ok(Some(record.clone()))
    }
}
