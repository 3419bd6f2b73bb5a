use crate::error::{MaintenanceError, Result};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Mutex;
use tracing::debug;

/// One page of a table scan: the primary keys it returned, and the token to
/// resume from when more pages remain.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPage {
    pub keys: Vec<String>,
    pub next_token: Option<String>,
}

/// Paginated access to key-value tables keyed by a string `id`.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Scan one page of keys, resuming strictly after `start_after` when set.
    async fn scan_page(&self, table: &str, start_after: Option<&str>) -> Result<ScanPage>;

    /// Delete the given keys from the table as a batched request.
    async fn delete_keys(&self, table: &str, keys: &[String]) -> Result<()>;
}

/// In-memory table store for development/testing.
///
/// Keys are held in sorted order and the continuation token is the last key
/// of a page, resumed strictly-after in key order. That is the same contract
/// as `ExclusiveStartKey` on a string-keyed table, so resumption stays valid
/// while earlier keys are being deleted. Scan and delete calls are recorded
/// so tests can assert on the exact request sequence.
pub struct InMemoryStore {
    tables: Mutex<HashMap<String, BTreeSet<String>>>,
    page_size: usize,
    failing_tables: Mutex<HashSet<String>>,
    scan_calls: Mutex<Vec<(String, Option<String>)>>,
    delete_calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl InMemoryStore {
    pub fn new(page_size: usize) -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
            page_size,
            failing_tables: Mutex::new(HashSet::new()),
            scan_calls: Mutex::new(Vec::new()),
            delete_calls: Mutex::new(Vec::new()),
        }
    }

    /// Seed a table with the given keys.
    pub fn insert_keys(&self, table: &str, keys: &[&str]) {
        let mut tables = self.tables.lock().unwrap();
        let stored = tables.entry(table.to_string()).or_default();
        for key in keys {
            stored.insert((*key).to_string());
        }
    }

    /// Make every call against `table` fail with a storage error.
    pub fn fail_table(&self, table: &str) {
        self.failing_tables.lock().unwrap().insert(table.to_string());
    }

    pub fn remaining_keys(&self, table: &str) -> usize {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .map_or(0, |stored| stored.len())
    }

    /// Scans issued so far, as (table, start_after) pairs.
    pub fn scan_calls(&self) -> Vec<(String, Option<String>)> {
        self.scan_calls.lock().unwrap().clone()
    }

    /// Batched deletes issued so far, as (table, keys) pairs.
    pub fn delete_calls(&self) -> Vec<(String, Vec<String>)> {
        self.delete_calls.lock().unwrap().clone()
    }

    fn check_failure(&self, table: &str) -> Result<()> {
        if self.failing_tables.lock().unwrap().contains(table) {
            return Err(MaintenanceError::Storage {
                message: format!("Injected failure for table {table}"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TableStore for InMemoryStore {
    async fn scan_page(&self, table: &str, start_after: Option<&str>) -> Result<ScanPage> {
        self.check_failure(table)?;
        self.scan_calls
            .lock()
            .unwrap()
            .push((table.to_string(), start_after.map(str::to_string)));

        let tables = self.tables.lock().unwrap();
        let visible: Vec<String> = tables
            .get(table)
            .map(|stored| {
                stored
                    .iter()
                    .filter(|key| start_after.map_or(true, |token| key.as_str() > token))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let keys: Vec<String> = visible.iter().take(self.page_size).cloned().collect();
        let next_token = (visible.len() > keys.len())
            .then(|| keys.last().cloned())
            .flatten();

        debug!("Scanned {} keys from {}", keys.len(), table);
        Ok(ScanPage { keys, next_token })
    }

    async fn delete_keys(&self, table: &str, keys: &[String]) -> Result<()> {
        self.check_failure(table)?;
        self.delete_calls
            .lock()
            .unwrap()
            .push((table.to_string(), keys.to_vec()));

        let mut tables = self.tables.lock().unwrap();
        if let Some(stored) = tables.get_mut(table) {
            for key in keys {
                stored.remove(key);
            }
        }

        debug!("Deleted {} keys from {}", keys.len(), table);
        Ok(())
    }
}
