//! Boundary to the SNMP transport.
//!
//! Discovery never talks to a device directly. Everything it reads comes
//! through [`SnmpWalker::walk`], which returns one whole table per call.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::SnmpError;
use crate::mib_table::MibTable;

/// Source of walked SNMP tables.
///
/// Implementations own session setup, retries and MIB resolution. A table
/// the agent does not implement is returned empty, not as an error.
#[async_trait]
pub trait SnmpWalker: Send + Sync {
    /// Walks `mib::table` and returns all of its rows.
    async fn walk(&self, mib: &str, table: &str) -> Result<MibTable, SnmpError>;
}

#[async_trait]
impl<W: SnmpWalker + ?Sized> SnmpWalker for &W {
    async fn walk(&self, mib: &str, table: &str) -> Result<MibTable, SnmpError> {
        (**self).walk(mib, table).await
    }
}

/// In-memory walker serving pre-captured tables.
///
/// Counts walks per table name and can be told to fail selected tables.
#[derive(Debug, Default)]
pub struct StaticWalker {
    tables: HashMap<String, MibTable>,
    failures: HashMap<String, SnmpError>,
    walks: Mutex<HashMap<String, usize>>,
}

impl StaticWalker {
    /// Creates a walker with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table, keyed by its name.
    pub fn with_table(mut self, table: MibTable) -> Self {
        self.tables.insert(table.name().to_string(), table);
        self
    }

    /// Makes every walk of `table` fail with `error`.
    pub fn with_failure(mut self, table: impl Into<String>, error: SnmpError) -> Self {
        self.failures.insert(table.into(), error);
        self
    }

    /// Returns how many times `table` has been walked.
    pub fn walk_count(&self, table: &str) -> usize {
        self.walks.lock().get(table).copied().unwrap_or(0)
    }
}

#[async_trait]
impl SnmpWalker for StaticWalker {
    async fn walk(&self, _mib: &str, table: &str) -> Result<MibTable, SnmpError> {
        *self.walks.lock().entry(table.to_string()).or_insert(0) += 1;

        if let Some(error) = self.failures.get(table) {
            return Err(error.clone());
        }

        Ok(self
            .tables
            .get(table)
            .cloned()
            .unwrap_or_else(|| MibTable::new(table)))
    }
}
