//! Ordered in-memory representation of a walked SNMP table.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use snmp_entity_types::RowIndex;

/// Column name to printed value for one table row.
pub type Row = IndexMap<String, String>;

/// A walked MIB table: `{index: {column: value, ...}, ...}` in walk order.
///
/// Columns are stored under their full MIB names (`entPhysicalClass`).
/// Query methods take the short name and prepend the table prefix, which is
/// the table name without its `Table` suffix.
///
/// # Example
///
/// ```
/// use snmp_autoload::MibTable;
///
/// let mut table = MibTable::new("entPhysicalTable");
/// table.insert(1u32.into(), "entPhysicalClass", "'chassis'");
/// table.insert(2u32.into(), "entPhysicalClass", "'port'");
///
/// let ports = table.filter_by_column("Class", &["'port'"]);
/// assert_eq!(ports.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MibTable {
    name: String,
    prefix: String,
    rows: IndexMap<RowIndex, Row>,
}

impl MibTable {
    /// Creates an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let prefix = name.strip_suffix("Table").unwrap_or(&name).to_string();
        Self {
            name,
            prefix,
            rows: IndexMap::new(),
        }
    }

    fn with_rows(&self, rows: IndexMap<RowIndex, Row>) -> Self {
        Self {
            name: self.name.clone(),
            prefix: self.prefix.clone(),
            rows,
        }
    }

    /// Returns the table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the full MIB name of a short column name.
    pub fn column_name(&self, short: &str) -> String {
        format!("{}{}", self.prefix, short)
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Stores one walked cell, creating the row on first use.
    pub fn insert(&mut self, index: RowIndex, column: impl Into<String>, value: impl Into<String>) {
        self.rows
            .entry(index)
            .or_default()
            .insert(column.into(), value.into());
    }

    /// Returns a row by index.
    pub fn get(&self, index: &RowIndex) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Returns a cell by row index and short column name.
    pub fn cell(&self, index: &RowIndex, column: &str) -> Option<&str> {
        self.rows
            .get(index)
            .and_then(|row| row.get(&self.column_name(column)))
            .map(String::as_str)
    }

    /// Iterates rows in walk order.
    pub fn iter(&self) -> impl Iterator<Item = (&RowIndex, &Row)> {
        self.rows.iter()
    }

    /// Returns a partial table containing only the requested rows.
    pub fn get_rows(&self, indexes: &[RowIndex]) -> Self {
        self.with_rows(
            self.rows
                .iter()
                .filter(|(index, _)| indexes.contains(index))
                .map(|(index, row)| (index.clone(), row.clone()))
                .collect(),
        )
    }

    /// Returns a partial table containing only the requested columns.
    pub fn get_columns(&self, names: &[&str]) -> Self {
        let names: Vec<String> = names.iter().map(|n| self.column_name(n)).collect();
        self.with_rows(
            self.rows
                .iter()
                .map(|(index, row)| {
                    let row = row
                        .iter()
                        .filter(|(column, _)| names.contains(column))
                        .map(|(column, value)| (column.clone(), value.clone()))
                        .collect();
                    (index.clone(), row)
                })
                .collect(),
        )
    }

    /// Returns the rows whose column holds one of the requested values.
    ///
    /// Rows without the column are excluded.
    pub fn filter_by_column(&self, name: &str, values: &[&str]) -> Self {
        let name = self.column_name(name);
        self.with_rows(
            self.rows
                .iter()
                .filter(|(_, row)| {
                    row.get(&name)
                        .is_some_and(|value| values.contains(&value.as_str()))
                })
                .map(|(index, row)| (index.clone(), row.clone()))
                .collect(),
        )
    }

    /// Returns the table sorted by the numeric value of a column.
    ///
    /// Rows with a missing or non-numeric value keep their relative order
    /// after all numeric rows.
    pub fn sort_by_column(&self, name: &str) -> Self {
        let name = self.column_name(name);
        let mut rows = self.rows.clone();
        rows.sort_by_cached_key(|_, row| {
            match row.get(&name).and_then(|v| v.trim().parse::<i64>().ok()) {
                Some(value) => (0u8, value),
                None => (1u8, 0),
            }
        });
        self.with_rows(rows)
    }
}

impl<'a> IntoIterator for &'a MibTable {
    type Item = (&'a RowIndex, &'a Row);
    type IntoIter = indexmap::map::Iter<'a, RowIndex, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn idx(i: u32) -> RowIndex {
        RowIndex::single(i)
    }

    fn sample() -> MibTable {
        let mut table = MibTable::new("entPhysicalTable");
        for (i, class, contained, descr) in [
            (1, "'chassis'", "0", "Chassis"),
            (2, "'module'", "1", "Line card 1"),
            (3, "'port'", "2", "Port 1/1"),
            (4, "'powerSupply'", "1", "PSU 1"),
        ] {
            table.insert(idx(i), "entPhysicalClass", class);
            table.insert(idx(i), "entPhysicalContainedIn", contained);
            table.insert(idx(i), "entPhysicalDescr", descr);
        }
        table
    }

    #[test]
    fn test_prefix() {
        assert_eq!(MibTable::new("entPhysicalTable").prefix(), "entPhysical");
        assert_eq!(MibTable::new("ifTable").column_name("Descr"), "ifDescr");
        assert_eq!(MibTable::new("custom").prefix(), "custom");
    }

    #[test]
    fn test_insert_and_cell() {
        let table = sample();
        assert_eq!(table.len(), 4);
        assert_eq!(table.cell(&idx(3), "Descr"), Some("Port 1/1"));
        assert_eq!(table.cell(&idx(3), "Alias"), None);
        assert_eq!(table.cell(&idx(9), "Descr"), None);
    }

    #[test]
    fn test_get_rows_preserves_order() {
        let table = sample().get_rows(&[idx(4), idx(2)]);
        let indexes: Vec<u32> = table.iter().map(|(i, _)| i.first()).collect();
        assert_eq!(indexes, vec![2, 4]);
        assert_eq!(table.name(), "entPhysicalTable");
    }

    #[test]
    fn test_get_columns() {
        let table = sample().get_columns(&["Class"]);
        let row = table.get(&idx(1)).unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("entPhysicalClass").map(String::as_str), Some("'chassis'"));
    }

    #[test]
    fn test_filter_by_column_multiple_values() {
        let table = sample().filter_by_column("Class", &["'port'", "'powerSupply'"]);
        let indexes: Vec<u32> = table.iter().map(|(i, _)| i.first()).collect();
        assert_eq!(indexes, vec![3, 4]);
    }

    #[test]
    fn test_filter_by_missing_column_excludes_row() {
        let mut table = sample();
        table.insert(idx(5), "entPhysicalDescr", "no class");
        let filtered = table.filter_by_column("Class", &["'port'"]);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_sort_by_column() {
        let mut table = MibTable::new("ifTable");
        table.insert(idx(1), "ifMtu", "9100");
        table.insert(idx(2), "ifMtu", "n/a");
        table.insert(idx(3), "ifMtu", "1500");
        table.insert(idx(4), "ifMtu", "576");

        let sorted = table.sort_by_column("Mtu");
        let indexes: Vec<u32> = sorted.iter().map(|(i, _)| i.first()).collect();
        assert_eq!(indexes, vec![4, 3, 1, 2]);
    }
}
