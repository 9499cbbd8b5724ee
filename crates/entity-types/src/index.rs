//! Row index of a walked SNMP table.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// OID suffix that identifies one row of an SNMP table.
///
/// Single-index tables (`entPhysicalTable`, `ifTable`) have one
/// sub-identifier; `entAliasMappingTable` is indexed by
/// `entPhysicalIndex.entAliasLogicalIndexOrZero`.
///
/// # Examples
///
/// ```
/// use snmp_entity_types::RowIndex;
///
/// let index: RowIndex = "3.0".parse().unwrap();
/// assert_eq!(index.first(), 3);
/// assert_eq!(index.to_string(), "3.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RowIndex(Vec<u32>);

impl RowIndex {
    /// Creates a single-component index.
    pub fn single(index: u32) -> Self {
        RowIndex(vec![index])
    }

    /// Creates an index from its sub-identifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if `parts` is empty.
    pub fn from_parts(parts: Vec<u32>) -> Result<Self, ParseError> {
        if parts.is_empty() {
            return Err(ParseError::InvalidRowIndex(String::new()));
        }
        Ok(RowIndex(parts))
    }

    /// Returns the first sub-identifier.
    pub fn first(&self) -> u32 {
        self.0[0]
    }

    /// Returns all sub-identifiers.
    pub fn parts(&self) -> &[u32] {
        &self.0
    }

    /// Returns the number of sub-identifiers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false: a row index has at least one sub-identifier.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<u32> for RowIndex {
    fn from(index: u32) -> Self {
        RowIndex::single(index)
    }
}

impl fmt::Display for RowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

impl FromStr for RowIndex {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('.');
        if trimmed.is_empty() {
            return Err(ParseError::InvalidRowIndex(s.to_string()));
        }

        trimmed
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map(RowIndex)
            .map_err(|_| ParseError::InvalidRowIndex(s.to_string()))
    }
}

impl TryFrom<String> for RowIndex {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RowIndex> for String {
    fn from(index: RowIndex) -> Self {
        index.to_string()
    }
}
