//! Value types for SNMP physical-inventory discovery.
//!
//! This crate provides type-safe representations of the ENTITY-MIB and
//! IF-MIB primitives used by the autoload library:
//!
//! - [`EntityClass`]: ENTITY-MIB `PhysicalClass` values
//! - [`RowIndex`]: OID suffix identifying a row of a walked table
//! - [`PhysicalIndex`] / [`IfIndex`]: integer keys of the two tables

mod class;
mod index;

pub use class::EntityClass;
pub use index::RowIndex;

/// Index of a row in `entPhysicalTable` (`entPhysicalIndex`).
pub type PhysicalIndex = u32;

/// Index of a row in `ifTable` (`ifIndex`).
pub type IfIndex = u32;

/// Common error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid physical entity class: {0}")]
    InvalidEntityClass(String),

    #[error("invalid table row index: {0}")]
    InvalidRowIndex(String),
}
