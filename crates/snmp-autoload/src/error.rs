//! Error types for autoload operations.
//!
//! Walker failures ([`SnmpError`]) pass through [`AutoloadError::Snmp`]
//! unchanged. Topology errors describe a malformed device inventory and
//! always name the entity where resolution stopped.

use std::io;

use snmp_entity_types::{EntityClass, PhysicalIndex};
use thiserror::Error;

/// Result type alias for autoload operations.
pub type AutoloadResult<T> = Result<T, AutoloadError>;

/// Failures reported by an [`SnmpWalker`](crate::SnmpWalker).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnmpError {
    /// The agent did not answer.
    #[error("SNMP request to {target} timed out after {retries} retries")]
    Timeout {
        /// Agent address.
        target: String,
        /// Retries attempted by the transport.
        retries: u32,
    },

    /// Socket or session failure.
    #[error("SNMP transport error: {0}")]
    Transport(String),

    /// The agent answered with a non-zero error-status.
    #[error("SNMP error-status {status} at varbind {index}")]
    ErrorStatus {
        /// Error-status name (e.g. `genErr`).
        status: String,
        /// Error-index of the failing varbind.
        index: u32,
    },

    /// The MIB module or table is not known to the walker.
    #[error("unknown MIB table {mib}::{table}")]
    NoSuchTable {
        /// MIB module name.
        mib: String,
        /// Table name.
        table: String,
    },
}

/// Errors that can occur during discovery.
#[derive(Debug, Error)]
pub enum AutoloadError {
    /// Table fetch failed in the SNMP collaborator.
    #[error(transparent)]
    Snmp(#[from] SnmpError),

    /// A walked row is missing a required column or holds an invalid value.
    #[error("invalid row {index} in {table}: column {column}: {message}")]
    InvalidRow {
        /// Table name.
        table: String,
        /// Row index as printed in the OID suffix.
        index: String,
        /// Offending column.
        column: String,
        /// Error message.
        message: String,
    },

    /// `containedIn` references an index absent from the entity table.
    #[error(
        "topology error: entity {index} ({class}) is contained in {contained_in}, which does not exist"
    )]
    DanglingReference {
        /// Entity holding the reference.
        index: PhysicalIndex,
        /// Its class.
        class: EntityClass,
        /// The missing index.
        contained_in: PhysicalIndex,
    },

    /// Ancestor resolution revisited an entity.
    #[error("topology error: containment cycle through entity {revisited} while resolving {index} ({class})")]
    ContainmentCycle {
        /// Entity being resolved.
        index: PhysicalIndex,
        /// Its class.
        class: EntityClass,
        /// First entity seen twice.
        revisited: PhysicalIndex,
    },

    /// Ancestor resolution did not reach a chassis within the hop bound.
    #[error("topology error: no chassis within {max_depth} hops of entity {index} ({class})")]
    DepthExceeded {
        /// Entity being resolved.
        index: PhysicalIndex,
        /// Its class.
        class: EntityClass,
        /// Configured hop bound.
        max_depth: usize,
    },

    /// Configuration could not be parsed or failed validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serializing a discovery report failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The global tracing subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl AutoloadError {
    /// Creates an invalid row error.
    pub fn invalid_row(
        table: impl Into<String>,
        index: impl ToString,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidRow {
            table: table.into(),
            index: index.to_string(),
            column: column.into(),
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns true if this error reports a malformed containment tree.
    pub fn is_topology_error(&self) -> bool {
        matches!(
            self,
            AutoloadError::DanglingReference { .. }
                | AutoloadError::ContainmentCycle { .. }
                | AutoloadError::DepthExceeded { .. }
        )
    }

    /// Returns the entity index a topology error refers to.
    pub fn entity_index(&self) -> Option<PhysicalIndex> {
        match self {
            AutoloadError::DanglingReference { index, .. }
            | AutoloadError::ContainmentCycle { index, .. }
            | AutoloadError::DepthExceeded { index, .. } => Some(*index),
            _ => None,
        }
    }
}
