//! Physical topology discovery from ENTITY-MIB and IF-MIB.
//!
//! This crate rebuilds two views of a network device from SNMP inventory
//! tables:
//!
//! - [`Hierarchy`]: which chassis, module, port and power-supply rows
//!   contain which, with non-semantic containers collapsed
//! - [`PortMapping`]: which `ifIndex` each physical port corresponds to
//!
//! # Architecture
//!
//! 1. An [`SnmpWalker`] supplies whole tables; transport is the caller's
//! 2. [`EntityTableAdapter`] walks each table once and decodes an
//!    immutable [`InventorySnapshot`]
//! 3. [`AncestorResolver`] climbs `entPhysicalContainedIn` links using the
//!    parent-class [`rules`]
//! 4. [`build_hierarchy`] and [`build_port_mapping`] are pure functions of
//!    the snapshot
//!
//! # Example
//!
//! ```ignore
//! use snmp_autoload::{Autoload, AutoloadConfig};
//!
//! async fn run(walker: &impl snmp_autoload::SnmpWalker) -> snmp_autoload::AutoloadResult<()> {
//!     let config = AutoloadConfig::load_or_default("/etc/autoload.toml")?;
//!     config.validate()?;
//!
//!     let autoload = Autoload::open(walker, &config.discovery).await?;
//!     let report = autoload.discover()?;
//!     println!("{}", report.to_json()?);
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod autoload;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod inventory;
pub mod logging;
pub mod mapping;
pub mod mib_table;
pub mod resolver;
pub mod rules;
pub mod tables;
pub mod walker;

// Re-export commonly used items at crate root
pub use adapter::EntityTableAdapter;
pub use autoload::{Autoload, DiscoveryReport};
pub use config::{AutoloadConfig, DiscoveryConfig, LoggingConfig};
pub use error::{AutoloadError, AutoloadResult, SnmpError};
pub use hierarchy::{build_hierarchy, Hierarchy};
pub use inventory::{InterfaceEntry, InventorySnapshot, PhysicalEntity, ROOT_CONTAINER};
pub use logging::init_logging;
pub use mapping::{
    alias_based_mapping, build_port_mapping, descriptor_based_mapping, MappingStrategy,
    PortMapping, SkipReason, SkippedPort,
};
pub use mib_table::{MibTable, Row};
pub use resolver::{AncestorResolver, DEFAULT_MAX_DEPTH};
pub use walker::{SnmpWalker, StaticWalker};

pub use snmp_entity_types::{EntityClass, IfIndex, ParseError, PhysicalIndex, RowIndex};
