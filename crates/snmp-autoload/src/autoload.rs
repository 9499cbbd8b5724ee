//! Discovery entry point.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::adapter::EntityTableAdapter;
use crate::config::DiscoveryConfig;
use crate::error::AutoloadResult;
use crate::hierarchy::{build_hierarchy, Hierarchy};
use crate::inventory::InventorySnapshot;
use crate::mapping::{build_port_mapping, PortMapping};
use crate::resolver::AncestorResolver;
use crate::walker::SnmpWalker;

/// Hierarchy and port mapping of one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryReport {
    /// Parent index to child indexes.
    pub hierarchy: Hierarchy,
    /// Port index to `ifIndex`.
    pub mapping: PortMapping,
}

impl DiscoveryReport {
    /// Serializes the report as pretty-printed JSON.
    pub fn to_json(&self) -> AutoloadResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Topology discovery over one device's inventory snapshot.
///
/// # Example
///
/// ```ignore
/// use snmp_autoload::{Autoload, DiscoveryConfig};
///
/// let autoload = Autoload::open(&walker, &DiscoveryConfig::default()).await?;
/// let hierarchy = autoload.hierarchy()?;
/// let mapping = autoload.mapping();
/// ```
#[derive(Debug, Clone)]
pub struct Autoload {
    inventory: InventorySnapshot,
    config: DiscoveryConfig,
}

impl Autoload {
    /// Walks the device's tables once and keeps the decoded snapshot.
    #[instrument(skip(walker, config))]
    pub async fn open<W: SnmpWalker + ?Sized>(
        walker: &W,
        config: &DiscoveryConfig,
    ) -> AutoloadResult<Self> {
        let inventory = EntityTableAdapter::new(walker).prepare(config).await?;
        info!(
            entities = inventory.entity_count(),
            "Loaded physical inventory"
        );
        Ok(Self::from_snapshot(inventory, config.clone()))
    }

    /// Wraps an existing snapshot.
    pub fn from_snapshot(inventory: InventorySnapshot, config: DiscoveryConfig) -> Self {
        Self { inventory, config }
    }

    /// Returns the snapshot discovery reads from.
    pub fn inventory(&self) -> &InventorySnapshot {
        &self.inventory
    }

    /// Returns a resolver bound to this snapshot and the configured depth.
    pub fn resolver(&self) -> AncestorResolver<'_> {
        AncestorResolver::new(&self.inventory).with_max_depth(self.config.max_ancestor_depth)
    }

    /// Builds the parent to children map.
    pub fn hierarchy(&self) -> AutoloadResult<Hierarchy> {
        build_hierarchy(&self.resolver())
    }

    /// Builds the port to interface map.
    pub fn mapping(&self) -> PortMapping {
        build_port_mapping(&self.inventory, self.config.mapping)
    }

    /// Builds both results.
    pub fn discover(&self) -> AutoloadResult<DiscoveryReport> {
        let report = DiscoveryReport {
            hierarchy: self.hierarchy()?,
            mapping: self.mapping(),
        };
        info!(
            parents = report.hierarchy.len(),
            ports = report.mapping.len(),
            skipped = report.mapping.skipped.len(),
            "Discovery complete"
        );
        Ok(report)
    }
}
