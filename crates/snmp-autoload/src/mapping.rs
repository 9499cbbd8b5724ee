//! Physical port to `ifIndex` association.
//!
//! Two sources, in order of preference:
//!
//! 1. `entAliasMappingTable`: the identifier is an `ifIndex` instance OID,
//!    so the last sub-identifier is the interface index.
//! 2. Descriptions: a port described as `... 3/7` matches the first
//!    interface whose `ifDescr` ends with `3/7`.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use snmp_entity_types::{EntityClass, IfIndex, PhysicalIndex};
use tracing::{debug, instrument, warn};

use crate::inventory::{InventorySnapshot, PhysicalEntity};

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

/// How ports are matched to interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingStrategy {
    /// Alias table when it has rows, descriptions otherwise.
    #[default]
    Auto,
    /// Alias table only.
    Alias,
    /// Descriptions only; the alias table is never walked.
    Descriptor,
}

impl MappingStrategy {
    /// Returns true if discovery needs `entAliasMappingTable`.
    pub fn uses_alias_table(&self) -> bool {
        !matches!(self, MappingStrategy::Descriptor)
    }
}

/// Why a port was left out of the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum SkipReason {
    /// The description did not hold exactly two numbers.
    DescriptorFormat {
        /// Numbers found.
        found: usize,
    },
    /// The alias identifier does not end in a number.
    AliasIdentifier,
}

/// A port that could not be mapped because of malformed data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPort {
    /// Port index.
    pub index: PhysicalIndex,
    /// The offending description or alias identifier.
    pub value: String,
    /// What was wrong with it.
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Result of mapping ports to interfaces.
///
/// Ports with no matching interface are simply absent from `ports`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    /// Source actually used; never `Auto`.
    pub strategy: MappingStrategy,
    /// Port index to `ifIndex`, in port walk order.
    pub ports: IndexMap<PhysicalIndex, IfIndex>,
    /// Ports dropped for malformed data.
    pub skipped: Vec<SkippedPort>,
}

impl PortMapping {
    fn new(strategy: MappingStrategy) -> Self {
        Self {
            strategy,
            ports: IndexMap::new(),
            skipped: Vec::new(),
        }
    }

    /// Returns the interface mapped to a port.
    pub fn get(&self, port: PhysicalIndex) -> Option<IfIndex> {
        self.ports.get(&port).copied()
    }

    /// Returns the number of mapped ports.
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Returns true if no port was mapped.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    fn skip(&mut self, port: &PhysicalEntity, value: &str, reason: SkipReason) {
        warn!(
            port = port.index,
            value = %value,
            reason = ?reason,
            "Skipping port with malformed mapping data"
        );
        self.skipped.push(SkippedPort {
            index: port.index,
            value: value.to_string(),
            reason,
        });
    }
}

/// Maps every port to its interface using `strategy`.
#[instrument(skip(inventory), fields(ports = inventory.filter_by_class(EntityClass::Port).count()))]
pub fn build_port_mapping(inventory: &InventorySnapshot, strategy: MappingStrategy) -> PortMapping {
    let mapping = match strategy {
        MappingStrategy::Auto if inventory.has_aliases() => alias_based_mapping(inventory),
        MappingStrategy::Auto => descriptor_based_mapping(inventory),
        MappingStrategy::Alias => alias_based_mapping(inventory),
        MappingStrategy::Descriptor => descriptor_based_mapping(inventory),
    };

    debug!(
        strategy = ?mapping.strategy,
        mapped = mapping.len(),
        skipped = mapping.skipped.len(),
        "Built port mapping"
    );
    mapping
}

/// Maps ports through `entAliasMappingTable`.
pub fn alias_based_mapping(inventory: &InventorySnapshot) -> PortMapping {
    let mut mapping = PortMapping::new(MappingStrategy::Alias);

    for port in inventory.filter_by_class(EntityClass::Port) {
        let Some(identifier) = inventory.alias(port.index) else {
            debug!(port = port.index, "No alias mapping entry");
            continue;
        };

        match trailing_index(identifier) {
            Some(if_index) => {
                mapping.ports.insert(port.index, if_index);
            }
            None => mapping.skip(port, identifier, SkipReason::AliasIdentifier),
        }
    }

    mapping
}

/// Maps ports by matching `<module>/<port>` against `ifDescr`.
pub fn descriptor_based_mapping(inventory: &InventorySnapshot) -> PortMapping {
    let mut mapping = PortMapping::new(MappingStrategy::Descriptor);

    for port in inventory.filter_by_class(EntityClass::Port) {
        let numbers: Vec<&str> = NUMBER
            .find_iter(&port.description)
            .map(|m| m.as_str())
            .collect();

        let [module, port_number] = numbers.as_slice() else {
            mapping.skip(
                port,
                &port.description,
                SkipReason::DescriptorFormat {
                    found: numbers.len(),
                },
            );
            continue;
        };

        let matcher = SlotPortMatcher::new(module, port_number);
        match inventory
            .interfaces()
            .find(|interface| matcher.matches(&interface.description))
        {
            Some(interface) => {
                mapping.ports.insert(port.index, interface.index);
            }
            None => debug!(
                port = port.index,
                descr = %port.description,
                "No interface matches port description"
            ),
        }
    }

    mapping
}

/// Matches an `ifDescr` ending in `<module>/<port>`, ignoring trailing
/// whitespace. The module number must not be preceded by another digit.
struct SlotPortMatcher {
    suffix: String,
}

impl SlotPortMatcher {
    fn new(module: &str, port: &str) -> Self {
        Self {
            suffix: format!("{}/{}", module, port),
        }
    }

    fn matches(&self, descr: &str) -> bool {
        descr
            .trim_end()
            .strip_suffix(self.suffix.as_str())
            .is_some_and(|head| !head.ends_with(|c: char| c.is_ascii_digit()))
    }
}

/// Parses the last dot-separated component of an OID string.
fn trailing_index(identifier: &str) -> Option<IfIndex> {
    identifier.trim().rsplit('.').next()?.parse().ok()
}
