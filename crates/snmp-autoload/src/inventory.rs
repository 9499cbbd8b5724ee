//! Typed, immutable view of the walked inventory tables.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use snmp_entity_types::{EntityClass, IfIndex, PhysicalIndex, RowIndex};
use tracing::{debug, warn};

use crate::error::{AutoloadError, AutoloadResult};
use crate::mib_table::MibTable;
use crate::tables::columns;

/// `entPhysicalContainedIn` value of an entity with no container.
pub const ROOT_CONTAINER: PhysicalIndex = 0;

/// One row of `entPhysicalTable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalEntity {
    /// `entPhysicalIndex`.
    pub index: PhysicalIndex,
    /// `entPhysicalClass`.
    pub class: EntityClass,
    /// `entPhysicalContainedIn`; [`ROOT_CONTAINER`] for the top level.
    pub contained_in: PhysicalIndex,
    /// `entPhysicalDescr`.
    pub description: String,
}

impl PhysicalEntity {
    /// Creates an entity.
    pub fn new(
        index: PhysicalIndex,
        class: EntityClass,
        contained_in: PhysicalIndex,
        description: impl Into<String>,
    ) -> Self {
        Self {
            index,
            class,
            contained_in,
            description: description.into(),
        }
    }
}

/// One row of `ifTable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceEntry {
    /// `ifIndex`.
    pub index: IfIndex,
    /// `ifDescr`.
    pub description: String,
}

impl InterfaceEntry {
    /// Creates an interface entry.
    pub fn new(index: IfIndex, description: impl Into<String>) -> Self {
        Self {
            index,
            description: description.into(),
        }
    }
}

/// Read-only snapshot of one device's inventory.
///
/// All maps keep the order rows were walked in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    entities: IndexMap<PhysicalIndex, PhysicalEntity>,
    interfaces: IndexMap<IfIndex, InterfaceEntry>,
    aliases: IndexMap<PhysicalIndex, String>,
}

impl InventorySnapshot {
    /// Creates a snapshot from typed rows.
    ///
    /// `aliases` pairs a physical index with its `entAliasMappingIdentifier`.
    /// The first identifier given for an index wins.
    pub fn new(
        entities: impl IntoIterator<Item = PhysicalEntity>,
        interfaces: impl IntoIterator<Item = InterfaceEntry>,
        aliases: impl IntoIterator<Item = (PhysicalIndex, String)>,
    ) -> Self {
        let mut alias_map = IndexMap::new();
        for (index, identifier) in aliases {
            alias_map.entry(index).or_insert(identifier);
        }
        Self {
            entities: entities.into_iter().map(|e| (e.index, e)).collect(),
            interfaces: interfaces.into_iter().map(|i| (i.index, i)).collect(),
            aliases: alias_map,
        }
    }

    /// Decodes walked tables.
    ///
    /// `aliases` is `None` when the alias table was not walked.
    pub fn from_tables(
        entities: &MibTable,
        interfaces: &MibTable,
        aliases: Option<&MibTable>,
    ) -> AutoloadResult<Self> {
        let entities = decode_entities(entities)?;
        let interfaces = decode_interfaces(interfaces);
        let aliases = aliases.map(decode_aliases).unwrap_or_default();

        debug!(
            entities = entities.len(),
            interfaces = interfaces.len(),
            aliases = aliases.len(),
            "Decoded inventory snapshot"
        );

        Ok(Self::new(entities, interfaces, aliases))
    }

    /// Returns an entity by index.
    pub fn entity(&self, index: PhysicalIndex) -> Option<&PhysicalEntity> {
        self.entities.get(&index)
    }

    /// Iterates all entities in walk order.
    pub fn entities(&self) -> impl Iterator<Item = &PhysicalEntity> {
        self.entities.values()
    }

    /// Returns the entities of one class in walk order.
    pub fn filter_by_class(&self, class: EntityClass) -> impl Iterator<Item = &PhysicalEntity> {
        self.entities.values().filter(move |e| e.class == class)
    }

    /// Iterates all interfaces in walk order.
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceEntry> {
        self.interfaces.values()
    }

    /// Returns the alias identifier recorded for a physical index.
    pub fn alias(&self, index: PhysicalIndex) -> Option<&str> {
        self.aliases.get(&index).map(String::as_str)
    }

    /// Returns true if any alias mapping was walked.
    pub fn has_aliases(&self) -> bool {
        !self.aliases.is_empty()
    }

    /// Returns the number of physical entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

fn decode_entities(table: &MibTable) -> AutoloadResult<Vec<PhysicalEntity>> {
    let mut entities = Vec::with_capacity(table.len());

    for (row_index, _) in table {
        let required = |column: &str| {
            table.cell(row_index, column).ok_or_else(|| {
                AutoloadError::invalid_row(
                    table.name(),
                    row_index,
                    table.column_name(column),
                    "missing",
                )
            })
        };

        let class = decode_class(table, row_index);

        let contained_raw = required(columns::CONTAINED_IN)?;
        let contained_in = contained_raw.trim().parse::<PhysicalIndex>().map_err(|_| {
            AutoloadError::invalid_row(
                table.name(),
                row_index,
                table.column_name(columns::CONTAINED_IN),
                format!("not an index: {:?}", contained_raw),
            )
        })?;

        let description = table
            .cell(row_index, columns::DESCR)
            .unwrap_or_default()
            .to_string();

        entities.push(PhysicalEntity::new(
            row_index.first(),
            class,
            contained_in,
            description,
        ));
    }

    Ok(entities)
}

/// Missing or unrecognised classes decode as [`EntityClass::Unknown`].
fn decode_class(table: &MibTable, row_index: &RowIndex) -> EntityClass {
    let raw = table.cell(row_index, columns::CLASS);
    match raw.map(str::parse::<EntityClass>) {
        Some(Ok(class)) => class,
        _ => {
            warn!(
                table = table.name(),
                index = %row_index,
                value = ?raw,
                "Unrecognised physical class, treating as unknown"
            );
            EntityClass::Unknown
        }
    }
}

fn decode_interfaces(table: &MibTable) -> Vec<InterfaceEntry> {
    table
        .iter()
        .map(|(row_index, _)| {
            InterfaceEntry::new(
                row_index.first(),
                table.cell(row_index, columns::DESCR).unwrap_or_default(),
            )
        })
        .collect()
}

fn decode_aliases(table: &MibTable) -> Vec<(PhysicalIndex, String)> {
    table
        .iter()
        .filter_map(|(row_index, _)| {
            table
                .cell(row_index, columns::IDENTIFIER)
                .map(|identifier| (row_index.first(), identifier.to_string()))
        })
        .collect()
}
