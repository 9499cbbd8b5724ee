//! Per-device table cache in front of an [`SnmpWalker`].

use std::collections::HashMap;

use snmp_entity_types::{EntityClass, RowIndex};
use tracing::{debug, error, instrument};

use crate::config::DiscoveryConfig;
use crate::error::AutoloadResult;
use crate::inventory::InventorySnapshot;
use crate::mib_table::MibTable;
use crate::tables::{
    columns, ENTITY_MIB, ENT_ALIAS_MAPPING_TABLE, ENT_PHYSICAL_TABLE, IF_MIB, IF_TABLE,
};
use crate::walker::SnmpWalker;

/// Walks each table at most once per device.
///
/// Create one adapter per discovery run. Failed walks are not cached, and
/// errors are returned as the walker produced them.
pub struct EntityTableAdapter<'w, W: SnmpWalker + ?Sized> {
    walker: &'w W,
    cache: HashMap<String, MibTable>,
}

impl<'w, W: SnmpWalker + ?Sized> EntityTableAdapter<'w, W> {
    /// Creates an adapter with an empty cache.
    pub fn new(walker: &'w W) -> Self {
        Self {
            walker,
            cache: HashMap::new(),
        }
    }

    /// Returns `mib::name`, walking it on first access.
    pub async fn table(&mut self, mib: &str, name: &str) -> AutoloadResult<&MibTable> {
        if !self.cache.contains_key(name) {
            debug!("Reading '{}' table from '{}' ...", name, mib);
            let table = self.walker.walk(mib, name).await.map_err(|e| {
                error!(mib, table = name, error = %e, "Table walk failed");
                e
            })?;
            debug!(rows = table.len(), "Done reading '{}'", name);
            self.cache.insert(name.to_string(), table);
        }

        Ok(&self.cache[name])
    }

    /// Returns true if `name` has been walked.
    pub fn is_cached(&self, name: &str) -> bool {
        self.cache.contains_key(name)
    }

    /// Returns the rows of `table` whose class column parses to `class`.
    ///
    /// Any printed form of the class matches (`port`, `'port'`, `10`,
    /// `port(10)`).
    pub async fn filter_by_class(
        &mut self,
        mib: &str,
        table: &str,
        class: EntityClass,
    ) -> AutoloadResult<MibTable> {
        let table = self.table(mib, table).await?;
        let matching: Vec<RowIndex> = table
            .iter()
            .map(|(index, _)| index)
            .filter(|index| {
                table
                    .cell(index, columns::CLASS)
                    .and_then(|value| value.parse::<EntityClass>().ok())
                    == Some(class)
            })
            .cloned()
            .collect();
        Ok(table.get_rows(&matching))
    }

    /// Walks everything discovery needs and decodes it.
    ///
    /// The alias table is skipped when `config.mapping` never uses it.
    #[instrument(skip(self, config), fields(mapping = ?config.mapping))]
    pub async fn prepare(mut self, config: &DiscoveryConfig) -> AutoloadResult<InventorySnapshot> {
        self.table(ENTITY_MIB, ENT_PHYSICAL_TABLE).await?;
        self.table(IF_MIB, IF_TABLE).await?;
        if config.mapping.uses_alias_table() {
            self.table(ENTITY_MIB, ENT_ALIAS_MAPPING_TABLE).await?;
        }

        InventorySnapshot::from_tables(
            &self.cache[ENT_PHYSICAL_TABLE],
            &self.cache[IF_TABLE],
            self.cache.get(ENT_ALIAS_MAPPING_TABLE),
        )
    }
}
