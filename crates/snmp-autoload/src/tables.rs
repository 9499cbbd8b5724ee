//! MIB module, table and column name constants.
//!
//! Column names are the short form; [`MibTable`](crate::MibTable) adds the
//! table prefix (`entPhysical` + `Class` = `entPhysicalClass`).

/// ENTITY-MIB module name.
pub const ENTITY_MIB: &str = "ENTITY-MIB";

/// IF-MIB module name.
pub const IF_MIB: &str = "IF-MIB";

/// Physical inventory table.
pub const ENT_PHYSICAL_TABLE: &str = "entPhysicalTable";

/// Interface table.
pub const IF_TABLE: &str = "ifTable";

/// Physical entity to logical interface association table.
pub const ENT_ALIAS_MAPPING_TABLE: &str = "entAliasMappingTable";

/// Short column names used by discovery.
pub mod columns {
    /// `entPhysicalClass`.
    pub const CLASS: &str = "Class";

    /// `entPhysicalContainedIn`.
    pub const CONTAINED_IN: &str = "ContainedIn";

    /// `entPhysicalDescr` and `ifDescr`.
    pub const DESCR: &str = "Descr";

    /// `entAliasMappingIdentifier`.
    pub const IDENTIFIER: &str = "Identifier";
}
