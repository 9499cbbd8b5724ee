//! Integration tests for autoload discovery
//!
//! Drives the public API through a `StaticWalker` loaded with tables shaped
//! the way an SNMP agent prints them:
//! - Hierarchy reconstruction across slot containers
//! - Alias-table and description based port mapping
//! - Topology and transport failures

use pretty_assertions::assert_eq;
use snmp_autoload::{
    tables, AncestorResolver, Autoload, AutoloadError, DiscoveryConfig, EntityClass, Hierarchy,
    MappingStrategy, MibTable, RowIndex, SnmpError, StaticWalker, ROOT_CONTAINER,
};

/// Test fixture: builds the three walked tables row by row
struct DeviceFixture {
    entities: MibTable,
    interfaces: MibTable,
    aliases: MibTable,
}

impl DeviceFixture {
    fn new() -> Self {
        Self {
            entities: MibTable::new(tables::ENT_PHYSICAL_TABLE),
            interfaces: MibTable::new(tables::IF_TABLE),
            aliases: MibTable::new(tables::ENT_ALIAS_MAPPING_TABLE),
        }
    }

    fn entity(mut self, index: u32, class: &str, contained_in: u32, descr: &str) -> Self {
        let row = RowIndex::single(index);
        self.entities
            .insert(row.clone(), "entPhysicalClass", format!("'{}'", class));
        self.entities
            .insert(row.clone(), "entPhysicalContainedIn", contained_in.to_string());
        self.entities.insert(row, "entPhysicalDescr", descr);
        self
    }

    fn interface(mut self, index: u32, descr: &str) -> Self {
        self.interfaces
            .insert(RowIndex::single(index), "ifDescr", descr);
        self
    }

    fn alias(mut self, port: u32, if_index: u32) -> Self {
        let row: RowIndex = format!("{}.0", port).parse().unwrap();
        self.aliases.insert(
            row,
            "entAliasMappingIdentifier",
            format!("1.3.6.1.2.1.2.2.1.1.{}", if_index),
        );
        self
    }

    fn walker(self) -> StaticWalker {
        StaticWalker::new()
            .with_table(self.entities)
            .with_table(self.interfaces)
            .with_table(self.aliases)
    }
}

/// A two-slot chassis with power supply bays, a fan tray and an uplink
/// port on the chassis itself.
fn modular_switch() -> DeviceFixture {
    DeviceFixture::new()
        .entity(1, "chassis", ROOT_CONTAINER, "Modular switch chassis")
        .entity(2, "container", 1, "Slot 1")
        .entity(3, "container", 1, "Slot 2")
        .entity(4, "container", 1, "PSU bay 1")
        .entity(5, "container", 1, "PSU bay 2")
        .entity(6, "fan", 1, "Fan tray")
        .entity(10, "module", 2, "Line card 1")
        .entity(20, "module", 3, "Line card 2")
        .entity(11, "port", 10, "Gigabit port 1/1")
        .entity(12, "port", 10, "Gigabit port 1/2")
        .entity(21, "port", 20, "Gigabit port 2/1")
        .entity(30, "powerSupply", 4, "PSU 1")
        .entity(31, "powerSupply", 5, "PSU 2")
        .entity(40, "port", 1, "Management port 0/0")
        .interface(1, "GigabitEthernet1/1")
        .interface(2, "GigabitEthernet1/2")
        .interface(3, "GigabitEthernet2/1")
        .interface(4, "mgmt0/0")
}

fn descriptor_config() -> DiscoveryConfig {
    DiscoveryConfig {
        mapping: MappingStrategy::Descriptor,
        ..DiscoveryConfig::default()
    }
}

#[tokio::test]
async fn test_minimal_hierarchy() {
    let walker = DeviceFixture::new()
        .entity(1, "chassis", 0, "Chassis")
        .entity(2, "module", 1, "Module")
        .entity(3, "port", 2, "Port")
        .walker();

    let autoload = Autoload::open(&walker, &DiscoveryConfig::default())
        .await
        .expect("Failed to open inventory");

    let expected: Hierarchy = [(1, 2), (2, 3)].into_iter().collect();
    assert_eq!(autoload.hierarchy().unwrap(), expected);
}

#[tokio::test]
async fn test_modular_switch_hierarchy() {
    let walker = modular_switch().walker();
    let autoload = Autoload::open(&walker, &DiscoveryConfig::default())
        .await
        .unwrap();

    let expected: Hierarchy = [
        (1, 10),
        (1, 20),
        (1, 30),
        (1, 31),
        (1, 40),
        (10, 11),
        (10, 12),
        (20, 21),
    ]
    .into_iter()
    .collect();
    assert_eq!(autoload.hierarchy().unwrap(), expected);

    // Same snapshot, same answer.
    assert_eq!(autoload.hierarchy().unwrap(), expected);
}

#[tokio::test]
async fn test_every_leaf_chain_ends_at_chassis() {
    let walker = modular_switch().walker();
    let autoload = Autoload::open(&walker, &DiscoveryConfig::default())
        .await
        .unwrap();
    let inventory = autoload.inventory();
    let resolver = AncestorResolver::new(inventory);

    for leaf in inventory.entities().filter(|e| e.class.is_leaf()) {
        let chain = resolver.ancestor_chain(leaf).unwrap();
        assert!(chain.len() >= 2, "chain too short for {}", leaf.index);
        assert_eq!(chain[0].index, leaf.index);
        assert_eq!(chain.last().unwrap().class, EntityClass::Chassis);
    }
}

#[tokio::test]
async fn test_alias_mapping() {
    let walker = DeviceFixture::new()
        .entity(1, "chassis", 0, "Chassis")
        .entity(3, "port", 1, "Port 1/2")
        .alias(3, 48)
        .walker();

    let autoload = Autoload::open(&walker, &DiscoveryConfig::default())
        .await
        .unwrap();
    let mapping = autoload.mapping();

    assert_eq!(mapping.strategy, MappingStrategy::Alias);
    assert_eq!(mapping.ports.into_iter().collect::<Vec<_>>(), vec![(3, 48)]);
}

#[tokio::test]
async fn test_descriptor_mapping_fallback() {
    let walker = DeviceFixture::new()
        .entity(1, "chassis", 0, "Chassis")
        .entity(3, "port", 1, "Ethernet port 1/2")
        .interface(7, "Ethernet1/1")
        .interface(10, "Ethernet1/2")
        .walker();

    let autoload = Autoload::open(&walker, &DiscoveryConfig::default())
        .await
        .unwrap();
    let mapping = autoload.mapping();

    assert_eq!(mapping.strategy, MappingStrategy::Descriptor);
    assert_eq!(mapping.ports.into_iter().collect::<Vec<_>>(), vec![(3, 10)]);
}

#[tokio::test]
async fn test_mapping_preserves_port_order_and_skips_bad_descriptions() {
    let walker = modular_switch()
        .entity(50, "port", 20, "Breakout 2/2/1")
        .walker();
    let autoload = Autoload::open(&walker, &descriptor_config()).await.unwrap();
    let mapping = autoload.mapping();

    assert_eq!(
        mapping.ports.iter().map(|(p, i)| (*p, *i)).collect::<Vec<_>>(),
        vec![(11, 1), (12, 2), (21, 3), (40, 4)]
    );
    assert_eq!(mapping.skipped.len(), 1);
    assert_eq!(mapping.skipped[0].index, 50);
}

#[tokio::test]
async fn test_strategies_agree_on_same_device() {
    let fixture = modular_switch()
        .alias(11, 1)
        .alias(12, 2)
        .alias(21, 3)
        .alias(40, 4);
    let walker = fixture.walker();

    let by_alias = Autoload::open(&walker, &DiscoveryConfig::default())
        .await
        .unwrap()
        .mapping();
    let by_descr = Autoload::open(&walker, &descriptor_config())
        .await
        .unwrap()
        .mapping();

    assert_eq!(by_alias.strategy, MappingStrategy::Alias);
    assert_eq!(by_descr.strategy, MappingStrategy::Descriptor);
    assert_eq!(by_alias.ports, by_descr.ports);
}

#[tokio::test]
async fn test_each_table_walked_once_per_open() {
    let walker = modular_switch().walker();
    let autoload = Autoload::open(&walker, &DiscoveryConfig::default())
        .await
        .unwrap();

    autoload.discover().unwrap();
    autoload.discover().unwrap();

    assert_eq!(walker.walk_count(tables::ENT_PHYSICAL_TABLE), 1);
    assert_eq!(walker.walk_count(tables::IF_TABLE), 1);
    assert_eq!(walker.walk_count(tables::ENT_ALIAS_MAPPING_TABLE), 1);
}

#[tokio::test]
async fn test_dangling_reference_is_topology_error() {
    let walker = DeviceFixture::new()
        .entity(1, "chassis", 0, "Chassis")
        .entity(3, "port", 99, "Port 1/1")
        .walker();

    let autoload = Autoload::open(&walker, &DiscoveryConfig::default())
        .await
        .unwrap();
    let err = autoload.hierarchy().unwrap_err();

    assert!(err.is_topology_error());
    assert_eq!(err.entity_index(), Some(3));
    assert!(err.to_string().contains("99"));
}

#[tokio::test]
async fn test_containment_cycle_is_topology_error() {
    let walker = DeviceFixture::new()
        .entity(1, "chassis", 0, "Chassis")
        .entity(4, "container", 5, "Slot A")
        .entity(5, "container", 4, "Slot B")
        .entity(6, "powerSupply", 4, "PSU")
        .walker();

    let autoload = Autoload::open(&walker, &DiscoveryConfig::default())
        .await
        .unwrap();
    let err = autoload.discover().unwrap_err();
    assert!(matches!(err, AutoloadError::ContainmentCycle { index: 6, .. }));
}

#[tokio::test]
async fn test_walk_failure_propagates() {
    let walker = modular_switch().walker().with_failure(
        tables::IF_TABLE,
        SnmpError::Timeout {
            target: "192.0.2.1:161".to_string(),
            retries: 3,
        },
    );

    let err = Autoload::open(&walker, &DiscoveryConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AutoloadError::Snmp(SnmpError::Timeout { retries: 3, .. })
    ));
}

#[tokio::test]
async fn test_alias_walk_failure_propagates_unless_descriptor_only() {
    let failure = SnmpError::Transport("connection reset".to_string());
    let walker = modular_switch()
        .walker()
        .with_failure(tables::ENT_ALIAS_MAPPING_TABLE, failure);

    assert!(Autoload::open(&walker, &DiscoveryConfig::default())
        .await
        .is_err());
    assert!(Autoload::open(&walker, &descriptor_config()).await.is_ok());
}

#[tokio::test]
async fn test_independent_runs_do_not_share_tables() {
    let first = modular_switch().walker();
    let second = DeviceFixture::new()
        .entity(1, "chassis", 0, "Chassis")
        .entity(2, "powerSupply", 1, "PSU")
        .walker();

    let a = Autoload::open(&first, &DiscoveryConfig::default()).await.unwrap();
    let b = Autoload::open(&second, &DiscoveryConfig::default()).await.unwrap();

    assert_eq!(a.inventory().entity_count(), 14);
    assert_eq!(b.inventory().entity_count(), 2);
    assert_eq!(b.hierarchy().unwrap().children(1).map(|c| c.len()), Some(1));
}

#[tokio::test]
async fn test_unrecognised_class_does_not_abort_discovery() {
    let walker = DeviceFixture::new()
        .entity(1, "chassis", 0, "Chassis")
        .entity(2, "module", 1, "Line card 1")
        .entity(3, "port", 2, "Ethernet port 1/1")
        .entity(4, "battery(14)", 1, "Backup battery")
        .entity(5, "linecard", 1, "Vendor specific")
        .interface(1, "Ethernet1/1")
        .walker();

    let autoload = Autoload::open(&walker, &DiscoveryConfig::default())
        .await
        .expect("exotic classes must not abort discovery");
    let report = autoload.discover().unwrap();

    let expected: Hierarchy = [(1, 2), (2, 3)].into_iter().collect();
    assert_eq!(report.hierarchy, expected);
    assert_eq!(report.mapping.get(3), Some(1));
    assert_eq!(
        autoload.inventory().entity(4).map(|e| e.class),
        Some(EntityClass::Battery)
    );
    assert_eq!(
        autoload.inventory().entity(5).map(|e| e.class),
        Some(EntityClass::Unknown)
    );
}

#[tokio::test]
async fn test_non_numeric_contained_in_rejected_on_open() {
    let mut fixture = DeviceFixture::new().entity(1, "chassis", 0, "Chassis");
    fixture
        .entities
        .insert(RowIndex::single(2), "entPhysicalClass", "'port'");
    fixture
        .entities
        .insert(RowIndex::single(2), "entPhysicalContainedIn", "slot-1");

    let err = Autoload::open(&fixture.walker(), &DiscoveryConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AutoloadError::InvalidRow { .. }));
}
