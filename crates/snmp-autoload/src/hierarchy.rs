//! Parent to children index over the meaningful hierarchy levels.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use snmp_entity_types::{EntityClass, PhysicalIndex};
use tracing::{debug, instrument};

use crate::error::AutoloadResult;
use crate::resolver::AncestorResolver;

/// Map from a physical index to the indexes of its hierarchy children.
///
/// Edges join resolved ancestors, so a chassis may own a power supply
/// directly even when a slot container sits between them in
/// `entPhysicalContainedIn`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hierarchy(BTreeMap<PhysicalIndex, BTreeSet<PhysicalIndex>>);

impl Hierarchy {
    /// Creates an empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `child` under `parent`. Returns false if already present.
    pub fn insert(&mut self, parent: PhysicalIndex, child: PhysicalIndex) -> bool {
        self.0.entry(parent).or_default().insert(child)
    }

    /// Returns the children of `parent`.
    pub fn children(&self, parent: PhysicalIndex) -> Option<&BTreeSet<PhysicalIndex>> {
        self.0.get(&parent)
    }

    /// Iterates `(parent, children)` pairs in ascending parent order.
    pub fn iter(&self) -> impl Iterator<Item = (&PhysicalIndex, &BTreeSet<PhysicalIndex>)> {
        self.0.iter()
    }

    /// Returns the number of parents.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no edge was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of parent to child edges.
    pub fn edge_count(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }
}

impl FromIterator<(PhysicalIndex, PhysicalIndex)> for Hierarchy {
    fn from_iter<I: IntoIterator<Item = (PhysicalIndex, PhysicalIndex)>>(iter: I) -> Self {
        let mut hierarchy = Hierarchy::new();
        for (parent, child) in iter {
            hierarchy.insert(parent, child);
        }
        hierarchy
    }
}

/// Builds the hierarchy from every port and power supply.
///
/// Ports are visited before power supplies, each in walk order. Any
/// topology error aborts the build.
#[instrument(skip(resolver), fields(entities = resolver.inventory().entity_count()))]
pub fn build_hierarchy(resolver: &AncestorResolver<'_>) -> AutoloadResult<Hierarchy> {
    let inventory = resolver.inventory();
    let leaves = inventory
        .filter_by_class(EntityClass::Port)
        .chain(inventory.filter_by_class(EntityClass::PowerSupply));

    let mut hierarchy = Hierarchy::new();
    for leaf in leaves {
        let chain = resolver.ancestor_chain(leaf)?;
        for pair in chain.windows(2).rev() {
            hierarchy.insert(pair[1].index, pair[0].index);
        }
    }

    debug!(
        parents = hierarchy.len(),
        edges = hierarchy.edge_count(),
        "Built entity hierarchy"
    );
    Ok(hierarchy)
}
