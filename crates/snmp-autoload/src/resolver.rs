//! Nearest meaningful ancestor of a physical entity.
//!
//! Vendor agents put slot containers and similar rows between the levels
//! the hierarchy cares about. Resolution climbs `containedIn` links past
//! any entity whose class the current subject does not accept as parent;
//! a skipped entity becomes the new subject.

use std::collections::HashSet;

use snmp_entity_types::PhysicalIndex;

use crate::error::{AutoloadError, AutoloadResult};
use crate::inventory::{InventorySnapshot, PhysicalEntity};
use crate::rules;

/// Default bound on `containedIn` hops for a single resolution.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Resolves hierarchy ancestors over an inventory snapshot.
#[derive(Debug, Clone, Copy)]
pub struct AncestorResolver<'a> {
    inventory: &'a InventorySnapshot,
    max_depth: usize,
}

impl<'a> AncestorResolver<'a> {
    /// Creates a resolver with [`DEFAULT_MAX_DEPTH`].
    pub fn new(inventory: &'a InventorySnapshot) -> Self {
        Self {
            inventory,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the hop bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the snapshot being resolved against.
    pub fn inventory(&self) -> &'a InventorySnapshot {
        self.inventory
    }

    /// Returns the nearest ancestor of `entity` whose class is accepted.
    ///
    /// Returns `Ok(None)` for a chassis.
    ///
    /// # Errors
    ///
    /// Topology errors for a dangling `containedIn`, a cycle, or more than
    /// `max_depth` hops.
    pub fn parent_of(&self, entity: &PhysicalEntity) -> AutoloadResult<Option<&'a PhysicalEntity>> {
        if entity.class.is_root() {
            return Ok(None);
        }

        let mut visited: HashSet<PhysicalIndex> = HashSet::from([entity.index]);
        let mut subject = entity;
        let mut hops = 0;

        loop {
            let parent = self.inventory.entity(subject.contained_in).ok_or(
                AutoloadError::DanglingReference {
                    index: subject.index,
                    class: subject.class,
                    contained_in: subject.contained_in,
                },
            )?;

            if !visited.insert(parent.index) {
                return Err(AutoloadError::ContainmentCycle {
                    index: entity.index,
                    class: entity.class,
                    revisited: parent.index,
                });
            }

            hops += 1;
            if hops > self.max_depth {
                return Err(AutoloadError::DepthExceeded {
                    index: entity.index,
                    class: entity.class,
                    max_depth: self.max_depth,
                });
            }

            if rules::accepts(subject.class, parent.class) {
                return Ok(Some(parent));
            }

            subject = parent;
        }
    }

    /// Returns `entity` followed by each resolved ancestor up to and
    /// including its chassis.
    pub fn ancestor_chain(&self, entity: &'a PhysicalEntity) -> AutoloadResult<Vec<&'a PhysicalEntity>> {
        let mut chain = vec![entity];
        let mut visited: HashSet<PhysicalIndex> = HashSet::from([entity.index]);
        let mut current = entity;

        while let Some(parent) = self.parent_of(current)? {
            if !visited.insert(parent.index) {
                return Err(AutoloadError::ContainmentCycle {
                    index: entity.index,
                    class: entity.class,
                    revisited: parent.index,
                });
            }
            if chain.len() > self.max_depth {
                return Err(AutoloadError::DepthExceeded {
                    index: entity.index,
                    class: entity.class,
                    max_depth: self.max_depth,
                });
            }
            chain.push(parent);
            current = parent;
        }

        Ok(chain)
    }
}
