//! Which classes may act as the hierarchy parent of which.

use snmp_entity_types::EntityClass;

const CHASSIS_ONLY: &[EntityClass] = &[EntityClass::Chassis];
const MODULE_OR_CHASSIS: &[EntityClass] = &[EntityClass::Module, EntityClass::Chassis];
const ROOT: &[EntityClass] = &[];

/// Returns the classes accepted as the direct hierarchy parent of `class`.
///
/// Chassis is the root and accepts none. Classes that never appear in the
/// hierarchy themselves (fans, sensors, backplanes, ...) are treated like
/// containers.
pub const fn accepted_parents(class: EntityClass) -> &'static [EntityClass] {
    match class {
        EntityClass::Port => MODULE_OR_CHASSIS,
        EntityClass::Chassis => ROOT,
        EntityClass::PowerSupply
        | EntityClass::Module
        | EntityClass::Container
        | EntityClass::Other
        | EntityClass::Unknown
        | EntityClass::Backplane
        | EntityClass::Fan
        | EntityClass::Sensor
        | EntityClass::Stack
        | EntityClass::Cpu
        | EntityClass::EnergyObject
        | EntityClass::Battery
        | EntityClass::StorageDrive => CHASSIS_ONLY,
    }
}

/// Returns true if `parent` is an accepted parent class for `child`.
pub fn accepts(child: EntityClass, parent: EntityClass) -> bool {
    accepted_parents(child).contains(&parent)
}
