//! Physical entity class as defined by ENTITY-MIB `PhysicalClass`.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Class of a physical entity.
///
/// Discriminants match the `PhysicalClass` textual convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityClass {
    /// Not covered by any other class.
    Other = 1,
    /// Class cannot be determined by the agent.
    Unknown = 2,
    /// Overall container for the equipment.
    Chassis = 3,
    /// Backplane or similar shared interconnect.
    Backplane = 4,
    /// Slot or other receptacle for removable entities.
    Container = 5,
    /// Power supply unit.
    PowerSupply = 6,
    /// Fan or fan tray.
    Fan = 7,
    /// Sensor of any kind.
    Sensor = 8,
    /// Line card, supervisor, transceiver module.
    Module = 9,
    /// Networking port capable of carrying traffic.
    Port = 10,
    /// Stack of multiple chassis.
    Stack = 11,
    /// Processor.
    Cpu = 12,
    /// Energy object (RFC 6933).
    EnergyObject = 13,
    /// Battery (RFC 6933).
    Battery = 14,
    /// Storage drive (RFC 6933).
    StorageDrive = 15,
}

impl EntityClass {
    /// All classes in `PhysicalClass` order.
    pub const ALL: [EntityClass; 15] = [
        EntityClass::Other,
        EntityClass::Unknown,
        EntityClass::Chassis,
        EntityClass::Backplane,
        EntityClass::Container,
        EntityClass::PowerSupply,
        EntityClass::Fan,
        EntityClass::Sensor,
        EntityClass::Module,
        EntityClass::Port,
        EntityClass::Stack,
        EntityClass::Cpu,
        EntityClass::EnergyObject,
        EntityClass::Battery,
        EntityClass::StorageDrive,
    ];

    /// Returns the MIB label of the class (e.g. `powerSupply`).
    pub const fn label(&self) -> &'static str {
        match self {
            EntityClass::Other => "other",
            EntityClass::Unknown => "unknown",
            EntityClass::Chassis => "chassis",
            EntityClass::Backplane => "backplane",
            EntityClass::Container => "container",
            EntityClass::PowerSupply => "powerSupply",
            EntityClass::Fan => "fan",
            EntityClass::Sensor => "sensor",
            EntityClass::Module => "module",
            EntityClass::Port => "port",
            EntityClass::Stack => "stack",
            EntityClass::Cpu => "cpu",
            EntityClass::EnergyObject => "energyObject",
            EntityClass::Battery => "battery",
            EntityClass::StorageDrive => "storageDrive",
        }
    }

    /// Returns the numeric `PhysicalClass` value.
    pub const fn value(&self) -> u32 {
        *self as u32
    }

    /// Creates a class from its numeric `PhysicalClass` value.
    pub fn from_value(value: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.value() == value)
    }

    /// Returns true for the root of the containment tree.
    pub const fn is_root(&self) -> bool {
        matches!(self, EntityClass::Chassis)
    }

    /// Returns true for the classes the hierarchy is built from.
    pub const fn is_leaf(&self) -> bool {
        matches!(self, EntityClass::Port | EntityClass::PowerSupply)
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for EntityClass {
    type Err = ParseError;

    /// Accepts `port`, `'port'`, `10` and `port(10)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidEntityClass(s.to_string());

        let trimmed = s.trim().trim_matches(|c: char| c == '\'' || c == '"');
        if trimmed.is_empty() {
            return Err(invalid());
        }

        if let Ok(value) = trimmed.parse::<u32>() {
            return Self::from_value(value).ok_or_else(invalid);
        }

        let (label, value) = match trimmed.split_once('(') {
            Some((label, rest)) => {
                let value = rest
                    .strip_suffix(')')
                    .and_then(|v| v.parse::<u32>().ok())
                    .ok_or_else(invalid)?;
                (label, Some(value))
            }
            None => (trimmed, None),
        };

        let class = Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(label))
            .ok_or_else(invalid)?;

        match value {
            Some(v) if v != class.value() => Err(invalid()),
            _ => Ok(class),
        }
    }
}
