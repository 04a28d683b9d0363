//! utils.rs
//!
//! Common identifier types shared across the platoon simulation.

use serde::{Deserialize, Serialize};

/// Unique identifier for a vehicle in the simulation.
///
/// `VehicleId` is a lightweight wrapper around `u32`, designed to:
/// - Ensure type safety across APIs
/// - Enable strong `HashMap`/`HashSet` keys
/// - Provide readable formatting and conversions
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleId(pub u32);

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VehicleId {
    fn from(id: u32) -> Self {
        VehicleId(id)
    }
}

/// Identifier of a platoon. Every maneuver message carries one so that
/// vehicles belonging to a different platoon can drop it.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatoonId(pub u32);

impl std::fmt::Display for PlatoonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PlatoonId {
    fn from(id: u32) -> Self {
        PlatoonId(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_vehicle_id_construction_and_display() {
        let id = VehicleId(7);
        assert_eq!(id.0, 7);

        let formatted = format!("{}", id);
        assert_eq!(formatted, "7");
    }

    #[test]
    fn test_vehicle_id_from_u32() {
        let id: VehicleId = 42.into();
        assert_eq!(id, VehicleId(42));
    }

    #[test]
    fn test_vehicle_id_equality() {
        let a = VehicleId(1);
        let b = VehicleId(1);
        let c = VehicleId(2);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_vehicle_id_hashing() {
        let mut map = HashMap::new();
        map.insert(VehicleId(1), "leader");
        map.insert(VehicleId(2), "follower");

        assert_eq!(map.get(&VehicleId(1)), Some(&"leader"));
        assert_eq!(map.get(&VehicleId(2)), Some(&"follower"));

        let set: HashSet<VehicleId> = map.keys().cloned().collect();
        assert!(set.contains(&VehicleId(1)));
    }

    #[test]
    fn test_platoon_id_display() {
        let id = PlatoonId(3);
        assert_eq!(format!("{}", id), "3");
    }
}
