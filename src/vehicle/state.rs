use std::sync::RwLock;

use crate::maneuver::formation::PlatoonFormation;
use crate::utils::{PlatoonId, VehicleId};

/// Read/write view of a vehicle's identity and platoon membership.
///
/// Identity fields are fixed for the vehicle's lifetime; the formation is
/// mutated only by the maneuver coordinator of the same vehicle instance,
/// never concurrently.
pub trait VehicleStateProvider: Send + Sync {
    fn id(&self) -> VehicleId;
    fn external_id(&self) -> String;
    fn platoon_id(&self) -> PlatoonId;
    /// Identifier at formation index 0, if the formation is non-empty.
    fn leader_id(&self) -> Option<VehicleId>;
    fn is_leader(&self) -> bool;
    fn formation(&self) -> PlatoonFormation;
    fn set_formation(&self, formation: PlatoonFormation);
}

/// Default in-process state holder.
#[derive(Debug)]
pub struct LocalVehicleState {
    id: VehicleId,
    external_id: String,
    platoon_id: PlatoonId,
    formation: RwLock<PlatoonFormation>,
}

impl LocalVehicleState {
    pub fn new(
        id: VehicleId,
        external_id: impl Into<String>,
        platoon_id: PlatoonId,
        formation: PlatoonFormation,
    ) -> Self {
        LocalVehicleState {
            id,
            external_id: external_id.into(),
            platoon_id,
            formation: RwLock::new(formation),
        }
    }
}

impl VehicleStateProvider for LocalVehicleState {
    fn id(&self) -> VehicleId {
        self.id
    }

    fn external_id(&self) -> String {
        self.external_id.clone()
    }

    fn platoon_id(&self) -> PlatoonId {
        self.platoon_id
    }

    fn leader_id(&self) -> Option<VehicleId> {
        self.formation.read().unwrap().leader()
    }

    fn is_leader(&self) -> bool {
        self.leader_id() == Some(self.id)
    }

    fn formation(&self) -> PlatoonFormation {
        self.formation.read().unwrap().clone()
    }

    fn set_formation(&self, formation: PlatoonFormation) {
        *self.formation.write().unwrap() = formation;
    }
}
