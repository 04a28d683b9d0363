use serde::{Deserialize, Serialize};

use crate::utils::{PlatoonId, VehicleId};
use super::formation::PlatoonFormation;

/// A follower's declaration of intent to leave its platoon.
///
/// Built by the departing vehicle's coordinator, addressed to the platoon
/// leader, and consumed exactly once by the leader's coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbandonRequest {
    pub vehicle_id: VehicleId,
    pub platoon_id: PlatoonId,
    /// Leader the request is addressed to.
    pub destination_id: VehicleId,
    /// Identifier the traffic model knows the vehicle by.
    pub external_id: String,
}

/// The authoritative post-change membership, issued by the leader and cloned
/// per follower for unicast delivery. Receivers overwrite their local
/// formation with it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationUpdate {
    pub platoon_formation: PlatoonFormation,
}

/// Closed set of maneuver messages, dispatched by exhaustive match at the
/// receiving end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManeuverMessage {
    Abandon(AbandonRequest),
    NewFormation(FormationUpdate),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abandon_request_fields() {
        let req = AbandonRequest {
            vehicle_id: VehicleId(4),
            platoon_id: PlatoonId(0),
            destination_id: VehicleId(1),
            external_id: "platoon0.3".to_string(),
        };

        assert_eq!(req.vehicle_id, VehicleId(4));
        assert_eq!(req.destination_id, VehicleId(1));
    }

    #[test]
    fn test_maneuver_message_serde_round_trip() {
        let msg = ManeuverMessage::NewFormation(FormationUpdate {
            platoon_formation: vec![1, 2, 3].into(),
        });

        let json = serde_json::to_string(&msg).unwrap();
        let back: ManeuverMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
