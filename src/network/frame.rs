use serde::{Deserialize, Serialize};

use crate::maneuver::messages::ManeuverMessage;
use crate::utils::VehicleId;
use super::error::NetworkError;

/// Kind discriminator a frame is tagged with on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadKind {
    Maneuver,
    Beacon,
}

/// Logical channel the frame is queued on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Control,
    Service,
}

/// Radio interface used for transmission. Maneuver messages always go out
/// over the short-range unicast-capable interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadioInterface {
    ShortRange,
    Cellular,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FramePayload {
    Maneuver(ManeuverMessage),
    /// Cooperative-awareness beacon bytes. Not interpreted by the maneuver
    /// layer; passed through to the generic handler.
    Beacon(Vec<u8>),
}

impl FramePayload {
    pub fn kind(&self) -> PayloadKind {
        match self {
            FramePayload::Maneuver(_) => PayloadKind::Maneuver,
            FramePayload::Beacon(_) => PayloadKind::Beacon,
        }
    }
}

/// Transport frame exchanged between vehicles: destination, channel and
/// interface selection, plus the encapsulated payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageFrame {
    pub recipient: VehicleId,
    pub channel: Channel,
    pub interface: RadioInterface,
    pub payload: FramePayload,
}

impl MessageFrame {
    /// Wraps a maneuver message for unicast delivery on the short-range
    /// control channel.
    pub fn maneuver(msg: ManeuverMessage, recipient: VehicleId) -> Self {
        MessageFrame {
            recipient,
            channel: Channel::Control,
            interface: RadioInterface::ShortRange,
            payload: FramePayload::Maneuver(msg),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, NetworkError> {
        bincode::serialize(self).map_err(|e| NetworkError::Codec(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, NetworkError> {
        bincode::deserialize(bytes).map_err(|e| NetworkError::Codec(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maneuver::messages::AbandonRequest;
    use crate::utils::PlatoonId;

    #[test]
    fn test_abandon_request_wire_round_trip() {
        let req = AbandonRequest {
            vehicle_id: VehicleId(4),
            platoon_id: PlatoonId(0),
            destination_id: VehicleId(1),
            external_id: "platoon0.3".to_string(),
        };
        let frame = MessageFrame::maneuver(
            ManeuverMessage::Abandon(req.clone()),
            VehicleId(1),
        );

        let bytes = frame.encode().unwrap();
        let decoded = MessageFrame::decode(&bytes).unwrap();

        assert_eq!(decoded.recipient, VehicleId(1));
        assert_eq!(decoded.payload.kind(), PayloadKind::Maneuver);
        match decoded.payload {
            FramePayload::Maneuver(ManeuverMessage::Abandon(back)) => {
                assert_eq!(back.vehicle_id, req.vehicle_id);
                assert_eq!(back.platoon_id, req.platoon_id);
                assert_eq!(back.destination_id, req.destination_id);
                assert_eq!(back.external_id, req.external_id);
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_truncated_frame_is_a_codec_error() {
        let frame = MessageFrame::maneuver(
            ManeuverMessage::NewFormation(crate::maneuver::messages::FormationUpdate {
                platoon_formation: vec![1, 2].into(),
            }),
            VehicleId(2),
        );
        let mut bytes = frame.encode().unwrap();
        bytes.truncate(bytes.len() / 2);

        assert!(matches!(
            MessageFrame::decode(&bytes),
            Err(NetworkError::Codec(_))
        ));
    }
}
