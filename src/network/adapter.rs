use std::fmt::Debug;
use std::sync::Arc;

use crate::utils::VehicleId;
use super::error::NetworkError;
use super::frame::MessageFrame;

/// Callback invoked once per frame arriving at a vehicle.
pub type FrameHandler = Arc<dyn Fn(MessageFrame) + Send + Sync>;

/// Abstract unicast transport between vehicles.
///
/// The maneuver layer makes no delivery guarantee on top of this: sends are
/// fire-and-forget and loss is neither detected nor compensated for.
#[async_trait::async_trait]
pub trait ManeuverTransport: Send + Sync + Debug {
    /// Identifier of the vehicle this transport endpoint belongs to.
    fn local_id(&self) -> VehicleId;

    /// Hands a frame to the underlying network, addressed to
    /// `frame.recipient`.
    async fn send_unicast(&self, frame: MessageFrame) -> Result<(), NetworkError>;

    /// Registers the inbound dispatch callback, invoked once per arriving
    /// frame.
    fn set_frame_handler(&self, handler: FrameHandler);
}
