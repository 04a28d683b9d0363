use std::sync::Arc;

use crate::error::PlatoonError;
use crate::network::frame::MessageFrame;

use super::core::Vehicle;

/// Everything a vehicle instance reacts to: inbound frames, scenario timers,
/// and externally triggered operations. Executed strictly in order by the
/// vehicle's command bus.
#[derive(Debug, Clone)]
pub enum VehicleCommand {
    // Operations
    RequestAbandon,

    // Handle (ingest)
    HandleFrame(MessageFrame),

    // Scenario timers
    StartBraking,
    CheckDistance,

    // Shutdown
    Shutdown,
}

impl VehicleCommand {
    pub async fn execute(self, vehicle: &Arc<Vehicle>) -> Result<(), PlatoonError> {
        match self {
            VehicleCommand::RequestAbandon => vehicle.coordinator.request_abandon().await,

            VehicleCommand::HandleFrame(frame) => vehicle.handle_frame(frame).await,

            VehicleCommand::StartBraking => match &vehicle.scenario {
                Some(scenario) => scenario.start_braking(vehicle).await,
                None => Ok(()),
            },
            VehicleCommand::CheckDistance => match &vehicle.scenario {
                Some(scenario) => scenario.check_distance(vehicle).await,
                None => Ok(()),
            },

            VehicleCommand::Shutdown => vehicle.teardown().await,
        }
    }
}
