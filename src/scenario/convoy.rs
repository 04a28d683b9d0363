use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::PlatoonError;
use crate::vehicle::command::VehicleCommand;
use crate::vehicle::control::ControllerKind;
use crate::vehicle::core::Vehicle;

/// Driving scenario: the convoy cruises behind its leader until the trailing
/// follower brakes away, opens the configured gap, and abandons the platoon.
#[derive(Debug, Clone)]
pub struct ConvoyScenario {
    /// Leader cruising speed, m/s.
    pub leader_speed_mps: f64,
    /// Extra desired speed for followers so they stay attached while the
    /// leader accelerates, m/s.
    pub follower_speed_margin_mps: f64,
    /// When the trailing follower starts braking away.
    pub brake_at: Duration,
    /// Re-check period for the radar gap while braking.
    pub check_interval: Duration,
    /// Spacing target set when braking starts, m.
    pub abandon_spacing_m: f64,
    /// Radar gap beyond which the vehicle leaves the platoon, m.
    pub abandon_threshold_m: f64,
    /// ACC headway time adopted after leaving, s.
    pub acc_headway_s: f64,
}

impl ConvoyScenario {
    /// Applies initial setpoints and, on the trailing follower, arms the
    /// brake timer.
    pub async fn setup(&self, vehicle: &Arc<Vehicle>) -> Result<(), PlatoonError> {
        if vehicle.state.is_leader() {
            vehicle.control.set_cruise_speed(self.leader_speed_mps);
            return Ok(());
        }

        vehicle
            .control
            .set_cruise_speed(self.leader_speed_mps + self.follower_speed_margin_mps);

        let formation = vehicle.state.formation();
        if formation.last() == Some(vehicle.state.id()) {
            let id = vehicle
                .scheduler()?
                .enqueue_after(self.brake_at, VehicleCommand::StartBraking)
                .await;
            vehicle.track_timer(id);
            debug!(vehicle = %vehicle.state.id(), "trailing follower, braking in {:?}", self.brake_at);
        }
        Ok(())
    }

    /// Widens the spacing target and starts probing the radar gap.
    pub async fn start_braking(&self, vehicle: &Arc<Vehicle>) -> Result<(), PlatoonError> {
        info!(vehicle = %vehicle.state.id(), "braking away, spacing target {} m", self.abandon_spacing_m);
        vehicle.control.set_constant_spacing(self.abandon_spacing_m);

        let id = vehicle
            .scheduler()?
            .enqueue_after(self.check_interval, VehicleCommand::CheckDistance)
            .await;
        vehicle.track_timer(id);
        Ok(())
    }

    /// One radar probe. Leaves the platoon once the gap is open, otherwise
    /// re-arms itself.
    pub async fn check_distance(&self, vehicle: &Arc<Vehicle>) -> Result<(), PlatoonError> {
        let distance = vehicle
            .control
            .radar_measurement()
            .map(|r| r.distance_m)
            .unwrap_or(f64::NAN);
        debug!(vehicle = %vehicle.state.id(), "leaving vehicle now at {distance} m");

        if distance > self.abandon_threshold_m {
            // Gap is open: fall back to plain ACC and leave the platoon.
            vehicle.control.set_active_controller(ControllerKind::Acc);
            vehicle.control.set_headway_time(self.acc_headway_s);
            vehicle.coordinator.request_abandon().await
        } else {
            let id = vehicle
                .scheduler()?
                .enqueue_after(self.check_interval, VehicleCommand::CheckDistance)
                .await;
            vehicle.track_timer(id);
            Ok(())
        }
    }
}
