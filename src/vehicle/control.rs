use std::fmt::Debug;

/// Longitudinal controller a vehicle can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    /// Cooperative adaptive cruise control: platoon-following behavior.
    Cacc,
    /// Plain adaptive cruise control: gap keeping against the vehicle ahead.
    Acc,
}

/// Distance and relative speed to the vehicle ahead, as seen by the radar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarReading {
    pub distance_m: f64,
    pub relative_speed_mps: f64,
}

/// Seam to the vehicle-dynamics layer. The simulation core only issues
/// setpoints and reads the radar; the dynamics themselves live behind this
/// trait.
pub trait VehicleControl: Send + Sync + Debug {
    fn set_cruise_speed(&self, speed_mps: f64);
    fn set_constant_spacing(&self, spacing_m: f64);
    fn set_active_controller(&self, controller: ControllerKind);
    fn set_headway_time(&self, headway_s: f64);
    /// `None` when there is no vehicle in radar range.
    fn radar_measurement(&self) -> Option<RadarReading>;
}

/// Seam to the traffic model's own platoon bookkeeping. Called by the leader
/// when a member formally exits platoon-following behavior.
pub trait PlatoonBookkeeping: Send + Sync + Debug {
    fn remove_member(&self, external_id: &str);
}
