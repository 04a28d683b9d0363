use std::sync::Mutex;
use std::time::Instant;

use tracing::info;

use crate::vehicle::control::{ControllerKind, PlatoonBookkeeping, RadarReading, VehicleControl};

#[derive(Debug)]
struct ControlState {
    cruise_speed_mps: Option<f64>,
    spacing_target_m: f64,
    controller: ControllerKind,
    headway_s: Option<f64>,
    braking_since: Option<Instant>,
}

/// Scripted stand-in for the vehicle-dynamics layer.
///
/// Holds the gap at `initial_gap_m` until a wider spacing target is set,
/// then opens it at `gap_rate_mps` until the target is reached. Also records
/// platoon-bookkeeping removals so tests can assert on them.
#[derive(Debug)]
pub struct MockVehicleControl {
    initial_gap_m: f64,
    gap_rate_mps: f64,
    inner: Mutex<ControlState>,
    removed_members: Mutex<Vec<String>>,
}

impl MockVehicleControl {
    pub fn new(initial_gap_m: f64, gap_rate_mps: f64) -> Self {
        MockVehicleControl {
            initial_gap_m,
            gap_rate_mps,
            inner: Mutex::new(ControlState {
                cruise_speed_mps: None,
                spacing_target_m: initial_gap_m,
                controller: ControllerKind::Cacc,
                headway_s: None,
                braking_since: None,
            }),
            removed_members: Mutex::new(Vec::new()),
        }
    }

    pub fn active_controller(&self) -> ControllerKind {
        self.inner.lock().unwrap().controller
    }

    pub fn cruise_speed(&self) -> Option<f64> {
        self.inner.lock().unwrap().cruise_speed_mps
    }

    pub fn removed_members(&self) -> Vec<String> {
        self.removed_members.lock().unwrap().clone()
    }
}

impl VehicleControl for MockVehicleControl {
    fn set_cruise_speed(&self, speed_mps: f64) {
        self.inner.lock().unwrap().cruise_speed_mps = Some(speed_mps);
    }

    fn set_constant_spacing(&self, spacing_m: f64) {
        let mut state = self.inner.lock().unwrap();
        state.spacing_target_m = spacing_m;
        state.braking_since = Some(Instant::now());
    }

    fn set_active_controller(&self, controller: ControllerKind) {
        self.inner.lock().unwrap().controller = controller;
    }

    fn set_headway_time(&self, headway_s: f64) {
        self.inner.lock().unwrap().headway_s = Some(headway_s);
    }

    fn radar_measurement(&self) -> Option<RadarReading> {
        let state = self.inner.lock().unwrap();
        let distance_m = match state.braking_since {
            Some(since) => {
                let opened = self.initial_gap_m + since.elapsed().as_secs_f64() * self.gap_rate_mps;
                opened.min(state.spacing_target_m)
            }
            None => self.initial_gap_m,
        };
        Some(RadarReading {
            distance_m,
            relative_speed_mps: 0.0,
        })
    }
}

impl PlatoonBookkeeping for MockVehicleControl {
    fn remove_member(&self, external_id: &str) {
        info!("traffic model: removing platoon member {external_id}");
        self.removed_members.lock().unwrap().push(external_id.to_string());
    }
}
