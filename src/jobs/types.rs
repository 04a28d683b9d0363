use std::collections::HashMap;

use tokio::{sync::Mutex, time::Instant};
use uuid::Uuid;

use crate::vehicle::command::VehicleCommand;

/// A command armed to fire once at `fire_at`. Cancelled jobs stay in the map
/// with `active = false` until the dispatch loop sweeps them.
#[derive(Debug, Clone)]
pub struct ScheduledJob {
    pub id: Uuid,
    pub cmd: VehicleCommand,
    pub fire_at: Instant,
    pub active: bool,
}

pub type JobMap = Mutex<HashMap<Uuid, ScheduledJob>>;
