// lib.rs
pub mod config;
pub mod error;
pub mod jobs;
pub mod maneuver;
pub mod mock;
pub mod network;
pub mod scenario;
pub mod utils;
pub mod vehicle;

pub use config::Config;
pub use error::PlatoonError;
pub use maneuver::{
    coordinator::ManeuverCoordinator,
    formation::PlatoonFormation,
    messages::{AbandonRequest, FormationUpdate, ManeuverMessage},
};
pub use network::{
    adapter::ManeuverTransport,
    frame::MessageFrame,
    in_memory::InMemoryTransport,
};
pub use scenario::convoy::ConvoyScenario;
pub use utils::{PlatoonId, VehicleId};
pub use vehicle::{
    command::VehicleCommand,
    control::{ControllerKind, PlatoonBookkeeping, VehicleControl},
    core::Vehicle,
    state::{LocalVehicleState, VehicleStateProvider},
};
