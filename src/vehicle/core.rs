use std::sync::{Arc, Mutex, RwLock};

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::PlatoonError;
use crate::jobs::bus::CommandBus;
use crate::jobs::scheduler::{spawn_scheduler, Scheduler};
use crate::maneuver::coordinator::ManeuverCoordinator;
use crate::maneuver::messages::ManeuverMessage;
use crate::network::adapter::ManeuverTransport;
use crate::network::frame::{FramePayload, MessageFrame};
use crate::scenario::convoy::ConvoyScenario;
use crate::vehicle::command::VehicleCommand;
use crate::vehicle::control::{PlatoonBookkeeping, VehicleControl};
use crate::vehicle::state::VehicleStateProvider;

/// Runtime pieces resolved in the second construction phase.
struct VehicleRuntime {
    bus: CommandBus,
    scheduler: Arc<Scheduler>,
}

/// One simulated vehicle: identity and membership state, control seam,
/// transport endpoint, and the maneuver coordinator gluing them together.
///
/// Construction is two-phase: [`Vehicle::new`] only assembles data, then
/// [`Vehicle::start`] wires the transport handler, the command loop, and the
/// scenario timers once all collaborators exist. Nothing runs before
/// `start`.
pub struct Vehicle {
    pub state: Arc<dyn VehicleStateProvider>,
    pub control: Arc<dyn VehicleControl>,
    pub transport: Arc<dyn ManeuverTransport>,
    pub coordinator: ManeuverCoordinator,
    pub scenario: Option<ConvoyScenario>,
    runtime: RwLock<Option<VehicleRuntime>>,
    /// Handle of the armed brake/probe timer, cancelled on teardown.
    pending_timer: Mutex<Option<Uuid>>,
}

impl Vehicle {
    pub fn new(
        state: Arc<dyn VehicleStateProvider>,
        control: Arc<dyn VehicleControl>,
        bookkeeping: Arc<dyn PlatoonBookkeeping>,
        transport: Arc<dyn ManeuverTransport>,
        scenario: Option<ConvoyScenario>,
    ) -> Arc<Self> {
        let coordinator =
            ManeuverCoordinator::new(Arc::clone(&state), bookkeeping, Arc::clone(&transport));

        Arc::new(Vehicle {
            state,
            control,
            transport,
            coordinator,
            scenario,
            runtime: RwLock::new(None),
            pending_timer: Mutex::new(None),
        })
    }

    /// Second phase: spawns the command loop and scheduler, registers the
    /// inbound frame handler, and lets the scenario arm its timers.
    pub async fn start(self: &Arc<Self>) -> Result<(), PlatoonError> {
        if self.transport.local_id() != self.state.id() {
            return Err(PlatoonError::Config(format!(
                "transport endpoint {} does not belong to vehicle {}",
                self.transport.local_id(),
                self.state.id()
            )));
        }

        let bus = CommandBus::new(self, 100);
        let scheduler = spawn_scheduler(bus.clone());
        {
            let mut runtime = self.runtime.write().unwrap();
            if runtime.is_some() {
                return Err(PlatoonError::Other(format!(
                    "vehicle {} already started",
                    self.state.id()
                )));
            }
            *runtime = Some(VehicleRuntime {
                bus: bus.clone(),
                scheduler,
            });
        }

        let frame_bus = bus.clone();
        let local_id = self.state.id();
        self.transport.set_frame_handler(Arc::new(move |frame| {
            if frame_bus
                .try_enqueue(VehicleCommand::HandleFrame(frame))
                .is_err()
            {
                tracing::warn!(vehicle = %local_id, "inbound frame dropped: command queue full");
            }
        }));

        if let Some(scenario) = &self.scenario {
            scenario.setup(self).await?;
        }

        info!(vehicle = %self.state.id(), leader = self.state.is_leader(), "vehicle started");
        Ok(())
    }

    pub fn bus(&self) -> Result<CommandBus, PlatoonError> {
        self.runtime
            .read()
            .unwrap()
            .as_ref()
            .map(|r| r.bus.clone())
            .ok_or_else(|| PlatoonError::Other("vehicle not started".to_string()))
    }

    pub fn scheduler(&self) -> Result<Arc<Scheduler>, PlatoonError> {
        self.runtime
            .read()
            .unwrap()
            .as_ref()
            .map(|r| Arc::clone(&r.scheduler))
            .ok_or_else(|| PlatoonError::Other("vehicle not started".to_string()))
    }

    /// Records the currently armed scenario timer so teardown can cancel it.
    pub(crate) fn track_timer(&self, id: Uuid) {
        *self.pending_timer.lock().unwrap() = Some(id);
    }

    /// Demultiplexes one inbound frame: maneuver messages are dispatched to
    /// the coordinator by variant, anything else goes to the generic handler.
    pub(crate) async fn handle_frame(&self, frame: MessageFrame) -> Result<(), PlatoonError> {
        match frame.payload {
            FramePayload::Maneuver(ManeuverMessage::Abandon(req)) => {
                self.coordinator.on_abandon_request(req).await
            }
            FramePayload::Maneuver(ManeuverMessage::NewFormation(update)) => {
                self.coordinator.on_formation_update(update).await
            }
            FramePayload::Beacon(bytes) => {
                self.handle_beacon(&bytes);
                Ok(())
            }
        }
    }

    fn handle_beacon(&self, bytes: &[u8]) {
        debug!(vehicle = %self.state.id(), "passing through {}-byte beacon payload", bytes.len());
    }

    /// Cancels any armed scenario timer. The command loop exits after
    /// executing the shutdown command that called this.
    pub(crate) async fn teardown(&self) -> Result<(), PlatoonError> {
        let pending = self.pending_timer.lock().unwrap().take();
        if let Some(id) = pending {
            if let Ok(scheduler) = self.scheduler() {
                scheduler.cancel(id).await;
            }
        }
        info!(vehicle = %self.state.id(), "vehicle stopped");
        Ok(())
    }
}
