use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::warn;

use crate::vehicle::command::VehicleCommand;
use crate::vehicle::core::Vehicle;

/// Per-vehicle command queue.
///
/// The consumer loop executes commands strictly one at a time, in arrival
/// order. That single loop is what serializes message arrivals and timer
/// fires for a vehicle instance; no other code mutates its state.
pub struct CommandBus {
    tx: mpsc::Sender<VehicleCommand>,
}

impl CommandBus {
    pub fn new(vehicle: &Arc<Vehicle>, queue_cap: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<VehicleCommand>(queue_cap);

        tokio::spawn({
            let vehicle = Arc::clone(vehicle);

            async move {
                while let Some(cmd) = rx.recv().await {
                    let stop = matches!(cmd, VehicleCommand::Shutdown);
                    if let Err(e) = cmd.execute(&vehicle).await {
                        warn!(vehicle = %vehicle.state.id(), "command failed: {e}");
                    }
                    if stop {
                        break;
                    }
                }
            }
        });

        Self { tx }
    }

    pub async fn enqueue(&self, cmd: VehicleCommand) -> Result<(), String> {
        self.tx
            .send(cmd)
            .await
            .map_err(|e| format!("enqueue failed: {e}"))
    }

    /// Non-blocking enqueue for synchronous contexts (the inbound frame
    /// handler). Returns the command back when the queue is full or closed.
    pub fn try_enqueue(&self, cmd: VehicleCommand) -> Result<(), VehicleCommand> {
        match self.tx.try_send(cmd) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(cmd))
            | Err(mpsc::error::TrySendError::Closed(cmd)) => Err(cmd),
        }
    }
}

impl Clone for CommandBus {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}
