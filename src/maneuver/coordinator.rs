use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::PlatoonError;
use crate::network::adapter::ManeuverTransport;
use crate::network::frame::MessageFrame;
use crate::utils::VehicleId;
use crate::vehicle::control::PlatoonBookkeeping;
use crate::vehicle::state::VehicleStateProvider;

use super::formation::PlatoonFormation;
use super::messages::{AbandonRequest, FormationUpdate, ManeuverMessage};

/// Membership coordinator for one vehicle.
///
/// Every vehicle runs one of these; the coordinator on the leader
/// additionally carries the authority to mutate the formation and
/// redistribute it. It owns no state itself: membership lives in the
/// [`VehicleStateProvider`], sends go through the [`ManeuverTransport`].
pub struct ManeuverCoordinator {
    state: Arc<dyn VehicleStateProvider>,
    bookkeeping: Arc<dyn PlatoonBookkeeping>,
    transport: Arc<dyn ManeuverTransport>,
}

impl ManeuverCoordinator {
    pub fn new(
        state: Arc<dyn VehicleStateProvider>,
        bookkeeping: Arc<dyn PlatoonBookkeeping>,
        transport: Arc<dyn ManeuverTransport>,
    ) -> Self {
        ManeuverCoordinator {
            state,
            bookkeeping,
            transport,
        }
    }

    fn create_abandon_request(&self) -> Result<AbandonRequest, PlatoonError> {
        let leader = self.state.leader_id().ok_or_else(|| {
            PlatoonError::Maneuver("cannot abandon: formation has no leader".to_string())
        })?;

        Ok(AbandonRequest {
            vehicle_id: self.state.id(),
            platoon_id: self.state.platoon_id(),
            destination_id: leader,
            external_id: self.state.external_id(),
        })
    }

    /// Asks the platoon leader to let this vehicle go. Purely a send; the
    /// local formation is only touched once the leader's update comes back.
    pub async fn request_abandon(&self) -> Result<(), PlatoonError> {
        let req = self.create_abandon_request()?;
        let dest = req.destination_id;

        info!(vehicle = %self.state.id(), "sending abandon request to leader {dest}");
        self.send_unicast(ManeuverMessage::Abandon(req), dest).await
    }

    /// Leader-side handling of an incoming abandon request.
    ///
    /// A request that fails any of the relevance checks is dropped without
    /// side effects. A valid one removes the trailing member from the
    /// formation and fans the shortened formation out to every remaining
    /// follower.
    pub async fn on_abandon_request(&self, req: AbandonRequest) -> Result<(), PlatoonError> {
        if req.platoon_id != self.state.platoon_id() {
            debug!(vehicle = %self.state.id(), "dropping abandon request for platoon {}", req.platoon_id);
            return Ok(());
        }
        // Only the leader acts on abandon requests.
        if Some(req.destination_id) != self.state.leader_id() {
            debug!(vehicle = %self.state.id(), "dropping abandon request addressed to non-leader {}", req.destination_id);
            return Ok(());
        }
        // Guards against a non-leader whose recorded leader id collides with
        // the destination.
        if req.destination_id != self.state.id() {
            debug!(vehicle = %self.state.id(), "dropping abandon request addressed to {}", req.destination_id);
            return Ok(());
        }

        let leader_id = self.state.id();
        let leaver_id = req.vehicle_id;
        let platoon_id = req.platoon_id;

        // Tell the traffic model the member has left platoon-following.
        self.bookkeeping.remove_member(&req.external_id);

        let mut formation = self.state.formation();
        debug!(vehicle = %leader_id, "formation before: {formation}");

        // The abandoning vehicle is assumed to be the trailing member; the
        // declared vehicle_id is not matched against the removed entry. Kept
        // as-is for compatibility with the original protocol.
        formation.remove_last();
        self.state.set_formation(formation.clone());
        debug!(vehicle = %leader_id, "formation after: {formation}");

        info!("LEADER[{leader_id}]: removing v<{leaver_id}> from platoon<{platoon_id}>");

        self.broadcast_formation(&formation).await
    }

    /// Unicasts one copy of the new formation to every follower (every entry
    /// except the leader at index 0). Fire-and-forget: no acknowledgment, no
    /// retry.
    pub async fn broadcast_formation(
        &self,
        formation: &PlatoonFormation,
    ) -> Result<(), PlatoonError> {
        let update = FormationUpdate {
            platoon_formation: formation.clone(),
        };

        for dest in formation.followers() {
            let msg = ManeuverMessage::NewFormation(update.clone());
            if let Err(e) = self.send_unicast(msg, dest).await {
                warn!(vehicle = %self.state.id(), "failed to deliver formation update to {dest}: {e}");
            }
        }
        Ok(())
    }

    /// Follower-side handling of a formation update: the local view is
    /// replaced wholesale, last writer wins.
    pub async fn on_formation_update(&self, update: FormationUpdate) -> Result<(), PlatoonError> {
        let formation = update.platoon_formation;
        info!("v<{}> got new formation = {formation}", self.state.id());
        self.state.set_formation(formation);
        Ok(())
    }

    async fn send_unicast(
        &self,
        msg: ManeuverMessage,
        destination: VehicleId,
    ) -> Result<(), PlatoonError> {
        let frame = MessageFrame::maneuver(msg, destination);
        self.transport.send_unicast(frame).await?;
        Ok(())
    }
}
