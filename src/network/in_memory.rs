use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::utils::VehicleId;
use super::adapter::{FrameHandler, ManeuverTransport};
use super::error::NetworkError;
use super::frame::MessageFrame;

/// In-process transport. Each vehicle owns one endpoint; peers are wired up
/// by exchanging mpsc senders. Frames are serialized to bytes on the way
/// through so the wire codec is exercised end to end.
#[derive(Clone)]
pub struct InMemoryTransport {
    pub id: VehicleId,
    peers: Arc<Mutex<HashMap<VehicleId, Sender<Vec<u8>>>>>,
    frame_handler: Arc<Mutex<Option<FrameHandler>>>,
}

impl InMemoryTransport {
    pub fn new(id: VehicleId) -> (Self, Sender<Vec<u8>>, Receiver<Vec<u8>>) {
        let (tx, rx) = mpsc::channel(100);

        (
            Self {
                id,
                peers: Arc::new(Mutex::new(HashMap::new())),
                frame_handler: Arc::new(Mutex::new(None)),
            },
            tx,
            rx,
        )
    }

    pub fn add_peer(&self, peer_id: VehicleId, sender: Sender<Vec<u8>>) {
        self.peers.lock().unwrap().insert(peer_id, sender);
    }

    /// Drains the inbound channel, decoding each frame and handing it to the
    /// registered handler. Runs until the channel closes.
    pub async fn run(&self, mut rx: Receiver<Vec<u8>>) {
        while let Some(bytes) = rx.recv().await {
            let frame = match MessageFrame::decode(&bytes) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!(vehicle = %self.id, "dropping undecodable frame: {e}");
                    continue;
                }
            };
            let handler = self.frame_handler.lock().unwrap().clone();
            if let Some(h) = handler {
                h(frame);
            }
        }
    }
}

impl std::fmt::Debug for InMemoryTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTransport")
            .field("id", &self.id)
            .field("frame_handler", &"Fn handler (not Debug)")
            .finish()
    }
}

#[async_trait]
impl ManeuverTransport for InMemoryTransport {
    fn local_id(&self) -> VehicleId {
        self.id
    }

    async fn send_unicast(&self, frame: MessageFrame) -> Result<(), NetworkError> {
        let recipient = frame.recipient;
        let bytes = frame.encode()?;

        let sender = {
            let peers = self.peers.lock().unwrap();
            peers.get(&recipient).cloned()
        };

        match sender {
            Some(sender) => sender
                .send(bytes)
                .await
                .map_err(|_| NetworkError::SendError(recipient.to_string())),
            None => Err(NetworkError::PeerNotFound(recipient.to_string())),
        }
    }

    fn set_frame_handler(&self, handler: FrameHandler) {
        let mut h = self.frame_handler.lock().unwrap();
        *h = Some(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maneuver::messages::{FormationUpdate, ManeuverMessage};

    #[tokio::test]
    async fn test_unicast_reaches_only_the_recipient() {
        let (net_a, _tx_a, _rx_a) = InMemoryTransport::new(VehicleId(1));
        let (net_b, tx_b, rx_b) = InMemoryTransport::new(VehicleId(2));
        let (net_c, tx_c, rx_c) = InMemoryTransport::new(VehicleId(3));

        net_a.add_peer(VehicleId(2), tx_b);
        net_a.add_peer(VehicleId(3), tx_c);

        let received_b = Arc::new(Mutex::new(Vec::new()));
        let received_b_clone = received_b.clone();
        net_b.set_frame_handler(Arc::new(move |frame| {
            received_b_clone.lock().unwrap().push(frame);
        }));

        let received_c = Arc::new(Mutex::new(Vec::new()));
        let received_c_clone = received_c.clone();
        net_c.set_frame_handler(Arc::new(move |frame| {
            received_c_clone.lock().unwrap().push(frame);
        }));

        let net_b_runner = net_b.clone();
        tokio::spawn(async move { net_b_runner.run(rx_b).await });
        let net_c_runner = net_c.clone();
        tokio::spawn(async move { net_c_runner.run(rx_c).await });

        let update = ManeuverMessage::NewFormation(FormationUpdate {
            platoon_formation: vec![1, 2].into(),
        });
        net_a
            .send_unicast(MessageFrame::maneuver(update, VehicleId(2)))
            .await
            .expect("failed to send to vehicle 2");

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        assert_eq!(received_b.lock().unwrap().len(), 1);
        assert_eq!(received_c.lock().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_unknown_recipient_is_an_error() {
        let (net_a, _tx_a, _rx_a) = InMemoryTransport::new(VehicleId(1));

        let update = ManeuverMessage::NewFormation(FormationUpdate {
            platoon_formation: vec![1].into(),
        });
        let result = net_a
            .send_unicast(MessageFrame::maneuver(update, VehicleId(9)))
            .await;

        assert!(matches!(result, Err(NetworkError::PeerNotFound(_))));
    }
}
