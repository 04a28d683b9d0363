use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("failed to send frame to {0}")]
    SendError(String),

    #[error("peer not found: {0}")]
    PeerNotFound(String),

    #[error("frame codec error: {0}")]
    Codec(String),
}
