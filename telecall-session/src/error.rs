use thiserror::Error;

/// Device acquisition failures. Terminal for the current call attempt; the
/// orchestrator surfaces them and never retries on its own.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MediaError {
    #[error("permission to use capture devices was denied")]
    PermissionDenied,
    #[error("no usable capture device: {0}")]
    DeviceUnavailable(String),
}

/// Signal relay failures. Fatal for the current call attempt.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RelayError {
    #[error("signal relay unreachable: {0}")]
    Unreachable(String),
    #[error("not joined to any room")]
    NotJoined,
    #[error("relay subscription closed")]
    Closed,
    #[error("signal codec error: {0}")]
    Codec(String),
}

/// Failures reported by the peer transport while applying negotiation
/// operations. During an active call these are swallowed at the state-machine
/// boundary; during setup they surface as [`CallError`].
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PeerError {
    #[error("peer transport failure: {0}")]
    Transport(String),
}

/// The single error slot observable on a call snapshot.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CallError {
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error(transparent)]
    Relay(#[from] RelayError),
    #[error(transparent)]
    Peer(#[from] PeerError),
}
