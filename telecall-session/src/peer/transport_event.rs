use crate::peer::transport::RemoteStream;
use telecall_core::IceCandidate;

/// Connectivity as reported by the underlying transport. Mirrored 1:1 into
/// the connection state machine with no debounce or retry.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Connectivity {
    Connected,
    Disconnected,
    Failed,
}

/// Events emitted by the peer transport into the call loop.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// A local network path was discovered. Broadcast immediately; discovery
    /// runs for the whole negotiation, independent of offer/answer timing.
    CandidateDiscovered(IceCandidate),
    /// The negotiated remote media arrived. May fire before or after the
    /// connected transition.
    RemoteStream(RemoteStream),
    StateChanged(Connectivity),
}
