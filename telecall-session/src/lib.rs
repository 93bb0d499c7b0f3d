pub mod call;
pub mod error;
pub mod media;
pub mod peer;
pub mod relay;

pub use call::{CallCommand, CallConfig, CallHandle, CallOrchestrator, CallSnapshot};
pub use error::{CallError, MediaError, PeerError, RelayError};
pub use media::{
    MediaConstraints, MediaDevices, MediaSession, MediaStream, MediaTrack, TrackKind, TrackSource,
};
pub use peer::{
    Connectivity, NegotiationRole, PeerConnection, PeerTransport, PeerTransportFactory,
    RemoteStream, RemoteTrack, TransportEvent,
};
pub use relay::{
    BroadcastEvent, ChannelOptions, LocalRelay, RelayClient, RelayPublisher, RelaySubscription,
    SIGNAL_EVENT, SignalTransport,
};
