mod connection;
mod transport;
mod transport_event;

pub use connection::{NegotiationRole, PeerConnection};
pub use transport::{PeerTransport, PeerTransportFactory, RemoteStream, RemoteTrack};
pub use transport_event::{Connectivity, TransportEvent};
