mod participant;
mod room;
mod signaling;
mod state;

pub use participant::ParticipantId;
pub use room::RoomId;
pub use signaling::{IceCandidate, SdpType, SessionDescription, SignalBody, SignalMessage};
pub use state::ConnectionState;
