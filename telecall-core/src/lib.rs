pub mod model;

pub use model::{
    ConnectionState, IceCandidate, ParticipantId, RoomId, SdpType, SessionDescription, SignalBody,
    SignalMessage,
};
