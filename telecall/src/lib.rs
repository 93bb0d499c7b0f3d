pub use telecall_core::model::{ParticipantId, RoomId};

pub mod model {
    pub use telecall_core::model::*;
}

#[cfg(feature = "session")]
pub mod session {
    pub use telecall_session::*;
}

#[cfg(feature = "rtc")]
pub mod rtc {
    pub use telecall_webrtc::*;
}
