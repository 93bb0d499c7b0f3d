mod devices;
mod session;
mod stream;

pub use devices::{MediaConstraints, MediaDevices};
pub use session::MediaSession;
pub use stream::{MediaStream, MediaTrack, TrackKind, TrackSource};
