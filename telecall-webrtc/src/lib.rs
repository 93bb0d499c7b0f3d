mod config;
mod devices;
mod peer;
mod track;

pub use config::RtcConfig;
pub use devices::SampleDevices;
pub use peer::{RtcPeerFactory, RtcPeerTransport};
pub use track::RtcTrackSource;
