use crate::error::CallError;
use crate::media::MediaStream;
use crate::peer::RemoteStream;
use telecall_core::ConnectionState;

/// Observable state of one call, published on a watch channel for the UI
/// collaborator. Reset to defaults by teardown.
#[derive(Debug, Clone, Default)]
pub struct CallSnapshot {
    pub connection: ConnectionState,
    pub local_stream: Option<MediaStream>,
    /// Remains `None` until the remote media is negotiated.
    pub remote_stream: Option<RemoteStream>,
    /// The single error slot; setup failures land here.
    pub error: Option<CallError>,
}

impl CallSnapshot {
    /// True when no call is underway: default connection state, no streams,
    /// no pending error.
    pub fn is_idle(&self) -> bool {
        self.connection == ConnectionState::Idle
            && self.local_stream.is_none()
            && self.remote_stream.is_none()
            && self.error.is_none()
    }
}
