use crate::error::PeerError;
use crate::media::{MediaStream, TrackKind};
use crate::peer::transport_event::TransportEvent;
use async_trait::async_trait;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use telecall_core::{IceCandidate, SessionDescription};
use tokio::sync::mpsc;

/// One remote media track. The source is the transport adapter's concrete
/// handle, recoverable by downcast.
#[derive(Clone)]
pub struct RemoteTrack {
    kind: TrackKind,
    id: String,
    source: Arc<dyn Any + Send + Sync>,
}

impl RemoteTrack {
    pub fn new(kind: TrackKind, id: impl Into<String>, source: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            kind,
            id: id.into(),
            source,
        }
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.source.clone().downcast().ok()
    }
}

impl fmt::Debug for RemoteTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteTrack")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish()
    }
}

/// The remote participant's media, surfaced once negotiation produces it.
#[derive(Debug, Clone)]
pub struct RemoteStream {
    id: String,
    tracks: Vec<RemoteTrack>,
}

impl RemoteStream {
    pub fn new(id: impl Into<String>, tracks: Vec<RemoteTrack>) -> Self {
        Self {
            id: id.into(),
            tracks,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tracks(&self) -> &[RemoteTrack] {
        &self.tracks
    }
}

/// Boundary to the negotiation primitive (a real RTC peer connection, or a
/// mock in tests). Descriptions and candidates use the wire model; events
/// flow through the channel handed over at creation.
#[async_trait]
pub trait PeerTransport: Send + Sync {
    async fn create_offer(&self) -> Result<SessionDescription, PeerError>;
    async fn create_answer(&self) -> Result<SessionDescription, PeerError>;
    async fn set_local_description(&self, description: SessionDescription)
    -> Result<(), PeerError>;
    async fn set_remote_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), PeerError>;
    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), PeerError>;
    async fn close(&self);
}

/// Builds one transport per call attempt with the local tracks attached;
/// transport events flow into `events` for the life of the connection.
#[async_trait]
pub trait PeerTransportFactory: Send + Sync {
    async fn create(
        &self,
        local: &MediaStream,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Box<dyn PeerTransport>, PeerError>;
}
