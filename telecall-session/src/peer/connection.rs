use crate::error::PeerError;
use crate::peer::transport::{PeerTransport, RemoteStream};
use crate::peer::transport_event::{Connectivity, TransportEvent};
use telecall_core::{ConnectionState, IceCandidate, SessionDescription, SignalBody};
use tracing::{debug, info, warn};

/// Which side of the handshake this machine plays. Decided once at entry,
/// never re-branched mid-call.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NegotiationRole {
    /// Creates and broadcasts the offer.
    Initiator,
    /// Waits for the offer and replies with an answer.
    Responder,
}

/// State machine for one negotiation. Owns the handshake, the pending
/// candidate buffer and the surfaced remote stream. Connectivity is mirrored
/// from transport events; a `Disconnected`/`Failed` machine does not recover
/// itself — the orchestrator discards it and may build a fresh one.
pub struct PeerConnection {
    role: NegotiationRole,
    transport: Box<dyn PeerTransport>,
    state: ConnectionState,
    /// Candidates received before the remote description. Never applied
    /// early, never discarded; flushed in arrival order once the remote
    /// description lands.
    pending_candidates: Vec<IceCandidate>,
    remote_description_set: bool,
    offer_sent: bool,
    remote_stream: Option<RemoteStream>,
}

impl PeerConnection {
    pub fn new(role: NegotiationRole, transport: Box<dyn PeerTransport>) -> Self {
        Self {
            role,
            transport,
            state: ConnectionState::Idle,
            pending_candidates: Vec::new(),
            remote_description_set: false,
            offer_sent: false,
            remote_stream: None,
        }
    }

    pub fn role(&self) -> NegotiationRole {
        self.role
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn remote_stream(&self) -> Option<&RemoteStream> {
        self.remote_stream.as_ref()
    }

    pub fn pending_candidates(&self) -> usize {
        self.pending_candidates.len()
    }

    /// Enter negotiation. The initiator's offer comes back for broadcast;
    /// the responder produces nothing and waits for the remote offer.
    pub async fn begin(&mut self) -> Result<Option<SignalBody>, PeerError> {
        self.state = ConnectionState::Connecting;
        match self.role {
            NegotiationRole::Initiator => {
                let offer = self.transport.create_offer().await?;
                self.transport.set_local_description(offer.clone()).await?;
                self.offer_sent = true;
                debug!("Created and applied local offer");
                Ok(Some(SignalBody::Offer(offer)))
            }
            NegotiationRole::Responder => Ok(None),
        }
    }

    /// Single entry point for every inbound signal; self-originated messages
    /// are filtered upstream. Malformed or out-of-sequence messages are
    /// logged and dropped — they never unwind and never corrupt the buffer.
    /// A returned body is the reply to broadcast.
    pub async fn handle_signal(&mut self, body: SignalBody) -> Option<SignalBody> {
        match body {
            SignalBody::Offer(description) => self.on_offer(description).await,
            SignalBody::Answer(description) => {
                self.on_answer(description).await;
                None
            }
            SignalBody::IceCandidate(candidate) => {
                self.on_candidate(candidate).await;
                None
            }
        }
    }

    /// Mirror one transport event into the machine. Candidate discoveries
    /// are outbound traffic and are handled by the orchestrator instead.
    pub fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::StateChanged(connectivity) => {
                let next = match connectivity {
                    Connectivity::Connected => ConnectionState::Connected,
                    Connectivity::Disconnected => ConnectionState::Disconnected,
                    Connectivity::Failed => ConnectionState::Failed,
                };
                info!(state = ?next, "Peer connectivity changed");
                self.state = next;
            }
            TransportEvent::RemoteStream(stream) => {
                info!(tracks = stream.tracks().len(), "Remote media stream arrived");
                self.remote_stream = Some(stream);
            }
            TransportEvent::CandidateDiscovered(_) => {}
        }
    }

    pub async fn close(&mut self) {
        self.transport.close().await;
    }

    async fn on_offer(&mut self, description: SessionDescription) -> Option<SignalBody> {
        if self.remote_description_set || self.state.is_connected() {
            warn!("Dropping offer: negotiation already has a remote description");
            return None;
        }
        if let Err(e) = self.transport.set_remote_description(description).await {
            warn!("Dropping offer: {e}");
            return None;
        }
        self.remote_description_set = true;
        self.flush_pending_candidates().await;

        let answer = match self.transport.create_answer().await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Failed to create answer: {e}");
                return None;
            }
        };
        if let Err(e) = self.transport.set_local_description(answer.clone()).await {
            warn!("Failed to apply local answer: {e}");
            return None;
        }
        debug!("Answered remote offer");
        Some(SignalBody::Answer(answer))
    }

    async fn on_answer(&mut self, description: SessionDescription) {
        if !self.offer_sent {
            warn!("Dropping answer: no local offer outstanding");
            return;
        }
        if self.remote_description_set {
            warn!("Dropping answer: remote description already set");
            return;
        }
        if let Err(e) = self.transport.set_remote_description(description).await {
            warn!("Dropping answer: {e}");
            return;
        }
        self.remote_description_set = true;
        self.flush_pending_candidates().await;
    }

    async fn on_candidate(&mut self, candidate: IceCandidate) {
        if !self.remote_description_set {
            // Candidates routinely race ahead of the description exchange;
            // hold them until the remote description lands.
            debug!(
                pending = self.pending_candidates.len() + 1,
                "Buffering early ICE candidate"
            );
            self.pending_candidates.push(candidate);
            return;
        }
        if let Err(e) = self.transport.add_ice_candidate(candidate).await {
            warn!("Failed to apply ICE candidate: {e}");
        }
    }

    /// Apply buffered candidates in arrival order, then clear the buffer.
    async fn flush_pending_candidates(&mut self) {
        for candidate in std::mem::take(&mut self.pending_candidates) {
            if let Err(e) = self.transport.add_ice_candidate(candidate).await {
                warn!("Failed to apply buffered ICE candidate: {e}");
            }
        }
    }
}
