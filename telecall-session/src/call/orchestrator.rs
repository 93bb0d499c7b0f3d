use crate::call::call_command::CallCommand;
use crate::call::call_state::CallSnapshot;
use crate::error::{CallError, RelayError};
use crate::media::{MediaConstraints, MediaDevices, MediaSession};
use crate::peer::{NegotiationRole, PeerConnection, PeerTransportFactory, TransportEvent};
use crate::relay::{RelayClient, SignalTransport};
use std::sync::Arc;
use telecall_core::{ConnectionState, ParticipantId, RoomId, SignalBody, SignalMessage};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

const COMMAND_QUEUE_DEPTH: usize = 64;
const TRANSPORT_QUEUE_DEPTH: usize = 256;

#[derive(Debug, Clone)]
pub struct CallConfig {
    pub room: RoomId,
    pub identity: ParticipantId,
    pub constraints: MediaConstraints,
}

impl CallConfig {
    pub fn new(room: impl Into<RoomId>, identity: impl Into<ParticipantId>) -> Self {
        Self {
            room: room.into(),
            identity: identity.into(),
            constraints: MediaConstraints::default(),
        }
    }
}

/// Public surface of one call. Commands are fire-and-forget; outcomes are
/// observed through the snapshot watch, the same way a UI layer would.
#[derive(Clone)]
pub struct CallHandle {
    commands: mpsc::Sender<CallCommand>,
    snapshot: watch::Receiver<CallSnapshot>,
}

impl CallHandle {
    pub async fn start_call(&self) {
        let _ = self.commands.send(CallCommand::Start).await;
    }

    pub async fn join_call(&self) {
        let _ = self.commands.send(CallCommand::Join).await;
    }

    pub async fn end_call(&self) {
        let _ = self.commands.send(CallCommand::End).await;
    }

    pub async fn toggle_audio(&self) {
        let _ = self.commands.send(CallCommand::ToggleAudio).await;
    }

    pub async fn toggle_video(&self) {
        let _ = self.commands.send(CallCommand::ToggleVideo).await;
    }

    pub fn snapshot(&self) -> CallSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<CallSnapshot> {
        self.snapshot.clone()
    }
}

/// Actor owning one call end-to-end: media session, peer connection and
/// relay client live here, driven by a single event loop. Exactly one
/// orchestrator per call; nothing shares its connection or local stream.
pub struct CallOrchestrator {
    config: CallConfig,
    media: MediaSession,
    relay: RelayClient,
    peer_factory: Arc<dyn PeerTransportFactory>,
    connection: Option<PeerConnection>,
    command_rx: mpsc::Receiver<CallCommand>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    transport_tx: mpsc::Sender<TransportEvent>,
    snapshot_tx: watch::Sender<CallSnapshot>,
    active: bool,
}

impl CallOrchestrator {
    /// Spawn the call actor and hand back its public handle. The actor
    /// keeps running across calls; dropping the last handle tears down any
    /// active call and stops it.
    pub fn spawn(
        config: CallConfig,
        devices: Arc<dyn MediaDevices>,
        relay: Arc<dyn SignalTransport>,
        peer_factory: Arc<dyn PeerTransportFactory>,
    ) -> CallHandle {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let (transport_tx, transport_rx) = mpsc::channel(TRANSPORT_QUEUE_DEPTH);
        let (snapshot_tx, snapshot_rx) = watch::channel(CallSnapshot::default());

        let orchestrator = Self {
            config,
            media: MediaSession::new(devices),
            relay: RelayClient::new(relay),
            peer_factory,
            connection: None,
            command_rx,
            transport_rx,
            transport_tx,
            snapshot_tx,
            active: false,
        };
        tokio::spawn(orchestrator.run());

        CallHandle {
            commands: command_tx,
            snapshot: snapshot_rx,
        }
    }

    pub async fn run(mut self) {
        info!(room = %self.config.room, "Call loop started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(cmd) => self.handle_command(cmd).await,
                        None => {
                            debug!("Command channel closed; shutting call down");
                            self.teardown().await;
                            break;
                        }
                    }
                }

                message = self.relay.recv() => {
                    match message {
                        Some(message) => self.on_signal(message).await,
                        None => self.on_relay_closed().await,
                    }
                }

                Some(event) = self.transport_rx.recv() => {
                    self.on_transport_event(event).await;
                }
            }
        }

        info!(room = %self.config.room, "Call loop finished");
    }

    async fn handle_command(&mut self, cmd: CallCommand) {
        match cmd {
            CallCommand::Start => self.begin(NegotiationRole::Initiator).await,
            CallCommand::Join => self.begin(NegotiationRole::Responder).await,
            CallCommand::End => self.teardown().await,
            CallCommand::ToggleAudio => {
                self.media.toggle_audio();
            }
            CallCommand::ToggleVideo => {
                self.media.toggle_video();
            }
        }
    }

    async fn begin(&mut self, role: NegotiationRole) {
        if self.active {
            warn!("Ignoring start: a call is already active");
            return;
        }
        self.snapshot_tx.send_modify(|s| {
            s.connection = ConnectionState::Connecting;
            s.error = None;
        });

        // Fresh event channel per call attempt. A previous transport's
        // callbacks keep a sender to the old channel; whatever they emit
        // after teardown lands on a receiver nobody reads instead of
        // bleeding into this call.
        let (transport_tx, transport_rx) = mpsc::channel(TRANSPORT_QUEUE_DEPTH);
        self.transport_tx = transport_tx;
        self.transport_rx = transport_rx;

        let local = match self.media.acquire(self.config.constraints).await {
            Ok(stream) => stream,
            Err(e) => {
                error!("Media acquisition failed: {e}");
                self.fail(e.into());
                return;
            }
        };

        let transport = match self
            .peer_factory
            .create(&local, self.transport_tx.clone())
            .await
        {
            Ok(transport) => transport,
            Err(e) => {
                error!("Peer transport setup failed: {e}");
                self.media.release();
                self.fail(e.into());
                return;
            }
        };
        let mut connection = PeerConnection::new(role, transport);

        if let Err(e) = self.relay.join(&self.config.room).await {
            error!("Failed to join signal relay: {e}");
            connection.close().await;
            self.media.release();
            self.fail(e.into());
            return;
        }

        match connection.begin().await {
            Ok(Some(body)) => {
                if let Err(e) = self.broadcast(body).await {
                    error!("Failed to broadcast offer: {e}");
                    connection.close().await;
                    self.media.release();
                    self.relay.leave().await;
                    self.fail(e.into());
                    return;
                }
            }
            Ok(None) => {}
            Err(e) => {
                error!("Negotiation entry failed: {e}");
                connection.close().await;
                self.media.release();
                self.relay.leave().await;
                self.fail(e.into());
                return;
            }
        }

        self.connection = Some(connection);
        self.active = true;
        self.snapshot_tx.send_modify(|s| {
            s.connection = ConnectionState::Connecting;
            s.local_stream = Some(local);
        });
        info!(room = %self.config.room, ?role, "Call negotiation started");
    }

    async fn on_signal(&mut self, message: SignalMessage) {
        if !self.active {
            debug!("Ignoring signal: no active call");
            return;
        }
        if message.from == self.config.identity {
            debug!("Ignoring self-originated signal");
            return;
        }
        let Some(connection) = self.connection.as_mut() else {
            return;
        };
        debug!(from = %message.from, "Handling inbound signal");
        if let Some(reply) = connection.handle_signal(message.body).await {
            if let Err(e) = self.broadcast(reply).await {
                warn!("Failed to publish signaling reply: {e}");
            }
        }
    }

    async fn on_transport_event(&mut self, event: TransportEvent) {
        if !self.active {
            debug!("Ignoring transport event: no active call");
            return;
        }
        match event {
            TransportEvent::CandidateDiscovered(candidate) => {
                debug!("Broadcasting discovered ICE candidate");
                if let Err(e) = self.broadcast(SignalBody::IceCandidate(candidate)).await {
                    warn!("Failed to publish ICE candidate: {e}");
                }
            }
            event => {
                let Some(connection) = self.connection.as_mut() else {
                    return;
                };
                connection.handle_event(event);
                let state = connection.state();
                let remote = connection.remote_stream().cloned();
                self.snapshot_tx.send_modify(|s| {
                    s.connection = state;
                    s.remote_stream = remote;
                });
            }
        }
    }

    /// The relay dropped our subscription. Fatal while still negotiating; an
    /// already-connected call keeps its direct media path.
    async fn on_relay_closed(&mut self) {
        warn!("Signal relay subscription closed");
        self.relay.leave().await;
        let connected = self
            .connection
            .as_ref()
            .is_some_and(|c| c.state().is_connected());
        if self.active && !connected {
            self.media.release();
            if let Some(mut connection) = self.connection.take() {
                connection.close().await;
            }
            self.active = false;
            self.fail(CallError::Relay(RelayError::Closed));
        }
    }

    async fn broadcast(&self, body: SignalBody) -> Result<(), RelayError> {
        self.relay
            .send(&SignalMessage::broadcast(self.config.identity.clone(), body))
            .await
    }

    fn fail(&self, error: CallError) {
        self.snapshot_tx.send_modify(|s| {
            *s = CallSnapshot {
                error: Some(error),
                ..CallSnapshot::default()
            };
        });
    }

    /// Strict teardown order: local media first (device locks), then the
    /// peer connection, then the relay subscription, then observable state.
    /// Safe on partially initialized state and safe to repeat.
    async fn teardown(&mut self) {
        let was_active = self.active;
        self.media.release();
        if let Some(mut connection) = self.connection.take() {
            connection.close().await;
        }
        self.relay.leave().await;
        self.active = false;
        self.snapshot_tx.send_modify(|s| *s = CallSnapshot::default());
        if was_active {
            info!(room = %self.config.room, "Call ended");
        }
    }
}
