use crate::config::RtcConfig;
use crate::track::RtcTrackSource;
use async_trait::async_trait;
use std::sync::Arc;
use telecall_core::{IceCandidate, SdpType, SessionDescription};
use telecall_session::{
    Connectivity, MediaStream, PeerError, PeerTransport, PeerTransportFactory, RemoteStream,
    RemoteTrack, TrackKind, TransportEvent,
};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::{RTCIceCandidate, RTCIceCandidateInit};
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::peer_connection_state::RTCPeerConnectionState;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::rtp_transceiver::rtp_codec::RTPCodecType;
use webrtc::track::track_local::TrackLocal;
use webrtc::track::track_remote::TrackRemote;

fn to_peer_err(e: impl std::fmt::Display) -> PeerError {
    PeerError::Transport(e.to_string())
}

fn to_rtc_description(description: &SessionDescription) -> Result<RTCSessionDescription, PeerError> {
    match description.sdp_type {
        SdpType::Offer => RTCSessionDescription::offer(description.sdp.clone()),
        SdpType::Answer => RTCSessionDescription::answer(description.sdp.clone()),
    }
    .map_err(to_peer_err)
}

fn candidate_from_init(init: RTCIceCandidateInit) -> IceCandidate {
    IceCandidate {
        candidate: init.candidate,
        sdp_mid: init.sdp_mid,
        sdp_m_line_index: init.sdp_mline_index,
        username_fragment: init.username_fragment,
    }
}

fn candidate_to_init(candidate: IceCandidate) -> RTCIceCandidateInit {
    RTCIceCandidateInit {
        candidate: candidate.candidate,
        sdp_mid: candidate.sdp_mid,
        sdp_mline_index: candidate.sdp_m_line_index,
        username_fragment: candidate.username_fragment,
    }
}

/// Builds one native transport per call attempt: a real `RTCPeerConnection`
/// with the local sample tracks attached and its callbacks bridged into the
/// engine's event channel.
pub struct RtcPeerFactory {
    config: RtcConfig,
}

impl RtcPeerFactory {
    pub fn new(config: RtcConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PeerTransportFactory for RtcPeerFactory {
    async fn create(
        &self,
        local: &MediaStream,
        events: mpsc::Sender<TransportEvent>,
    ) -> Result<Box<dyn PeerTransport>, PeerError> {
        let mut media_engine = MediaEngine::default();
        media_engine.register_default_codecs().map_err(to_peer_err)?;
        let registry =
            register_default_interceptors(Registry::new(), &mut media_engine).map_err(to_peer_err)?;
        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        let ice_servers = if self.config.ice_servers.is_empty() {
            Vec::new()
        } else {
            vec![RTCIceServer {
                urls: self.config.ice_servers.clone(),
                ..Default::default()
            }]
        };
        let rtc_config = RTCConfiguration {
            ice_servers,
            ..Default::default()
        };

        let pc = Arc::new(api.new_peer_connection(rtc_config).await.map_err(to_peer_err)?);

        // Trickle ICE: every discovered local path goes straight to the call
        // loop for broadcast.
        let ice_tx = events.clone();
        pc.on_ice_candidate(Box::new(move |candidate: Option<RTCIceCandidate>| {
            let tx = ice_tx.clone();
            Box::pin(async move {
                let Some(candidate) = candidate else { return };
                let Ok(init) = candidate.to_json() else {
                    return;
                };
                debug!("Discovered local ICE candidate");
                let _ = tx
                    .send(TransportEvent::CandidateDiscovered(candidate_from_init(
                        init,
                    )))
                    .await;
            })
        }));

        let state_tx = events.clone();
        pc.on_peer_connection_state_change(Box::new(move |state: RTCPeerConnectionState| {
            let tx = state_tx.clone();
            Box::pin(async move {
                info!("Peer connection state changed: {state}");
                let connectivity = match state {
                    RTCPeerConnectionState::Connected => Some(Connectivity::Connected),
                    RTCPeerConnectionState::Disconnected => Some(Connectivity::Disconnected),
                    RTCPeerConnectionState::Failed => Some(Connectivity::Failed),
                    _ => None,
                };
                if let Some(connectivity) = connectivity {
                    let _ = tx.send(TransportEvent::StateChanged(connectivity)).await;
                }
            })
        }));

        // Remote tracks accumulate into one surfaced stream handle, refreshed
        // per arrival; negotiation decides when (and whether) this fires.
        let track_tx = events.clone();
        let remote_tracks: Arc<Mutex<Vec<RemoteTrack>>> = Arc::new(Mutex::new(Vec::new()));
        pc.on_track(Box::new(move |track: Arc<TrackRemote>, _receiver, _transceiver| {
            let tx = track_tx.clone();
            let tracks = remote_tracks.clone();
            Box::pin(async move {
                let kind = match track.kind() {
                    RTPCodecType::Audio => TrackKind::Audio,
                    _ => TrackKind::Video,
                };
                info!(?kind, ssrc = track.ssrc(), "Remote track arrived");
                let remote = RemoteTrack::new(kind, track.ssrc().to_string(), track.clone());
                let snapshot = {
                    let mut guard = tracks.lock().await;
                    guard.push(remote);
                    guard.clone()
                };
                let _ = tx
                    .send(TransportEvent::RemoteStream(RemoteStream::new(
                        "remote", snapshot,
                    )))
                    .await;
            })
        }));

        // Local tracks go on before negotiation so the offer carries them.
        for media_track in local.tracks() {
            let Some(source) = media_track.source().as_any().downcast_ref::<RtcTrackSource>()
            else {
                warn!("Skipping local track with a non-native source");
                continue;
            };
            pc.add_track(source.track() as Arc<dyn TrackLocal + Send + Sync>)
                .await
                .map_err(to_peer_err)?;
        }

        Ok(Box::new(RtcPeerTransport { pc }))
    }
}

/// `PeerTransport` over a real `RTCPeerConnection`, translating between the
/// wire model and webrtc-rs types.
pub struct RtcPeerTransport {
    pc: Arc<RTCPeerConnection>,
}

impl RtcPeerTransport {
    pub fn connection(&self) -> Arc<RTCPeerConnection> {
        self.pc.clone()
    }
}

#[async_trait]
impl PeerTransport for RtcPeerTransport {
    async fn create_offer(&self) -> Result<SessionDescription, PeerError> {
        let offer = self.pc.create_offer(None).await.map_err(to_peer_err)?;
        Ok(SessionDescription::offer(offer.sdp))
    }

    async fn create_answer(&self) -> Result<SessionDescription, PeerError> {
        let answer = self.pc.create_answer(None).await.map_err(to_peer_err)?;
        Ok(SessionDescription::answer(answer.sdp))
    }

    async fn set_local_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), PeerError> {
        self.pc
            .set_local_description(to_rtc_description(&description)?)
            .await
            .map_err(to_peer_err)
    }

    async fn set_remote_description(
        &self,
        description: SessionDescription,
    ) -> Result<(), PeerError> {
        self.pc
            .set_remote_description(to_rtc_description(&description)?)
            .await
            .map_err(to_peer_err)
    }

    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), PeerError> {
        self.pc
            .add_ice_candidate(candidate_to_init(candidate))
            .await
            .map_err(to_peer_err)
    }

    async fn close(&self) {
        if let Err(e) = self.pc.close().await {
            warn!("Error closing peer connection: {e}");
        }
    }
}
