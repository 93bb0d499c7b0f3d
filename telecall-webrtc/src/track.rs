use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use telecall_session::TrackSource;
use webrtc::api::media_engine::{MIME_TYPE_OPUS, MIME_TYPE_VP8};
use webrtc::rtp_transceiver::rtp_codec::RTCRtpCodecCapability;
use webrtc::track::track_local::track_local_static_sample::TrackLocalStaticSample;

/// Sample-fed local track standing in for a capture device (webrtc-rs has no
/// hardware capture). Enablement gates the feeder; `stop` parks it for good.
pub struct RtcTrackSource {
    track: Arc<TrackLocalStaticSample>,
    enabled: AtomicBool,
    stopped: AtomicBool,
}

impl RtcTrackSource {
    pub fn audio(id: &str, stream_id: &str) -> Self {
        Self::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_OPUS.to_owned(),
                clock_rate: 48000,
                channels: 2,
                ..Default::default()
            },
            id.to_owned(),
            stream_id.to_owned(),
        ))
    }

    pub fn video(id: &str, stream_id: &str) -> Self {
        Self::new(TrackLocalStaticSample::new(
            RTCRtpCodecCapability {
                mime_type: MIME_TYPE_VP8.to_owned(),
                clock_rate: 90000,
                ..Default::default()
            },
            id.to_owned(),
            stream_id.to_owned(),
        ))
    }

    fn new(track: TrackLocalStaticSample) -> Self {
        Self {
            track: Arc::new(track),
            enabled: AtomicBool::new(true),
            stopped: AtomicBool::new(false),
        }
    }

    /// The RTP-side track to attach to a peer connection or feed samples to.
    pub fn track(&self) -> Arc<TrackLocalStaticSample> {
        self.track.clone()
    }

    /// Whether a feeder should currently be writing samples.
    pub fn is_live(&self) -> bool {
        self.enabled.load(Ordering::SeqCst) && !self.stopped.load(Ordering::SeqCst)
    }
}

impl TrackSource for RtcTrackSource {
    fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
