use crate::error::MediaError;
use crate::media::devices::{MediaConstraints, MediaDevices};
use crate::media::stream::{MediaStream, TrackKind};
use std::sync::Arc;
use tracing::{info, warn};

/// Owns the local camera/microphone lifecycle for one call: at most one live
/// acquisition, toggles per kind, and a release that stops every track.
pub struct MediaSession {
    devices: Arc<dyn MediaDevices>,
    stream: Option<MediaStream>,
}

impl MediaSession {
    pub fn new(devices: Arc<dyn MediaDevices>) -> Self {
        Self {
            devices,
            stream: None,
        }
    }

    pub fn stream(&self) -> Option<&MediaStream> {
        self.stream.as_ref()
    }

    /// Request capture devices. A second acquire without a release reuses
    /// the live stream instead of grabbing the hardware twice.
    pub async fn acquire(
        &mut self,
        constraints: MediaConstraints,
    ) -> Result<MediaStream, MediaError> {
        if let Some(stream) = &self.stream {
            warn!("Local media already acquired; reusing the live stream");
            return Ok(stream.clone());
        }
        let stream = self.devices.get_user_media(constraints).await?;
        info!(tracks = stream.tracks().len(), "Acquired local media");
        self.stream = Some(stream.clone());
        Ok(stream)
    }

    pub fn set_audio_enabled(&self, enabled: bool) {
        self.set_kind_enabled(TrackKind::Audio, enabled);
    }

    pub fn set_video_enabled(&self, enabled: bool) {
        self.set_kind_enabled(TrackKind::Video, enabled);
    }

    /// Flip audio enablement; returns the new state. No-op without a stream.
    pub fn toggle_audio(&self) -> bool {
        self.toggle_kind(TrackKind::Audio)
    }

    /// Flip video enablement; returns the new state. No-op without a stream.
    pub fn toggle_video(&self) -> bool {
        self.toggle_kind(TrackKind::Video)
    }

    fn set_kind_enabled(&self, kind: TrackKind, enabled: bool) {
        let Some(stream) = &self.stream else { return };
        for track in stream.tracks().iter().filter(|t| t.kind() == kind) {
            track.set_enabled(enabled);
        }
    }

    fn toggle_kind(&self, kind: TrackKind) -> bool {
        let Some(stream) = &self.stream else {
            return false;
        };
        let current = stream
            .tracks()
            .iter()
            .find(|t| t.kind() == kind)
            .is_some_and(|t| t.is_enabled());
        self.set_kind_enabled(kind, !current);
        !current
    }

    /// Stop every acquired track and release the devices. Idempotent; a
    /// no-op without a prior acquire. Skipping this leaks hardware locks.
    pub fn release(&mut self) {
        if let Some(stream) = self.stream.take() {
            for track in stream.tracks() {
                track.stop();
            }
            info!("Released local media");
        }
    }
}
