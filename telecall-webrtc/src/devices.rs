use crate::track::RtcTrackSource;
use async_trait::async_trait;
use std::sync::Arc;
use telecall_session::{MediaConstraints, MediaDevices, MediaError, MediaStream, MediaTrack, TrackKind};

/// `MediaDevices` backend producing sample-fed tracks. Callers recover the
/// [`RtcTrackSource`] from each track to feed encoded samples in.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleDevices;

#[async_trait]
impl MediaDevices for SampleDevices {
    async fn get_user_media(
        &self,
        constraints: MediaConstraints,
    ) -> Result<MediaStream, MediaError> {
        let mut tracks = Vec::new();
        if constraints.audio {
            tracks.push(MediaTrack::new(
                TrackKind::Audio,
                Arc::new(RtcTrackSource::audio("audio", "telecall")),
            ));
        }
        if constraints.video {
            tracks.push(MediaTrack::new(
                TrackKind::Video,
                Arc::new(RtcTrackSource::video("video", "telecall")),
            ));
        }
        if tracks.is_empty() {
            return Err(MediaError::DeviceUnavailable(
                "no capture kinds requested".to_owned(),
            ));
        }
        Ok(MediaStream::new(tracks))
    }
}
