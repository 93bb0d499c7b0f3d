use async_trait::async_trait;
use std::any::Any;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use telecall_session::{
    MediaConstraints, MediaDevices, MediaError, MediaStream, MediaTrack, TrackKind, TrackSource,
};

/// Track source that records enable/stop calls for verification.
#[derive(Default)]
pub struct RecordingSource {
    enabled_calls: Mutex<Vec<bool>>,
    stopped: AtomicBool,
}

impl RecordingSource {
    pub fn enabled_calls(&self) -> Vec<bool> {
        self.enabled_calls.lock().unwrap().clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

impl TrackSource for RecordingSource {
    fn set_enabled(&self, enabled: bool) {
        self.enabled_calls.lock().unwrap().push(enabled);
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Mock device API with scriptable failure and a log of every stream handed
/// out, so tests can check for leaked (unstopped) tracks.
#[derive(Default)]
pub struct MockDevices {
    failure: Mutex<Option<MediaError>>,
    acquired: Mutex<Vec<MediaStream>>,
}

impl MockDevices {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make the next acquisition fail.
    pub fn fail_with(&self, error: MediaError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn acquired(&self) -> Vec<MediaStream> {
        self.acquired.lock().unwrap().clone()
    }

    /// Tracks handed out that were never stopped.
    pub fn tracks_running(&self) -> usize {
        self.acquired
            .lock()
            .unwrap()
            .iter()
            .flat_map(|s| s.tracks())
            .filter(|t| !t.is_stopped())
            .count()
    }
}

#[async_trait]
impl MediaDevices for MockDevices {
    async fn get_user_media(
        &self,
        constraints: MediaConstraints,
    ) -> Result<MediaStream, MediaError> {
        if let Some(error) = self.failure.lock().unwrap().take() {
            return Err(error);
        }

        let mut tracks = Vec::new();
        if constraints.audio {
            tracks.push(MediaTrack::new(
                TrackKind::Audio,
                Arc::new(RecordingSource::default()),
            ));
        }
        if constraints.video {
            tracks.push(MediaTrack::new(
                TrackKind::Video,
                Arc::new(RecordingSource::default()),
            ));
        }
        let stream = MediaStream::new(tracks);
        self.acquired.lock().unwrap().push(stream.clone());
        Ok(stream)
    }
}
