use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TrackKind {
    Audio,
    Video,
}

/// Backend seam for one capture track. Implementations own the device
/// resource; `stop` must hand it back to the OS.
pub trait TrackSource: Send + Sync {
    fn set_enabled(&self, enabled: bool);
    fn stop(&self);
    /// Escape hatch for transport adapters that need their concrete source.
    fn as_any(&self) -> &dyn Any;
}

struct TrackInner {
    kind: TrackKind,
    enabled: AtomicBool,
    stopped: AtomicBool,
    source: Arc<dyn TrackSource>,
}

/// One local capture track. Clones share state; stopping any clone stops the
/// underlying device exactly once.
#[derive(Clone)]
pub struct MediaTrack {
    inner: Arc<TrackInner>,
}

impl MediaTrack {
    pub fn new(kind: TrackKind, source: Arc<dyn TrackSource>) -> Self {
        Self {
            inner: Arc::new(TrackInner {
                kind,
                enabled: AtomicBool::new(true),
                stopped: AtomicBool::new(false),
                source,
            }),
        }
    }

    pub fn kind(&self) -> TrackKind {
        self.inner.kind
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.load(Ordering::SeqCst)
    }

    pub fn is_stopped(&self) -> bool {
        self.inner.stopped.load(Ordering::SeqCst)
    }

    /// Toggle enablement without re-acquiring the device. Independent per
    /// track: disabling video leaves audio untouched and vice versa.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.enabled.store(enabled, Ordering::SeqCst);
        self.inner.source.set_enabled(enabled);
    }

    /// Stop the track and release the underlying device. Idempotent.
    pub fn stop(&self) {
        if !self.inner.stopped.swap(true, Ordering::SeqCst) {
            self.inner.source.stop();
        }
    }

    pub fn source(&self) -> &Arc<dyn TrackSource> {
        &self.inner.source
    }
}

impl fmt::Debug for MediaTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaTrack")
            .field("kind", &self.kind())
            .field("enabled", &self.is_enabled())
            .field("stopped", &self.is_stopped())
            .finish()
    }
}

/// Handle over the local capture tracks. Cheap to clone; the media session
/// remains the sole owner of the track lifecycle.
#[derive(Clone)]
pub struct MediaStream {
    tracks: Arc<Vec<MediaTrack>>,
}

impl MediaStream {
    pub fn new(tracks: Vec<MediaTrack>) -> Self {
        Self {
            tracks: Arc::new(tracks),
        }
    }

    pub fn tracks(&self) -> &[MediaTrack] {
        &self.tracks
    }

    pub fn audio_tracks(&self) -> impl Iterator<Item = &MediaTrack> {
        self.tracks.iter().filter(|t| t.kind() == TrackKind::Audio)
    }

    pub fn video_tracks(&self) -> impl Iterator<Item = &MediaTrack> {
        self.tracks.iter().filter(|t| t.kind() == TrackKind::Video)
    }
}

impl fmt::Debug for MediaStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaStream")
            .field("tracks", &self.tracks.as_slice())
            .finish()
    }
}
