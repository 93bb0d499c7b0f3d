use crate::error::MediaError;
use crate::media::stream::MediaStream;
use async_trait::async_trait;

/// Which capture kinds to request from the device API.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MediaConstraints {
    pub audio: bool,
    pub video: bool,
}

impl Default for MediaConstraints {
    fn default() -> Self {
        Self {
            audio: true,
            video: true,
        }
    }
}

/// Boundary to the capture-device API. Acquisition may suspend on a
/// permission prompt; failures are terminal for the call attempt.
#[async_trait]
pub trait MediaDevices: Send + Sync {
    async fn get_user_media(
        &self,
        constraints: MediaConstraints,
    ) -> Result<MediaStream, MediaError>;
}
