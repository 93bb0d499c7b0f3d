use crate::error::RelayError;
use crate::relay::transport::{ChannelOptions, RelaySubscription, SignalTransport};
use std::sync::Arc;
use telecall_core::{RoomId, SignalMessage};
use tracing::{debug, warn};

/// Event name signaling messages are published under.
pub const SIGNAL_EVENT: &str = "signal";

fn channel_name(room: &RoomId) -> String {
    format!("video-call:{room}")
}

/// Call-scoped wrapper over the pub/sub transport: joins the room channel,
/// ships `SignalMessage`s out and decodes inbound ones.
pub struct RelayClient {
    transport: Arc<dyn SignalTransport>,
    subscription: Option<RelaySubscription>,
}

impl RelayClient {
    pub fn new(transport: Arc<dyn SignalTransport>) -> Self {
        Self {
            transport,
            subscription: None,
        }
    }

    pub fn is_joined(&self) -> bool {
        self.subscription.is_some()
    }

    /// Subscribe to the room's broadcast channel. Failure is fatal for the
    /// call attempt; retrying is a caller-level decision.
    pub async fn join(&mut self, room: &RoomId) -> Result<(), RelayError> {
        let subscription = self
            .transport
            .subscribe(&channel_name(room), ChannelOptions::default())
            .await?;
        self.subscription = Some(subscription);
        debug!(room = %room, "Joined signal relay channel");
        Ok(())
    }

    /// Broadcast one signaling message to the other participant.
    pub async fn send(&self, message: &SignalMessage) -> Result<(), RelayError> {
        let Some(subscription) = &self.subscription else {
            return Err(RelayError::NotJoined);
        };
        let payload =
            serde_json::to_value(message).map_err(|e| RelayError::Codec(e.to_string()))?;
        subscription.publisher.publish(SIGNAL_EVENT, payload).await
    }

    /// Next decoded signaling message. Unknown events and undecodable
    /// payloads are logged and skipped. Returns `None` once the transport
    /// drops the subscription; pends forever while not joined.
    pub async fn recv(&mut self) -> Option<SignalMessage> {
        let Some(subscription) = &mut self.subscription else {
            return std::future::pending().await;
        };
        loop {
            let event = subscription.events.recv().await?;
            if event.event != SIGNAL_EVENT {
                debug!(event = %event.event, "Ignoring non-signal broadcast");
                continue;
            }
            match serde_json::from_value::<SignalMessage>(event.payload) {
                Ok(message) => return Some(message),
                Err(e) => {
                    warn!("Dropping undecodable signal payload: {e}");
                }
            }
        }
    }

    /// Unsubscribe from the room channel. Idempotent; a no-op without a
    /// prior join.
    pub async fn leave(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.publisher.unsubscribe().await;
            debug!("Left signal relay channel");
        }
    }
}
