use crate::error::RelayError;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// One event observed on a relay channel.
#[derive(Debug, Clone)]
pub struct BroadcastEvent {
    pub event: String,
    pub payload: serde_json::Value,
}

/// Per-subscription transport configuration.
#[derive(Debug, Clone)]
pub struct ChannelOptions {
    /// Whether a publisher receives its own broadcasts back. Self-exclusion
    /// is transport configuration, not application logic.
    pub broadcast_self: bool,
}

impl Default for ChannelOptions {
    fn default() -> Self {
        Self {
            broadcast_self: false,
        }
    }
}

/// Publisher half of an active subscription.
#[async_trait]
pub trait RelayPublisher: Send + Sync {
    async fn publish(&self, event: &str, payload: serde_json::Value) -> Result<(), RelayError>;

    /// Drop the subscription on the transport side. Idempotent.
    async fn unsubscribe(&self);
}

/// An active subscription to one named channel: inbound events plus the
/// publisher broadcasting on the same channel.
pub struct RelaySubscription {
    pub events: mpsc::Receiver<BroadcastEvent>,
    pub publisher: Box<dyn RelayPublisher>,
}

/// Boundary to the pub/sub service relaying signaling between the two
/// participants of a room. Any transport with named broadcast channels
/// satisfies this shape; the engine never sees past it.
#[async_trait]
pub trait SignalTransport: Send + Sync {
    async fn subscribe(
        &self,
        channel: &str,
        options: ChannelOptions,
    ) -> Result<RelaySubscription, RelayError>;
}
