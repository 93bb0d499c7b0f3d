use crate::error::RelayError;
use crate::relay::transport::{
    BroadcastEvent, ChannelOptions, RelayPublisher, RelaySubscription, SignalTransport,
};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tracing::debug;

const EVENT_QUEUE_DEPTH: usize = 64;

struct Subscriber {
    id: u64,
    tx: mpsc::Sender<BroadcastEvent>,
}

#[derive(Default)]
struct RelayInner {
    channels: DashMap<String, Vec<Subscriber>>,
    next_id: AtomicU64,
}

impl RelayInner {
    fn remove_subscriber(&self, channel: &str, id: u64) {
        let mut emptied = false;
        if let Some(mut subscribers) = self.channels.get_mut(channel) {
            subscribers.retain(|s| s.id != id);
            emptied = subscribers.is_empty();
        }
        // A channel with no subscribers is gone; rooms are ephemeral.
        if emptied {
            self.channels.remove_if(channel, |_, subs| subs.is_empty());
        }
    }
}

/// In-process pub/sub transport used by tests and demos. A channel comes into
/// existence with its first subscriber and disappears with its last one.
#[derive(Clone, Default)]
pub struct LocalRelay {
    inner: Arc<RelayInner>,
}

impl LocalRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn channel_count(&self) -> usize {
        self.inner.channels.len()
    }
}

#[async_trait]
impl SignalTransport for LocalRelay {
    async fn subscribe(
        &self,
        channel: &str,
        options: ChannelOptions,
    ) -> Result<RelaySubscription, RelayError> {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        self.inner
            .channels
            .entry(channel.to_owned())
            .or_default()
            .push(Subscriber { id, tx });
        debug!(channel, id, "Relay subscriber joined");

        Ok(RelaySubscription {
            events: rx,
            publisher: Box::new(LocalPublisher {
                inner: self.inner.clone(),
                channel: channel.to_owned(),
                id,
                broadcast_self: options.broadcast_self,
            }),
        })
    }
}

struct LocalPublisher {
    inner: Arc<RelayInner>,
    channel: String,
    id: u64,
    broadcast_self: bool,
}

#[async_trait]
impl RelayPublisher for LocalPublisher {
    async fn publish(&self, event: &str, payload: serde_json::Value) -> Result<(), RelayError> {
        // Senders are collected before awaiting so no map guard is held
        // across a suspension point.
        let targets: Vec<mpsc::Sender<BroadcastEvent>> = match self.inner.channels.get(&self.channel)
        {
            Some(subscribers) => subscribers
                .iter()
                .filter(|s| self.broadcast_self || s.id != self.id)
                .map(|s| s.tx.clone())
                .collect(),
            None => return Err(RelayError::Closed),
        };

        let event = BroadcastEvent {
            event: event.to_owned(),
            payload,
        };
        for tx in targets {
            let _ = tx.send(event.clone()).await;
        }
        Ok(())
    }

    async fn unsubscribe(&self) {
        self.inner.remove_subscriber(&self.channel, self.id);
        debug!(channel = %self.channel, id = self.id, "Relay subscriber left");
    }
}
