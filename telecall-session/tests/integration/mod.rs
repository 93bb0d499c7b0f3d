
use std::sync::Arc;
use tracing::Level;

use telecall_session::{
    CallConfig, CallHandle, CallOrchestrator, ChannelOptions, LocalRelay, RelaySubscription,
    SignalTransport,
};

use crate::utils::{MockDevices, MockPeerFactory};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Shared fixture: one in-process relay plus mock devices and transports.
pub struct TestBed {
    pub relay: LocalRelay,
    pub devices: Arc<MockDevices>,
    pub peers: Arc<MockPeerFactory>,
}

impl TestBed {
    pub fn new() -> Self {
        init_tracing();
        Self {
            relay: LocalRelay::new(),
            devices: MockDevices::new(),
            peers: MockPeerFactory::new(),
        }
    }

    pub fn spawn_call(&self, room: &str, identity: &str) -> CallHandle {
        CallOrchestrator::spawn(
            CallConfig::new(room, identity),
            self.devices.clone(),
            Arc::new(self.relay.clone()),
            self.peers.clone(),
        )
    }

    /// Raw subscription on a room channel, seeing every broadcast including
    /// its own.
    pub async fn observe(&self, room: &str) -> RelaySubscription {
        self.relay
            .subscribe(
                &format!("video-call:{room}"),
                ChannelOptions {
                    broadcast_self: true,
                },
            )
            .await
            .expect("local relay subscribe failed")
    }
}

/// Publish a signaling message into the room as if a remote peer sent it.
pub async fn publish_signal(observer: &RelaySubscription, message: &telecall_core::SignalMessage) {
    let payload = serde_json::to_value(message).expect("signal serialization failed");
    observer
        .publisher
        .publish(telecall_session::SIGNAL_EVENT, payload)
        .await
        .expect("publish failed");
}

/// Next decoded signaling message seen by the observer.
pub async fn next_signal(observer: &mut RelaySubscription) -> Option<telecall_core::SignalMessage> {
    loop {
        let event = tokio::time::timeout(
            std::time::Duration::from_millis(crate::utils::SNAPSHOT_TIMEOUT_MS),
            observer.events.recv(),
        )
        .await
        .ok()??;
        if event.event == telecall_session::SIGNAL_EVENT {
            return serde_json::from_value(event.payload).ok();
        }
    }
}
