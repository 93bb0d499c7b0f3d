use telecall_core::ConnectionState;
use telecall_session::{Connectivity, RemoteStream, TransportEvent};

use crate::integration::TestBed;
use crate::utils::{settle, wait_for_snapshot};

/// Events from a torn-down call's transport must never reach a later call
/// on the same actor: each attempt listens on its own event channel.
#[tokio::test]
async fn test_stale_transport_events_dropped() {
    let bed = TestBed::new();
    let alice = bed.spawn_call("appt-13", "alice");

    alice.start_call().await;
    wait_for_snapshot(&alice, |s| s.local_stream.is_some())
        .await
        .expect("first call did not come up");
    let first_events = bed.peers.peer(0).event_sender();

    alice.end_call().await;
    wait_for_snapshot(&alice, |s| s.is_idle())
        .await
        .expect("snapshot never reset");

    alice.start_call().await;
    wait_for_snapshot(&alice, |s| s.local_stream.is_some())
        .await
        .expect("second call did not come up");

    // The closed transport's callbacks fire late; both events go nowhere.
    let _ = first_events
        .send(TransportEvent::RemoteStream(RemoteStream::new(
            "stale",
            Vec::new(),
        )))
        .await;
    let _ = first_events
        .send(TransportEvent::StateChanged(Connectivity::Failed))
        .await;

    settle().await;
    let snapshot = alice.snapshot();
    assert_eq!(snapshot.connection, ConnectionState::Connecting);
    assert!(snapshot.remote_stream.is_none());

    // The live transport's channel still reaches the call.
    bed.peers
        .peer(1)
        .event_sender()
        .send(TransportEvent::StateChanged(Connectivity::Connected))
        .await
        .expect("live event channel closed");
    wait_for_snapshot(&alice, |s| s.connection == ConnectionState::Connected)
        .await
        .expect("second call never connected");

    alice.end_call().await;
}
