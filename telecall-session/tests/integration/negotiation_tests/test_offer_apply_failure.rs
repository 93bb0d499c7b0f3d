use std::time::Duration;
use telecall_core::ConnectionState;
use telecall_session::{CallError, PeerError};

use crate::integration::TestBed;
use crate::utils::{wait_for_snapshot, wait_until};

/// When applying the local offer fails mid-setup, everything built so far is
/// torn down again: transport closed, media released, no offer broadcast.
#[tokio::test]
async fn test_offer_apply_failure() {
    let bed = TestBed::new();
    let mut observer = bed.observe("appt-19").await;

    bed.peers
        .fail_first_op_with(PeerError::Transport("sdp rejected".to_owned()));

    let alice = bed.spawn_call("appt-19", "alice");
    alice.start_call().await;

    let snapshot = wait_for_snapshot(&alice, |s| s.error.is_some())
        .await
        .expect("failure never surfaced");
    assert_eq!(
        snapshot.error,
        Some(CallError::Peer(PeerError::Transport(
            "sdp rejected".to_owned()
        )))
    );
    assert_eq!(snapshot.connection, ConnectionState::Idle);
    assert!(snapshot.local_stream.is_none());

    let peer = bed.peers.peer(0);
    wait_until(|| peer.is_closed())
        .await
        .expect("transport never closed");
    assert!(peer.applied().is_empty());
    assert_eq!(bed.devices.tracks_running(), 0);

    let heard = tokio::time::timeout(Duration::from_millis(200), observer.events.recv()).await;
    assert!(heard.is_err());
}
