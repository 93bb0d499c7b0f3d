use telecall_core::{IceCandidate, SessionDescription, SignalBody};
use telecall_session::{NegotiationRole, PeerConnection};

use crate::integration::init_tracing;
use crate::utils::{Applied, MockPeerTransport};

fn candidate(n: u16) -> IceCandidate {
    IceCandidate {
        candidate: format!("candidate:{n} 1 udp 2130706431 192.0.2.{n} 54400 typ host"),
        sdp_mid: Some("0".to_owned()),
        sdp_m_line_index: Some(0),
        username_fragment: None,
    }
}

#[tokio::test]
async fn test_candidates_buffer_until_remote_description_then_flush_in_order() {
    init_tracing();

    let (transport, inner) = MockPeerTransport::with_label("responder");
    let mut connection = PeerConnection::new(NegotiationRole::Responder, transport);
    connection.begin().await.expect("begin failed");

    // Candidates race ahead of the offer: nothing may reach the transport.
    connection
        .handle_signal(SignalBody::IceCandidate(candidate(1)))
        .await;
    connection
        .handle_signal(SignalBody::IceCandidate(candidate(2)))
        .await;
    assert!(inner.applied().is_empty());
    assert_eq!(connection.pending_candidates(), 2);

    // The offer lands: remote description first, then the buffered
    // candidates in arrival order, then the local answer.
    let reply = connection
        .handle_signal(SignalBody::Offer(SessionDescription::offer("remote-offer")))
        .await;
    assert!(matches!(reply, Some(SignalBody::Answer(_))));
    assert_eq!(connection.pending_candidates(), 0);

    let applied = inner.applied();
    assert_eq!(
        applied,
        vec![
            Applied::RemoteDescription(SessionDescription::offer("remote-offer")),
            Applied::Candidate(candidate(1)),
            Applied::Candidate(candidate(2)),
            Applied::LocalDescription(SessionDescription::answer("mock-answer-responder")),
        ]
    );

    // With the remote description in place, further candidates apply
    // immediately and the buffer stays empty.
    connection
        .handle_signal(SignalBody::IceCandidate(candidate(3)))
        .await;
    assert_eq!(connection.pending_candidates(), 0);
    assert_eq!(inner.applied_candidates().len(), 3);
}
