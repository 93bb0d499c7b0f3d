use telecall_core::{ConnectionState, IceCandidate, SessionDescription, SignalBody};
use telecall_session::{NegotiationRole, PeerConnection};

use crate::integration::init_tracing;
use crate::utils::{Applied, MockPeerTransport};

#[tokio::test]
async fn test_initiator_creates_offer_and_accepts_answer() {
    init_tracing();

    let (transport, inner) = MockPeerTransport::with_label("initiator");
    let mut connection = PeerConnection::new(NegotiationRole::Initiator, transport);

    let offer = connection.begin().await.expect("begin failed");
    let Some(SignalBody::Offer(offer)) = offer else {
        panic!("initiator must produce an offer");
    };
    assert_eq!(offer, SessionDescription::offer("mock-offer-initiator"));
    assert_eq!(connection.state(), ConnectionState::Connecting);
    assert_eq!(
        inner.applied(),
        vec![Applied::LocalDescription(offer.clone())]
    );

    // The remote answer completes the description exchange; candidates now
    // apply without buffering.
    let reply = connection
        .handle_signal(SignalBody::Answer(SessionDescription::answer("remote-answer")))
        .await;
    assert!(reply.is_none());
    assert_eq!(
        inner.remote_descriptions(),
        vec![SessionDescription::answer("remote-answer")]
    );

    connection
        .handle_signal(SignalBody::IceCandidate(IceCandidate {
            candidate: "candidate:1 1 udp 2130706431 192.0.2.1 54400 typ host".to_owned(),
            ..IceCandidate::default()
        }))
        .await;
    assert_eq!(connection.pending_candidates(), 0);
    assert_eq!(inner.applied_candidates().len(), 1);
}
