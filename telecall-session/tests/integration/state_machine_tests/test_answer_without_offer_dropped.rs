use telecall_core::{SessionDescription, SignalBody};
use telecall_session::{NegotiationRole, PeerConnection};

use crate::integration::init_tracing;
use crate::utils::MockPeerTransport;

#[tokio::test]
async fn test_answer_without_local_offer_is_dropped() {
    init_tracing();

    let (transport, inner) = MockPeerTransport::with_label("responder");
    let mut connection = PeerConnection::new(NegotiationRole::Responder, transport);
    connection.begin().await.expect("begin failed");

    // A responder never sent an offer, so an answer is out of sequence.
    let reply = connection
        .handle_signal(SignalBody::Answer(SessionDescription::answer("stray")))
        .await;
    assert!(reply.is_none());
    assert!(inner.remote_descriptions().is_empty());

    // The machine survives and still negotiates normally afterwards.
    let reply = connection
        .handle_signal(SignalBody::Offer(SessionDescription::offer("real-offer")))
        .await;
    assert!(matches!(reply, Some(SignalBody::Answer(_))));
    assert_eq!(
        inner.remote_descriptions(),
        vec![SessionDescription::offer("real-offer")]
    );
}
