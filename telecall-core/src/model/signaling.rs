use crate::model::participant::ParticipantId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    Offer,
    Answer,
}

/// Opaque negotiation blob produced and consumed by the peer transport.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub sdp_type: SdpType,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Answer,
            sdp: sdp.into(),
        }
    }
}

/// A discovered network path toward a peer. Field names follow the
/// browser-side candidate JSON, optional fields are omitted when absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IceCandidate {
    pub candidate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdp_mid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdp_m_line_index: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username_fragment: Option<String>,
}

/// Tagged payload of a signal envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "kebab-case")]
pub enum SignalBody {
    Offer(SessionDescription),
    Answer(SessionDescription),
    IceCandidate(IceCandidate),
}

/// The only entity exchanged across the process boundary. The JSON shape
/// (`type` / `from` / `payload`) is the one bit-exact wire contract and must
/// round-trip unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignalMessage {
    pub from: ParticipantId,
    /// Carried for compatibility with direct addressing; this core only
    /// broadcasts and never sets it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<ParticipantId>,
    #[serde(flatten)]
    pub body: SignalBody,
}

impl SignalMessage {
    pub fn broadcast(from: ParticipantId, body: SignalBody) -> Self {
        Self {
            from,
            to: None,
            body,
        }
    }
}
