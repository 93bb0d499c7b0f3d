use serde::{Deserialize, Serialize};

/// Lifecycle of one peer connection. Owned by the connection state machine
/// and mutated only in response to transport events; `Idle` is the state of a
/// freshly created (or fully torn down) connection, `Connecting` covers the
/// whole negotiation. A `Disconnected`/`Failed` machine does not self-recover;
/// the orchestrator discards it and may build a fresh one.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Idle,
    Connecting,
    Connected,
    Disconnected,
    Failed,
}

impl ConnectionState {
    pub fn is_connected(self) -> bool {
        self == ConnectionState::Connected
    }
}
