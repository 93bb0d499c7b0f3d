/// ICE configuration for the native transport.
#[derive(Debug, Clone)]
pub struct RtcConfig {
    pub ice_servers: Vec<String>,
}

impl Default for RtcConfig {
    fn default() -> Self {
        Self {
            ice_servers: vec![
                "stun:stun.l.google.com:19302".to_owned(),
                "stun:stun1.l.google.com:19302".to_owned(),
            ],
        }
    }
}

impl RtcConfig {
    /// Host-candidates-only configuration, enough for loopback calls.
    pub fn no_ice_servers() -> Self {
        Self {
            ice_servers: Vec::new(),
        }
    }
}
