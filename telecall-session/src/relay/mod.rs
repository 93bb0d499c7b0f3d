mod local_relay;
mod relay_client;
mod transport;

pub use local_relay::LocalRelay;
pub use relay_client::{RelayClient, SIGNAL_EVENT};
pub use transport::{
    BroadcastEvent, ChannelOptions, RelayPublisher, RelaySubscription, SignalTransport,
};
