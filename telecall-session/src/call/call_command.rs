/// Commands from the public handle into the call actor.
#[derive(Debug)]
pub enum CallCommand {
    /// Start as the initiating side: acquire media, join the room, broadcast
    /// an offer.
    Start,
    /// Join as the responding side: acquire media, join the room, wait for
    /// the offer.
    Join,
    /// Tear the call down and reset all observable state.
    End,
    ToggleAudio,
    ToggleVideo,
}
