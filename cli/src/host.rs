//! Stand-in for the game server's UI effect API.

use damage_display_core::{ActorId, NotificationSink};
use tracing::debug;

/// Prints every UI call as the client would receive it.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn open_channel(&mut self, channel_id: u16, slot: i16, recipient: ActorId) {
        debug!(channel_id, slot, %recipient, "open_channel");
        println!("[ui] {recipient}: open effect {channel_id} (slot {slot})");
    }

    fn set_channel_text(&mut self, slot: i16, recipient: ActorId, element: &str, text: &str) {
        debug!(slot, %recipient, element, text, "set_channel_text");
        println!("[ui] {recipient}: {element} = \"{text}\"");
    }

    fn close_channel(&mut self, channel_id: u16, recipient: ActorId) {
        debug!(channel_id, %recipient, "close_channel");
        println!("[ui] {recipient}: close effect {channel_id}");
    }
}
