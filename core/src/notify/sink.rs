use crate::actor::ActorId;

/// The host's UI effect API.
///
/// Calls are fire-and-forget: a failure (e.g. the client dropped mid-call)
/// is the host's problem and is never reported back.
pub trait NotificationSink {
    /// Attach the counter element to `recipient`'s client. Idempotent on the host side.
    fn open_channel(&mut self, channel_id: u16, slot: i16, recipient: ActorId);

    /// Overwrite the text of an element on an already-open channel.
    fn set_channel_text(&mut self, slot: i16, recipient: ActorId, element: &str, text: &str);

    /// Tear down the counter element on `recipient`'s client.
    fn close_channel(&mut self, channel_id: u16, recipient: ActorId);
}

impl<S: NotificationSink + ?Sized> NotificationSink for Box<S> {
    fn open_channel(&mut self, channel_id: u16, slot: i16, recipient: ActorId) {
        (**self).open_channel(channel_id, slot, recipient);
    }

    fn set_channel_text(&mut self, slot: i16, recipient: ActorId, element: &str, text: &str) {
        (**self).set_channel_text(slot, recipient, element, text);
    }

    fn close_channel(&mut self, channel_id: u16, recipient: ActorId) {
        (**self).close_channel(channel_id, recipient);
    }
}

/// Channel identifiers derived from the configured effect id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelIds {
    pub channel_id: u16,
    pub slot: i16,
}

impl ChannelIds {
    /// The slot key is `i16::MAX - base`, which always fits an `i16` for a `u16` base.
    pub fn from_base(base: u16) -> Self {
        let slot = i32::from(i16::MAX) - i32::from(base);
        Self {
            channel_id: base,
            slot: i16::try_from(slot).unwrap_or(i16::MIN),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_derivation() {
        assert_eq!(ChannelIds::from_base(0).slot, i16::MAX);
        assert_eq!(ChannelIds::from_base(51292).slot, -18525);
        assert_eq!(ChannelIds::from_base(u16::MAX).slot, i16::MIN);
        assert_eq!(ChannelIds::from_base(51292).channel_id, 51292);
    }
}
