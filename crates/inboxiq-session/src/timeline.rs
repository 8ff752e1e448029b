use inboxiq_core::{Channel, ChatMessage};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimelineEntry {
    pub channel: Channel,
    pub message: ChatMessage,
}

/// Interleaves both channels' conversations by timestamp. Equal timestamps
/// keep email before calendar and each channel's own order.
pub fn merge_timeline(email: &[ChatMessage], calendar: &[ChatMessage]) -> Vec<TimelineEntry> {
    let mut entries = email
        .iter()
        .map(|message| (Channel::Email, message))
        .chain(calendar.iter().map(|message| (Channel::Calendar, message)))
        .map(|(channel, message)| TimelineEntry {
            channel,
            message: message.clone(),
        })
        .collect::<Vec<_>>();
    entries.sort_by_key(|entry| entry.message.timestamp);
    entries
}
