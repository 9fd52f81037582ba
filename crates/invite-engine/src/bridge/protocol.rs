/// Shared layout between the engine and the JS host.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values f32):
/// ```text
/// [Header: 8 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// The header is rewritten every frame; events only hold what happened
/// during the last tick.

use crate::api::types::InviteEvent;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_PHASE: usize = 1;
pub const HEADER_IS_PLAYING: usize = 2;
pub const HEADER_AUTOPLAY_BLOCKED: usize = 3;
pub const HEADER_HINT_VISIBLE: usize = 4;
pub const HEADER_SEATS: usize = 5;
pub const HEADER_CONTENT_READY: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Event kinds. Payload noted where used.
pub const EVENT_PHASE_CHANGED: u32 = 1; // a = RevealPhase::index()
pub const EVENT_REVEAL_COMPLETE: u32 = 2;
pub const EVENT_CONTENT_READY: u32 = 3;
pub const EVENT_AUDIO_PLAY: u32 = 4;
pub const EVENT_AUDIO_PAUSE: u32 = 5;
pub const EVENT_HINT_CHANGED: u32 = 6; // a = 1.0 visible, 0.0 hidden
pub const EVENT_SEAL_BURST: u32 = 7; // host fetches the layout JSON

/// Upper bound on events one frame can emit: every phase change, the seal
/// burst, then the hand-over trio.
pub const MIN_EVENT_CAPACITY: usize = 8;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_events: usize,
    pub event_data_offset: usize,
    pub event_data_floats: usize,
    pub buffer_total_floats: usize,
}

impl ProtocolLayout {
    pub fn new(max_events: usize) -> Self {
        let event_data_floats = max_events * InviteEvent::FLOATS;
        Self {
            max_events,
            event_data_offset: HEADER_FLOATS,
            event_data_floats,
            buffer_total_floats: HEADER_FLOATS + event_data_floats,
        }
    }
}

/// Bounded per-frame event list. Overflow is dropped, not grown.
#[derive(Debug)]
pub struct EventBuffer {
    events: Vec<InviteEvent>,
    capacity: usize,
    dropped: usize,
}

impl EventBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: InviteEvent) {
        if self.events.len() < self.capacity {
            self.events.push(event);
        } else {
            self.dropped += 1;
            log::warn!("event buffer full, dropping kind {}", event.kind());
        }
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }

    pub fn as_slice(&self) -> &[InviteEvent] {
        &self.events
    }

    /// Events flattened to floats for the host.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events lost to overflow since the last clear.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_offsets() {
        let layout = ProtocolLayout::new(32);
        assert_eq!(layout.event_data_offset, HEADER_FLOATS);
        assert_eq!(layout.event_data_floats, 128);
        assert_eq!(layout.buffer_total_floats, 136);
    }

    #[test]
    fn overflow_is_dropped() {
        let mut buf = EventBuffer::with_capacity(2);
        for _ in 0..3 {
            buf.push(InviteEvent::new(EVENT_AUDIO_PLAY));
        }
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.dropped(), 1);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.dropped(), 0);
    }

    #[test]
    fn floats_view() {
        let mut buf = EventBuffer::with_capacity(4);
        buf.push(InviteEvent::new(EVENT_PHASE_CHANGED).with_a(2.0));
        assert_eq!(buf.as_floats(), &[1.0, 2.0, 0.0, 0.0]);
    }
}
