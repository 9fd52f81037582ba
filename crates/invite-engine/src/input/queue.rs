/// Input events the engine understands, pushed by the JS host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The music button was pressed.
    ToggleAudio,
    /// The last `play()` promise resolved.
    PlayResolved,
    /// The last `play()` promise rejected (autoplay policy, missing gesture).
    PlayRejected,
    /// The "tap to play music" hint was closed.
    DismissHint,
}

/// A queue of input events.
/// JS writes events into the queue; Rust drains them on the next tick.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(8),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain_keeps_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::ToggleAudio);
        q.push(InputEvent::PlayRejected);
        assert!(!q.is_empty());
        let events = q.drain();
        assert_eq!(events, vec![InputEvent::ToggleAudio, InputEvent::PlayRejected]);
        assert!(q.is_empty());
    }
}
