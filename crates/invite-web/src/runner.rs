use std::time::Duration;

use invite_engine::{
    InputEvent, InputQueue, Invitation, InviteConfig, MotionPreference, ProtocolLayout,
    Scheduler, HEADER_FLOATS,
};

/// Wires the invitation to the host's frame loop.
///
/// The host calls [`tick`](InviteRunner::tick) from `requestAnimationFrame`,
/// then reads the state header and this frame's events. Buffers are also
/// valid right after construction, which matters under reduced motion: the
/// hand-over happens inside `new`.
pub struct InviteRunner {
    scheduler: Scheduler,
    invitation: Invitation,
    input: InputQueue,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
}

impl InviteRunner {
    pub fn new(query: &str, motion: MotionPreference, config: InviteConfig) -> Self {
        let scheduler = Scheduler::new();
        let layout = ProtocolLayout::new(config.max_events);
        let invitation = Invitation::mount(query, motion, config, &scheduler);

        let mut runner = Self {
            scheduler,
            invitation,
            input: InputQueue::new(),
            layout,
            header: [0.0; HEADER_FLOATS],
        };
        runner.invitation.write_header(&mut runner.header);
        runner
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fire due timers, apply queued input, refresh the header.
    /// `dt` is in seconds; negative or non-finite values count as zero.
    pub fn tick(&mut self, dt: f32) {
        self.invitation.begin_frame();

        let dt = Duration::try_from_secs_f32(dt.max(0.0)).unwrap_or_default();
        let fired = self.scheduler.advance(dt);
        self.invitation.on_timers(&fired);

        let input = self.input.drain();
        self.invitation.handle_input(&input);

        self.invitation.write_header(&mut self.header);
    }

    /// The page is going away. Cancels a running intro.
    pub fn unmount(&mut self) {
        self.invitation.unmount();
        self.invitation.write_header(&mut self.header);
    }

    pub fn invitation(&self) -> &Invitation {
        &self.invitation
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    // ---- Buffer accessors for the host ----

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.invitation.events().as_floats().as_ptr()
    }

    pub fn events_len(&self) -> u32 {
        self.invitation.events().len() as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    // ---- Content accessors ----

    pub fn content_html(&self) -> Option<String> {
        self.invitation.content_html()
    }

    pub fn burst_json(&self) -> Option<String> {
        self.invitation.burst_json()
    }

    pub fn audio_url(&self) -> String {
        self.invitation.config().content.audio_url.clone()
    }

    pub fn guest_name(&self) -> String {
        self.invitation.guest().name.clone()
    }

    pub fn reveal_caption(&self) -> Option<String> {
        self.invitation.reveal_view().map(|v| v.caption.to_string())
    }

    pub fn skin_class(&self) -> String {
        self.invitation.config().skin.css_class().to_string()
    }
}
