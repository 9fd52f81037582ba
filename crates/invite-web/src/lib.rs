pub mod runner;

pub use runner::InviteRunner;

use std::cell::RefCell;

use invite_engine::{InputEvent, InviteConfig, MotionPreference};
use wasm_bindgen::prelude::*;

/// Build-time override for the RSVP messaging handle.
const RSVP_CONTACT_OVERRIDE: Option<&str> = option_env!("INVITE_RSVP_CONTACT");

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

thread_local! {
    static RUNNER: RefCell<Option<InviteRunner>> = RefCell::new(None);
    static CONFIG: RefCell<InviteConfig> = RefCell::new(InviteConfig::default());
}

/// Run `f` against the runner. Calls made before `invite_init` are logged and
/// answered with `None`.
fn with_runner<R>(f: impl FnOnce(&mut InviteRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("invitation not initialized, call invite_init() first");
                None
            }
        }
    })
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Replace the configuration used by the next `invite_init`. Invalid JSON is
/// logged and the previous configuration is kept.
#[wasm_bindgen]
pub fn invite_load_config(json: &str) -> bool {
    init_logging();
    match InviteConfig::from_json(json) {
        Ok(config) => {
            CONFIG.with(|cell| *cell.borrow_mut() = config);
            true
        }
        Err(err) => {
            log::error!("invite_load_config: {}", err);
            false
        }
    }
}

/// Mount the invitation for an explicit query string and motion preference.
#[wasm_bindgen]
pub fn invite_init(query: &str, reduced_motion: bool) {
    init_logging();

    let config = CONFIG
        .with(|cell| cell.borrow().clone())
        .with_rsvp_override(RSVP_CONTACT_OVERRIDE);
    let runner = InviteRunner::new(query, MotionPreference::from_reduced(reduced_motion), config);

    // A previous runner (hot reload, re-init) is dropped here, cancelling its timers.
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("invitation: initialized");
}

/// Mount the invitation from `window.location.search` and the
/// `prefers-reduced-motion` media query.
#[wasm_bindgen]
pub fn invite_init_from_window() {
    let Some(window) = web_sys::window() else {
        init_logging();
        log::error!("invite_init_from_window: no window");
        return;
    };
    let query = window.location().search().unwrap_or_default();
    let reduced = window
        .match_media(REDUCED_MOTION_QUERY)
        .ok()
        .flatten()
        .map(|mql| mql.matches())
        .unwrap_or(false);
    invite_init(&query, reduced);
}

#[wasm_bindgen]
pub fn invite_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

#[wasm_bindgen]
pub fn invite_unmount() {
    with_runner(|r| r.unmount());
}

// ---- Input ----

#[wasm_bindgen]
pub fn invite_toggle_audio() {
    with_runner(|r| r.push_input(InputEvent::ToggleAudio));
}

#[wasm_bindgen]
pub fn invite_play_resolved() {
    with_runner(|r| r.push_input(InputEvent::PlayResolved));
}

#[wasm_bindgen]
pub fn invite_play_rejected() {
    with_runner(|r| r.push_input(InputEvent::PlayRejected));
}

#[wasm_bindgen]
pub fn invite_dismiss_hint() {
    with_runner(|r| r.push_input(InputEvent::DismissHint));
}

// ---- Buffer accessors ----

#[wasm_bindgen]
pub fn get_state_header() -> js_sys::Float32Array {
    with_runner(|r| js_sys::Float32Array::from(&r.header()[..]))
        .unwrap_or_else(|| js_sys::Float32Array::new_with_length(0))
}

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_events_ptr() -> *const f32 {
    with_runner(|r| r.events_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_events_len() -> u32 {
    with_runner(|r| r.events_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
}

// ---- Content accessors ----

#[wasm_bindgen]
pub fn get_content_html() -> Option<String> {
    with_runner(|r| r.content_html()).flatten()
}

#[wasm_bindgen]
pub fn get_burst_json() -> Option<String> {
    with_runner(|r| r.burst_json()).flatten()
}

#[wasm_bindgen]
pub fn get_reveal_caption() -> Option<String> {
    with_runner(|r| r.reveal_caption()).flatten()
}

#[wasm_bindgen]
pub fn get_guest_name() -> Option<String> {
    with_runner(|r| r.guest_name())
}

#[wasm_bindgen]
pub fn get_audio_url() -> Option<String> {
    with_runner(|r| r.audio_url())
}

#[wasm_bindgen]
pub fn get_skin_class() -> Option<String> {
    with_runner(|r| r.skin_class())
}
