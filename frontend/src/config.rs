use log::Level;

// Hero carousel
pub const CAROUSEL_INTERVAL_MS: u32 = 4_500;
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

// Countdown
pub const COUNTDOWN_PERIOD_MS: u32 = 1_000;
pub const PULSE_MS: u32 = 300;
pub const COUNTDOWN_ENDED_MESSAGE: &str = "Event has started!";

// Scroll reveal and counters
pub const REVEAL_THRESHOLD: f64 = 0.12;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -40px 0px";
pub const COUNTER_THRESHOLD: f64 = 0.3;
pub const COUNTER_DURATION_MS: f64 = 2_000.0;

// Toast
pub const TOAST_VISIBLE_MS: u32 = 5_000;
pub const TOAST_EXIT_MS: u32 = 300;

// Page chrome
pub const HEADER_COMPACT_AFTER_PX: f64 = 60.0;
pub const ANCHOR_SCROLL_OFFSET_PX: f64 = 80.0;
pub const NAV_SECTION_OFFSET_PX: f64 = 100.0;
pub const PARTICLE_COUNT: usize = 20;
pub const DEFAULT_PARALLAX_INTENSITY: f64 = 8.0;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}
