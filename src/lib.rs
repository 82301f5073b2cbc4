//! Valentine Proposal - a single-page "will you be my valentine?" widget
//!
//! Core modules:
//! - `proposal`: Refusal escalation state machine and the widget that owns it
//! - `persistence`: Key-value store port and the LocalStorage bridge
//! - `config`: Launch configuration parsed from the query string
//! - `audio`: Background music preference, deferred sync, gesture unlock
//! - `celebration`: Timed confetti burst sequence
//! - `share`: Messaging deep-link builder
//! - `ui`: View models computed from widget state
//! - `platform`: Browser/native platform abstraction

pub mod audio;
pub mod celebration;
pub mod config;
pub mod persistence;
pub mod platform;
pub mod proposal;
pub mod share;
pub mod ui;

pub use config::LaunchConfig;
pub use persistence::{KeyValueStore, MemoryStore, PersistedState};
pub use proposal::{Action, ProposalState, ProposalWidget, View, WidgetEvent};

use rand::Rng;

/// Widget configuration constants
pub mod consts {
    /// Refusal button labels, in escalation order
    pub const REFUSAL_MESSAGES: [&str; 6] = [
        "NO",
        "Really sure??",
        "Pookie please 🥺",
        "Just think about it",
        "Don't break my heart 💔",
        "Last chance 😭",
    ];
    /// Index of the final refusal message (button pins, YES takes over)
    pub const LAST_REFUSAL_INDEX: u8 = (REFUSAL_MESSAGES.len() - 1) as u8;

    /// YES button grows by this much per refusal
    pub const YES_SCALE_STEP: f32 = 2.0;
    /// YES button scale once the last refusal message is showing
    pub const YES_OVERLAY_SCALE: f32 = 50.0;

    /// Space kept free on the right/bottom so the NO button stays on screen
    pub const REFUSAL_MARGIN_X: f32 = 200.0;
    pub const REFUSAL_MARGIN_Y: f32 = 100.0;

    /// Name shown when `?name=` is missing
    pub const DEFAULT_NAME: &str = "My Love";
    /// `?reset=` value that wipes saved progress
    pub const RESET_VALUE: &str = "true";

    /// Background track (looped)
    pub const MUSIC_SRC: &str = "music/valentine.mp3";
    /// Delay before a preference change is applied to the audio element (ms)
    pub const MUSIC_SYNC_DELAY_MS: u32 = 100;

    /// Confetti sequence length (ms)
    pub const CELEBRATION_DURATION_MS: f64 = 3000.0;
    /// Confetti emission cadence (ms)
    pub const CELEBRATION_INTERVAL_MS: u32 = 30;
    /// Particles per burst
    pub const BURST_PARTICLES: u32 = 3;
    /// Pink, red, white, light purple
    pub const CELEBRATION_COLORS: [&str; 4] = ["#ec4899", "#ef4444", "#ffffff", "#f5d0fe"];

    /// Fallback viewport when the window size can't be read
    pub const FALLBACK_VIEWPORT: (f32, f32) = (1280.0, 720.0);
}

/// Uniform sample in `[min, max)`
#[inline]
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    rng.random::<f32>() * (max - min) + min
}
