//! Background music
//!
//! One looping track. Browsers refuse to start audio without a user
//! gesture, so playback is driven two ways:
//! - `MusicSync`: applies the preference shortly after it changes
//! - `GestureUnlock`: one-shot attempt on the first click/touch/key

/// Anything that can play or pause the background track
pub trait PlaybackSink {
    /// Start playback; a rejection must not surface as an error
    fn play(&mut self);
    fn pause(&mut self);
}

/// Toggle button text
pub fn toggle_label(music_on: bool) -> &'static str {
    if music_on {
        "🔈 Music On"
    } else {
        "🔇 Music Off"
    }
}

/// DOM events that count as a user gesture
pub const GESTURE_EVENTS: [&str; 3] = ["click", "touchstart", "keydown"];

/// One-shot "first interaction starts the music" capability
///
/// Armed at startup, disarmed by its first trigger regardless of outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureUnlock {
    armed: bool,
}

impl Default for GestureUnlock {
    fn default() -> Self {
        Self::armed()
    }
}

impl GestureUnlock {
    pub fn armed() -> Self {
        Self { armed: true }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Consume the capability. Returns true if playback was attempted.
    pub fn trigger<P: PlaybackSink + ?Sized>(&mut self, music_on: bool, sink: &mut P) -> bool {
        if !self.armed {
            return false;
        }
        self.armed = false;

        if music_on {
            log::debug!("First gesture: starting music");
            sink.play();
            true
        } else {
            false
        }
    }
}

/// Deferred play/pause
///
/// Each `schedule` supersedes the previous one; a timer firing with an
/// old ticket does nothing. Dropping the browser timer already cancels it,
/// the ticket is what lets native tests drive the sync without one.
#[derive(Debug, Clone, Default)]
pub struct MusicSync {
    generation: u64,
    pending: Option<(u64, bool)>,
}

impl MusicSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `music_on` to be applied; returns the ticket the timer must present
    pub fn schedule(&mut self, music_on: bool) -> u64 {
        self.generation += 1;
        self.pending = Some((self.generation, music_on));
        self.generation
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Apply the pending preference if `ticket` is still current
    pub fn fire<P: PlaybackSink + ?Sized>(&mut self, ticket: u64, sink: &mut P) -> bool {
        match self.pending {
            Some((generation, music_on)) if generation == ticket => {
                self.pending = None;
                if music_on {
                    sink.play();
                } else {
                    sink.pause();
                }
                log::debug!("Music sync applied (on: {music_on})");
                true
            }
            _ => false,
        }
    }
}

/// `<audio>` element backed sink (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct HtmlAudioSink {
    element: web_sys::HtmlAudioElement,
}

#[cfg(target_arch = "wasm32")]
impl HtmlAudioSink {
    /// Create a detached, looping, preloaded audio element
    pub fn new(src: &str) -> Option<Self> {
        let element = match web_sys::HtmlAudioElement::new_with_src(src) {
            Ok(element) => element,
            Err(e) => {
                log::warn!("Failed to create audio element - music disabled: {:?}", e);
                return None;
            }
        };
        element.set_loop(true);
        element.set_preload("auto");
        Some(Self { element })
    }
}

#[cfg(target_arch = "wasm32")]
impl PlaybackSink for HtmlAudioSink {
    fn play(&mut self) {
        match self.element.play() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                        log::debug!("Audio play failed: {:?}", e);
                    }
                });
            }
            Err(e) => log::debug!("Audio play failed: {:?}", e),
        }
    }

    fn pause(&mut self) {
        let _ = self.element.pause();
    }
}

/// Sink used when audio can't be created
#[derive(Debug, Default)]
pub struct SilentSink;

impl PlaybackSink for SilentSink {
    fn play(&mut self) {}
    fn pause(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl PlaybackSink for Recorder {
        fn play(&mut self) {
            self.calls.push("play");
        }
        fn pause(&mut self) {
            self.calls.push("pause");
        }
    }

    #[test]
    fn test_gesture_unlock_fires_once() {
        let mut unlock = GestureUnlock::armed();
        let mut sink = Recorder::default();

        assert!(unlock.trigger(true, &mut sink));
        assert!(!unlock.is_armed());
        assert!(!unlock.trigger(true, &mut sink));
        assert_eq!(sink.calls, vec!["play"]);
    }

    #[test]
    fn test_gesture_unlock_disarms_when_muted() {
        let mut unlock = GestureUnlock::armed();
        let mut sink = Recorder::default();

        assert!(!unlock.trigger(false, &mut sink));
        assert!(!unlock.is_armed());
        assert!(!unlock.trigger(true, &mut sink));
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_sync_applies_latest_only() {
        let mut sync = MusicSync::new();
        let mut sink = Recorder::default();

        let first = sync.schedule(false);
        let second = sync.schedule(true);
        assert!(!sync.fire(first, &mut sink));
        assert!(sync.has_pending());
        assert!(sync.fire(second, &mut sink));
        assert!(!sync.has_pending());
        assert_eq!(sink.calls, vec!["play"]);

        // Already applied
        assert!(!sync.fire(second, &mut sink));
    }

    #[test]
    fn test_sync_pause() {
        let mut sync = MusicSync::new();
        let mut sink = Recorder::default();
        let ticket = sync.schedule(false);
        sync.fire(ticket, &mut sink);
        assert_eq!(sink.calls, vec!["pause"]);
    }

    #[test]
    fn test_toggle_label() {
        assert_eq!(toggle_label(true), "🔈 Music On");
        assert_eq!(toggle_label(false), "🔇 Music Off");
    }
}
