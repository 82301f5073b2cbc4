//! Bridge between widget state and the key-value store
//!
//! Values are stored as JSON scalars (`"3"`, `"true"`), which is also what
//! a plain `toString()` writes, so older saves decode unchanged. Progress
//! goes through `serde_json`; the two flags are plain string compares.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::KeyValueStore;
use crate::consts::LAST_REFUSAL_INDEX;

/// Storage keys
pub mod keys {
    /// Refusal progress (integer)
    pub const PROGRESS: &str = "noCount";
    /// Acceptance flag (bool)
    pub const ACCEPTED: &str = "hasSaidYes";
    /// Music preference (bool)
    pub const MUSIC: &str = "musicPlaying";

    pub const ALL: [&str; 3] = [PROGRESS, ACCEPTED, MUSIC];
}

/// Authoritative state restored at load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistedState {
    pub progress: u8,
    pub accepted: bool,
    pub music_on: bool,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            progress: 0,
            accepted: false,
            music_on: true,
        }
    }
}

impl PersistedState {
    /// Read all keys, falling back per field on anything missing or malformed
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        // Flags match the exact string "true"; anything else stored means false
        let accepted = store.get(keys::ACCEPTED).as_deref() == Some("true");

        // Progress is meaningless once accepted
        let progress = if accepted {
            0
        } else {
            read::<u8, _>(store, keys::PROGRESS)
                .filter(|p| *p <= LAST_REFUSAL_INDEX)
                .unwrap_or(0)
        };

        let music_on = store.get(keys::MUSIC).is_none_or(|v| v == "true");

        Self {
            progress,
            accepted,
            music_on,
        }
    }
}

/// Persist refusal progress
pub fn save_progress<S: KeyValueStore + ?Sized>(store: &mut S, progress: u8) {
    write(store, keys::PROGRESS, &progress);
}

/// Persist the acceptance flag and drop stale progress
pub fn record_acceptance<S: KeyValueStore + ?Sized>(store: &mut S) {
    write(store, keys::ACCEPTED, &true);
    store.remove(keys::PROGRESS);
    log::info!("Acceptance saved");
}

/// Persist the music preference
pub fn save_music<S: KeyValueStore + ?Sized>(store: &mut S, music_on: bool) {
    write(store, keys::MUSIC, &music_on);
}

/// Remove every key this widget owns
pub fn wipe<S: KeyValueStore + ?Sized>(store: &mut S) {
    for key in keys::ALL {
        store.remove(key);
    }
    log::info!("Saved progress wiped");
}

fn read<T: DeserializeOwned, S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(raw.trim()) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("Ignoring malformed {key}={raw:?}: {e}");
            None
        }
    }
}

fn write<T: Serialize, S: KeyValueStore + ?Sized>(store: &mut S, key: &str, value: &T) {
    if let Ok(json) = serde_json::to_string(value) {
        store.set(key, &json);
    }
}
