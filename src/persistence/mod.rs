//! Persistence for widget progress and preferences
//!
//! Features:
//! - `KeyValueStore` port (LocalStorage in the browser, in-memory for tests)
//! - Progress / acceptance / music bridge with fail-closed decoding
//! - Reset escape hatch that wipes every known key

pub mod bridge;
pub mod memory;

pub use bridge::{PersistedState, keys};
pub use memory::MemoryStore;

/// Synchronous string key-value store
///
/// Writes are best-effort: an implementation that can't persist
/// drops the write silently.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}
