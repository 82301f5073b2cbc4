//! Widget state and the events it emits
//!
//! Only `progress`, `accepted` and `music_on` are authoritative; everything
//! the page shows is derived from them (see `layout` and `crate::ui`).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LAST_REFUSAL_INDEX, REFUSAL_MESSAGES};
use crate::persistence::PersistedState;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    /// The question with YES / NO buttons
    Prompt,
    /// After YES, for good
    Success,
}

/// Something that changed during a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WidgetEvent {
    /// NO was pressed, progress is now `index`
    Refused { index: u8 },
    /// NO button jumped to a new spot
    RefusalMoved { to: Vec2 },
    /// YES was pressed (emitted once, ever)
    Accepted,
    /// Music preference flipped
    MusicToggled { on: bool },
}

/// Complete widget state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalState {
    /// Index into `REFUSAL_MESSAGES`
    pub progress: u8,
    /// One-way acceptance flag
    pub accepted: bool,
    /// Background music preference
    pub music_on: bool,
    /// NO button offset in pixels (not persisted)
    #[serde(skip)]
    pub refusal_pos: Vec2,
}

impl Default for ProposalState {
    fn default() -> Self {
        Self::from_persisted(&PersistedState::default())
    }
}

impl ProposalState {
    pub fn from_persisted(saved: &PersistedState) -> Self {
        Self {
            progress: saved.progress.min(LAST_REFUSAL_INDEX),
            accepted: saved.accepted,
            music_on: saved.music_on,
            refusal_pos: Vec2::ZERO,
        }
    }

    pub fn view(&self) -> View {
        if self.accepted {
            View::Success
        } else {
            View::Prompt
        }
    }

    /// Current NO button label
    pub fn refusal_message(&self) -> &'static str {
        REFUSAL_MESSAGES[usize::from(self.progress.min(LAST_REFUSAL_INDEX))]
    }

    /// Whether the final message is showing
    pub fn is_last_chance(&self) -> bool {
        self.progress == LAST_REFUSAL_INDEX
    }
}
