//! The proposal widget: state + store + RNG
//!
//! Owns the authoritative state and writes every change through to the
//! injected store, so a reload always lands on the same screen.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::state::{ProposalState, View, WidgetEvent};
use super::step::{Action, step};
use crate::config::LaunchConfig;
use crate::persistence::{KeyValueStore, PersistedState, bridge};
use crate::ui::{self, PromptView, SuccessView};

pub struct ProposalWidget<S: KeyValueStore> {
    state: ProposalState,
    config: LaunchConfig,
    store: S,
    rng: Pcg32,
    viewport: Vec2,
}

impl<S: KeyValueStore> ProposalWidget<S> {
    /// Restore saved state and build the widget
    pub fn mount(config: LaunchConfig, store: S, seed: u64, viewport: Vec2) -> Self {
        let saved = PersistedState::load(&store);
        let state = ProposalState::from_persisted(&saved);
        log::info!(
            "Mounted in {:?} view (progress {}, music {})",
            state.view(),
            state.progress,
            if state.music_on { "on" } else { "off" }
        );

        Self {
            state,
            config,
            store,
            rng: Pcg32::seed_from_u64(seed),
            viewport,
        }
    }

    /// Apply an action and persist whatever it changed
    pub fn dispatch(&mut self, action: Action) -> Vec<WidgetEvent> {
        let events = step(&mut self.state, action, self.viewport, &mut self.rng);

        for event in &events {
            match *event {
                WidgetEvent::Refused { index } => {
                    log::debug!("Refusal #{index}: {:?}", self.state.refusal_message());
                    bridge::save_progress(&mut self.store, index);
                }
                WidgetEvent::RefusalMoved { to } => {
                    log::debug!("NO button moved to ({}, {})", to.x, to.y);
                }
                WidgetEvent::Accepted => {
                    log::info!("{} said yes!", self.config.display_name);
                    bridge::record_acceptance(&mut self.store);
                }
                WidgetEvent::MusicToggled { on } => {
                    bridge::save_music(&mut self.store, on);
                }
            }
        }

        events
    }

    pub fn refuse(&mut self) -> Vec<WidgetEvent> {
        self.dispatch(Action::Refuse)
    }

    pub fn accept(&mut self) -> Vec<WidgetEvent> {
        self.dispatch(Action::Accept)
    }

    pub fn toggle_music(&mut self) -> Vec<WidgetEvent> {
        self.dispatch(Action::ToggleMusic)
    }

    /// Track window resizes (affects the next NO jump only)
    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    pub fn state(&self) -> &ProposalState {
        &self.state
    }

    pub fn config(&self) -> &LaunchConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> View {
        self.state.view()
    }

    pub fn prompt_view(&self) -> PromptView {
        ui::prompt_view(&self.state, &self.config)
    }

    pub fn success_view(&self) -> SuccessView {
        ui::success_view(&self.state, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LAST_REFUSAL_INDEX;
    use crate::persistence::{MemoryStore, keys};

    const VIEWPORT: Vec2 = Vec2::new(1024.0, 768.0);

    fn mount(store: MemoryStore, query: &str) -> ProposalWidget<MemoryStore> {
        ProposalWidget::mount(LaunchConfig::from_query(query), store, 42, VIEWPORT)
    }

    #[test]
    fn test_fresh_mount_shows_prompt() {
        let widget = mount(MemoryStore::new(), "");
        assert_eq!(widget.view(), View::Prompt);
        assert_eq!(widget.state().progress, 0);
        assert!(widget.state().music_on);
        assert!(widget.store().is_empty());
    }

    #[test]
    fn test_refusals_are_persisted() {
        let mut widget = mount(MemoryStore::new(), "");
        widget.refuse();
        widget.refuse();
        assert_eq!(widget.store().get(keys::PROGRESS).as_deref(), Some("2"));

        // Reload
        let reloaded = mount(widget.store().clone(), "");
        assert_eq!(reloaded.state().progress, 2);
        assert_eq!(reloaded.prompt_view().refusal_label, "Pookie please 🥺");
    }

    #[test]
    fn test_accepted_store_always_mounts_success() {
        let store = MemoryStore::new()
            .with(keys::ACCEPTED, "true")
            .with(keys::PROGRESS, "5");
        let mut widget = mount(store, "?name=bob&whatsapp=123");
        assert_eq!(widget.view(), View::Success);

        // Reload with the flag set: no second celebration, no writes
        let snapshot = widget.store().clone();
        assert!(widget.accept().is_empty());
        assert_eq!(widget.store(), &snapshot);
        assert_eq!(widget.store().get(keys::PROGRESS).as_deref(), Some("5"));
    }

    #[test]
    fn test_accept_twice_is_idempotent() {
        let mut widget = mount(MemoryStore::new(), "");
        widget.refuse();

        let events = widget.accept();
        assert_eq!(events, vec![WidgetEvent::Accepted]);
        let after_first = widget.store().clone();
        assert_eq!(after_first.get(keys::ACCEPTED).as_deref(), Some("true"));
        assert_eq!(after_first.get(keys::PROGRESS), None);

        assert!(widget.accept().is_empty());
        assert_eq!(widget.store(), &after_first);
    }

    #[test]
    fn test_refuse_after_accept_writes_nothing() {
        let mut widget = mount(MemoryStore::new(), "");
        widget.accept();
        let snapshot = widget.store().clone();
        assert!(widget.refuse().is_empty());
        assert_eq!(widget.store(), &snapshot);
    }

    #[test]
    fn test_music_toggle_persists() {
        let mut widget = mount(MemoryStore::new(), "");
        widget.toggle_music();
        assert_eq!(widget.store().get(keys::MUSIC).as_deref(), Some("false"));
        widget.toggle_music();
        assert_eq!(widget.store().get(keys::MUSIC).as_deref(), Some("true"));

        let reloaded = mount(widget.store().clone(), "");
        assert!(reloaded.state().music_on);
    }

    #[test]
    fn test_last_chance_survives_reload() {
        let mut widget = mount(MemoryStore::new(), "");
        for _ in 0..LAST_REFUSAL_INDEX {
            widget.refuse();
        }
        let reloaded = mount(widget.store().clone(), "");
        assert!(reloaded.state().is_last_chance());
        assert_eq!(reloaded.prompt_view().yes_scale, 50.0);
    }

    #[test]
    fn test_viewport_bounds_follow_resize() {
        let mut widget = mount(MemoryStore::new(), "");
        widget.set_viewport(Vec2::new(100.0, 50.0));
        widget.refuse();
        assert_eq!(widget.state().refusal_pos, Vec2::ZERO);
    }
}
