//! State transitions
//!
//! `step` is the only place `ProposalState` changes. It is pure apart from
//! the RNG, so the whole escalation can be replayed from a seed.

use glam::Vec2;
use rand::Rng;

use super::layout::{next_progress, random_refusal_position};
use super::state::{ProposalState, WidgetEvent};

/// User actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// NO pressed
    Refuse,
    /// YES pressed
    Accept,
    /// Music button pressed
    ToggleMusic,
}

/// Apply one action, returning what changed
pub fn step<R: Rng + ?Sized>(
    state: &mut ProposalState,
    action: Action,
    viewport: Vec2,
    rng: &mut R,
) -> Vec<WidgetEvent> {
    let mut events = Vec::new();

    match action {
        Action::Refuse => {
            // No way back to the question once accepted
            if state.accepted {
                return events;
            }

            state.progress = next_progress(state.progress);
            events.push(WidgetEvent::Refused {
                index: state.progress,
            });

            // NO stays put on the last message
            if !state.is_last_chance() {
                let to = random_refusal_position(viewport, rng);
                state.refusal_pos = to;
                events.push(WidgetEvent::RefusalMoved { to });
            }
        }
        Action::Accept => {
            if state.accepted {
                return events;
            }
            state.accepted = true;
            state.progress = 0;
            events.push(WidgetEvent::Accepted);
        }
        Action::ToggleMusic => {
            state.music_on = !state.music_on;
            events.push(WidgetEvent::MusicToggled {
                on: state.music_on,
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LAST_REFUSAL_INDEX;
    use crate::proposal::View;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    #[test]
    fn test_refuse_advances_and_moves() {
        let mut state = ProposalState::default();
        let mut rng = Pcg32::seed_from_u64(12345);

        let events = step(&mut state, Action::Refuse, VIEWPORT, &mut rng);
        assert_eq!(state.progress, 1);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], WidgetEvent::Refused { index: 1 });
        assert!(matches!(events[1], WidgetEvent::RefusalMoved { .. }));
    }

    #[test]
    fn test_last_chance_pins_refusal() {
        let mut state = ProposalState::default();
        let mut rng = Pcg32::seed_from_u64(12345);

        for _ in 0..LAST_REFUSAL_INDEX - 1 {
            step(&mut state, Action::Refuse, VIEWPORT, &mut rng);
        }
        let before = state.refusal_pos;

        let events = step(&mut state, Action::Refuse, VIEWPORT, &mut rng);
        assert!(state.is_last_chance());
        let pinned = WidgetEvent::Refused {
            index: LAST_REFUSAL_INDEX,
        };
        assert_eq!(events, vec![pinned]);
        assert_eq!(state.refusal_pos, before);

        // Wraps back to the start and moves again
        let events = step(&mut state, Action::Refuse, VIEWPORT, &mut rng);
        assert_eq!(state.progress, 0);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_accept_is_one_way() {
        let mut state = ProposalState::default();
        let mut rng = Pcg32::seed_from_u64(1);

        step(&mut state, Action::Refuse, VIEWPORT, &mut rng);
        let events = step(&mut state, Action::Accept, VIEWPORT, &mut rng);
        assert_eq!(events, vec![WidgetEvent::Accepted]);
        assert_eq!(state.view(), View::Success);
        assert_eq!(state.progress, 0);

        assert!(step(&mut state, Action::Accept, VIEWPORT, &mut rng).is_empty());
        assert!(step(&mut state, Action::Refuse, VIEWPORT, &mut rng).is_empty());
        assert_eq!(state.view(), View::Success);
    }

    #[test]
    fn test_toggle_music_in_any_view() {
        let mut state = ProposalState::default();
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(state.music_on);

        let events = step(&mut state, Action::ToggleMusic, VIEWPORT, &mut rng);
        assert_eq!(events, vec![WidgetEvent::MusicToggled { on: false }]);

        step(&mut state, Action::Accept, VIEWPORT, &mut rng);
        let events = step(&mut state, Action::ToggleMusic, VIEWPORT, &mut rng);
        assert_eq!(events, vec![WidgetEvent::MusicToggled { on: true }]);
    }

    #[test]
    fn test_determinism() {
        let mut a = ProposalState::default();
        let mut b = ProposalState::default();
        let mut rng_a = Pcg32::seed_from_u64(99999);
        let mut rng_b = Pcg32::seed_from_u64(99999);

        for _ in 0..10 {
            step(&mut a, Action::Refuse, VIEWPORT, &mut rng_a);
            step(&mut b, Action::Refuse, VIEWPORT, &mut rng_b);
        }
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_progress_is_count_mod_six(k in 0usize..60, seed in any::<u64>()) {
            let mut state = ProposalState::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..k {
                let before = state.refusal_pos;
                step(&mut state, Action::Refuse, VIEWPORT, &mut rng);
                if state.is_last_chance() {
                    prop_assert_eq!(state.refusal_pos, before);
                }
            }
            prop_assert_eq!(usize::from(state.progress), k % 6);
        }
    }
}
