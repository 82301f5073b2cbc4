//! Derived button geometry
//!
//! Pure functions of refusal progress and viewport size.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How the YES button is positioned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesPlacement {
    /// In the button row
    Inline,
    /// Fixed at the viewport center, above everything else
    Overlay,
}

impl YesPlacement {
    pub fn z_index(&self) -> u32 {
        match self {
            YesPlacement::Inline => 10,
            YesPlacement::Overlay => 100,
        }
    }
}

/// Progress after one more refusal (wraps after the last message)
#[inline]
pub fn next_progress(progress: u8) -> u8 {
    (progress.min(LAST_REFUSAL_INDEX) + 1) % REFUSAL_MESSAGES.len() as u8
}

/// YES button scale: 1, 3, 5, 7, 9, then the overlay scale
pub fn yes_scale(progress: u8) -> f32 {
    if progress < LAST_REFUSAL_INDEX {
        1.0 + YES_SCALE_STEP * progress as f32
    } else {
        YES_OVERLAY_SCALE
    }
}

pub fn yes_placement(progress: u8) -> YesPlacement {
    if progress >= LAST_REFUSAL_INDEX {
        YesPlacement::Overlay
    } else {
        YesPlacement::Inline
    }
}

/// Largest NO button offset that keeps it on screen
pub fn refusal_bounds(viewport: Vec2) -> Vec2 {
    (viewport - Vec2::new(REFUSAL_MARGIN_X, REFUSAL_MARGIN_Y)).max(Vec2::ZERO)
}

/// Random whole-pixel NO button offset within `refusal_bounds`
pub fn random_refusal_position<R: Rng + ?Sized>(viewport: Vec2, rng: &mut R) -> Vec2 {
    let bounds = refusal_bounds(viewport);
    let x = (rng.random::<f32>() * bounds.x).floor().min(bounds.x);
    let y = (rng.random::<f32>() * bounds.y).floor().min(bounds.y);
    Vec2::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_yes_scale_sequence() {
        let scales: Vec<f32> = (0..=LAST_REFUSAL_INDEX).map(yes_scale).collect();
        assert_eq!(scales, vec![1.0, 3.0, 5.0, 7.0, 9.0, 50.0]);
    }

    #[test]
    fn test_overlay_only_at_last_index() {
        for progress in 0..LAST_REFUSAL_INDEX {
            assert_eq!(yes_placement(progress), YesPlacement::Inline);
        }
        assert_eq!(yes_placement(LAST_REFUSAL_INDEX), YesPlacement::Overlay);
        assert_eq!(YesPlacement::Overlay.z_index(), 100);
    }

    #[test]
    fn test_next_progress_wraps() {
        assert_eq!(next_progress(0), 1);
        assert_eq!(next_progress(4), 5);
        assert_eq!(next_progress(5), 0);
    }

    #[test]
    fn test_tiny_viewport_pins_to_origin() {
        let mut rng = Pcg32::seed_from_u64(7);
        let pos = random_refusal_position(Vec2::new(150.0, 80.0), &mut rng);
        assert_eq!(pos, Vec2::ZERO);
    }

    proptest! {
        #[test]
        fn prop_refusal_position_in_bounds(
            seed in any::<u64>(),
            w in 0.0f32..4000.0,
            h in 0.0f32..4000.0,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let viewport = Vec2::new(w, h);
            let bounds = refusal_bounds(viewport);
            let pos = random_refusal_position(viewport, &mut rng);
            prop_assert!(pos.x >= 0.0 && pos.x <= bounds.x);
            prop_assert!(pos.y >= 0.0 && pos.y <= bounds.y);
            prop_assert_eq!(pos.x, pos.x.floor());
            prop_assert_eq!(pos.y, pos.y.floor());
        }

        #[test]
        fn prop_scale_is_linear_below_last(n in 0u8..LAST_REFUSAL_INDEX) {
            prop_assert_eq!(yes_scale(n), 1.0 + 2.0 * n as f32);
        }
    }
}
