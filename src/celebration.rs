//! Confetti celebration
//!
//! A fixed-length sequence of small bursts, one per timer tick, with
//! randomized angle/spread/origin. Bursts are handed to a `ParticleEffect`
//! (the `canvas-confetti` script in the browser).

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::*;
use crate::random_in_range;

/// Burst origin as a fraction of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Origin {
    pub x: f32,
    pub y: f32,
}

/// One confetti emission; serializes to `canvas-confetti` options
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Burst {
    pub particle_count: u32,
    /// Launch direction in degrees (90 = straight up)
    pub angle: f32,
    /// Spread in degrees
    pub spread: f32,
    pub origin: Origin,
    pub colors: &'static [&'static str],
}

/// Fire-and-forget particle effect
pub trait ParticleEffect {
    fn fire(&mut self, burst: &Burst);
}

/// Running celebration
#[derive(Debug, Clone)]
pub struct CelebrationSequence {
    started_at: f64,
    rng: Pcg32,
    bursts: u32,
}

impl CelebrationSequence {
    pub fn start(now_ms: f64, seed: u64) -> Self {
        log::info!("Celebration started");
        Self {
            started_at: now_ms,
            rng: Pcg32::seed_from_u64(seed),
            bursts: 0,
        }
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms - self.started_at >= CELEBRATION_DURATION_MS
    }

    /// Bursts emitted so far
    pub fn bursts(&self) -> u32 {
        self.bursts
    }

    /// Next burst for a timer tick at `now_ms`, or `None` once time is up
    pub fn next_burst(&mut self, now_ms: f64) -> Option<Burst> {
        if self.is_finished(now_ms) {
            return None;
        }
        self.bursts += 1;

        let rng = &mut self.rng;
        Some(Burst {
            particle_count: BURST_PARTICLES,
            angle: random_in_range(rng, 55.0, 125.0),
            spread: random_in_range(rng, 50.0, 70.0),
            origin: Origin {
                x: random_in_range(rng, 0.1, 0.9),
                y: random_in_range(rng, -0.2, 0.8),
            },
            colors: &CELEBRATION_COLORS,
        })
    }

    /// Drive one tick: fire a burst if still running. Returns false when done.
    pub fn tick<E: ParticleEffect + ?Sized>(&mut self, now_ms: f64, effect: &mut E) -> bool {
        match self.next_burst(now_ms) {
            Some(burst) => {
                effect.fire(&burst);
                true
            }
            None => {
                log::debug!("Celebration finished after {} bursts", self.bursts);
                false
            }
        }
    }
}

/// `canvas-confetti` global (WASM only)
#[cfg(target_arch = "wasm32")]
mod confetti_js {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(catch, js_name = confetti)]
        pub fn confetti(options: &JsValue) -> Result<JsValue, JsValue>;
    }
}

/// Effect that calls the page's `confetti(options)` function
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct CanvasConfetti {
    warned: bool,
}

#[cfg(target_arch = "wasm32")]
impl ParticleEffect for CanvasConfetti {
    fn fire(&mut self, burst: &Burst) {
        let Ok(json) = serde_json::to_string(burst) else {
            return;
        };
        let Ok(options) = js_sys::JSON::parse(&json) else {
            return;
        };
        if let Err(e) = confetti_js::confetti(&options) {
            // Script missing or blocked; say so once
            if !self.warned {
                log::warn!("confetti() unavailable: {:?}", e);
                self.warned = true;
            }
        }
    }
}
