//! View models
//!
//! Everything the DOM layer writes (text, inline styles, decorations) is
//! computed here from `ProposalState` + `LaunchConfig`.

use rand::Rng;
use serde::Serialize;

use crate::audio::toggle_label;
use crate::config::LaunchConfig;
use crate::proposal::{ProposalState, YesPlacement, yes_placement, yes_scale};
use crate::random_in_range;
use crate::share::{SHARE_LABEL, SHARE_MESSAGE, share_link};

/// Success screen heading
pub const SUCCESS_HEADING: &str = "Knew you would say yes! 💖";
/// YES button label
pub const YES_LABEL: &str = "YES 💖";
/// Footer credit shown on both screens
pub const CREDIT_LABEL: &str = "Made with 💖 by Mirrshii";
/// Where the footer credit links to
pub const CREDIT_URL: &str = "https://simon-ndiritu.vercel.app";

/// Glyphs for the prompt screen background
const PROMPT_HEART_GLYPHS: [&str; 5] = ["❤️", "💕", "💖", "💗", "💓"];
const PROMPT_HEART_COUNT: usize = 15;
const SUCCESS_HEART_COUNT: usize = 20;

/// Question screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptView {
    pub heading: String,
    pub yes_label: &'static str,
    pub refusal_label: &'static str,
    pub yes_scale: f32,
    pub yes_placement: YesPlacement,
    /// Inline style for the YES button
    pub yes_style: String,
    /// Inline style for the NO button
    pub refusal_style: String,
    pub music_label: &'static str,
}

/// After-YES screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessView {
    pub heading: &'static str,
    pub message: String,
    pub share_label: &'static str,
    pub share_url: String,
    pub music_label: &'static str,
}

pub fn prompt_view(state: &ProposalState, config: &LaunchConfig) -> PromptView {
    let scale = yes_scale(state.progress);
    let placement = yes_placement(state.progress);

    PromptView {
        heading: format!("{}, will you be my valentine?", config.display_name),
        yes_label: YES_LABEL,
        refusal_label: state.refusal_message(),
        yes_scale: scale,
        yes_placement: placement,
        yes_style: yes_style(scale, placement),
        refusal_style: format!(
            "left: {}px; top: {}px; transition: all 0.3s ease;",
            state.refusal_pos.x, state.refusal_pos.y
        ),
        music_label: toggle_label(state.music_on),
    }
}

pub fn success_view(state: &ProposalState, config: &LaunchConfig) -> SuccessView {
    let name = &config.display_name;
    SuccessView {
        heading: SUCCESS_HEADING,
        message: format!("Can't wait to celebrate with you, {name}! ❤️"),
        share_label: SHARE_LABEL,
        share_url: share_link(config.contact.as_deref(), SHARE_MESSAGE),
        music_label: toggle_label(state.music_on),
    }
}

fn yes_style(scale: f32, placement: YesPlacement) -> String {
    let position = match placement {
        YesPlacement::Inline => "position: relative; left: auto; top: auto; translate: none;",
        YesPlacement::Overlay => "position: fixed; left: 50%; top: 50%; translate: -50% -50%;",
    };
    format!(
        "transform: scale({scale}); transition: transform 0.5s ease-in-out; \
         transform-origin: center center; {position} z-index: {};",
        placement.z_index()
    )
}

/// A decorative background heart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heart {
    pub glyph: &'static str,
    /// Horizontal position (% of width)
    pub left: f32,
    /// Vertical position (% of height); floating hearts rise from the bottom
    pub top: Option<f32>,
    /// Animation delay (s)
    pub delay: f32,
    /// Animation duration (s)
    pub duration: f32,
}

impl Heart {
    pub fn style(&self) -> String {
        let mut style = format!("left: {:.1}%;", self.left);
        if let Some(top) = self.top {
            style.push_str(&format!(" top: {:.1}%;", top));
        }
        style.push_str(&format!(
            " animation-delay: {:.2}s; animation-duration: {:.2}s;",
            self.delay, self.duration
        ));
        style
    }
}

/// Pulsing hearts scattered over the question screen
pub fn prompt_hearts<R: Rng + ?Sized>(rng: &mut R) -> Vec<Heart> {
    (0..PROMPT_HEART_COUNT)
        .map(|_| Heart {
            glyph: PROMPT_HEART_GLYPHS[rng.random_range(0..PROMPT_HEART_GLYPHS.len())],
            left: random_in_range(rng, 0.0, 100.0),
            top: Some(random_in_range(rng, 0.0, 100.0)),
            delay: random_in_range(rng, 0.0, 2.0),
            duration: random_in_range(rng, 2.0, 4.0),
        })
        .collect()
}

/// Floating hearts for the success screen
pub fn success_hearts<R: Rng + ?Sized>(rng: &mut R) -> Vec<Heart> {
    (0..SUCCESS_HEART_COUNT)
        .map(|_| Heart {
            glyph: "💖",
            left: random_in_range(rng, 0.0, 100.0),
            top: None,
            delay: random_in_range(rng, 0.0, 5.0),
            duration: random_in_range(rng, 3.0, 7.0),
        })
        .collect()
}
