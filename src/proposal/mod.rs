//! Proposal state machine
//!
//! Everything the page does lives here, free of browser types:
//! - Refusal escalation over a fixed list of messages
//! - One-way acceptance
//! - Music preference
//! - Write-through persistence via an injected store

pub mod layout;
pub mod state;
pub mod step;
pub mod widget;

pub use layout::{
    YesPlacement, next_progress, random_refusal_position, refusal_bounds, yes_placement, yes_scale,
};
pub use state::{ProposalState, View, WidgetEvent};
pub use step::{Action, step};
pub use widget::ProposalWidget;
