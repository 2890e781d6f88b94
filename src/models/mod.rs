//! Core data models for the match explorer.

mod event;
mod location;
mod match_info;
mod network;
mod pass;
mod shot;
mod stats;

pub use event::*;
pub use location::*;
pub use match_info::*;
pub use network::*;
pub use pass::*;
pub use shot::*;
pub use stats::*;

/// StatsBomb match identifier.
pub type MatchId = u64;

/// StatsBomb player identifier.
pub type PlayerId = u64;
