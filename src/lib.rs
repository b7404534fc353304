#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![doc = include_str!("../README.md")]

/// Player identities and per-player containers.
pub mod types;

/// The game contract consumed by the search algorithms, plus search results, limits and sinks.
pub mod game_tree_search;

/// Knight's Isolation on an 11x9 board.
pub mod isolation;

/// Re-exports the `smallvec` crate
pub use smallvec;

/// Re-exports the `rand` create
pub use rand;

/// Re-exports the `thiserror` crate
pub use thiserror;

pub mod prelude {
    pub use crate::game_tree_search::{
        ActionList, ActionSink, CellList, Game, GameTreeSearch, LastAction, SearchCounter, SearchLimits, SearchResult,
    };
    pub use crate::isolation::{Action, Direction, Isolation, IsolationError};
    pub use crate::types::by_player::ByPlayer;
    pub use crate::types::player_id::PlayerId;
}

#[cfg(test)]
mod tests;
