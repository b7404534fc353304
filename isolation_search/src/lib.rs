//! Anytime game tree search for two-player, zero-sum games implementing [`Game`].
//!
//! Both searches are exposed as lazy, logically infinite iterators of candidate actions:
//! the caller pulls values until its time budget runs out and plays the last one received.

pub use isolation_sim::game_tree_search::*;
pub use isolation_sim::types::player_id::PlayerId;

/// Implementation for Monte-Carlo Tree Search
pub mod mcts;

/// Implementation for minimax search
pub mod minimax;

/// Turn agent combining a random opening with an anytime search
pub mod agent;

#[cfg(test)]
pub(crate) mod test_game;

/// Successor of `state` after an action it listed as legal. A rejection is a broken [`Game`] contract.
#[inline]
pub(crate) fn apply_legal<G: Game>(state: &G, action: G::Action) -> G {
    match state.result(action) {
        Ok(next) => next,
        Err(err) => panic!("legal action {action:?} was rejected: {err:?}"),
    }
}
