use std::{fmt::Display, marker::PhantomData, str::FromStr};

use isolation_sim::rand::{rngs::SmallRng, seq::SliceRandom, SeedableRng};

use crate::mcts::{MCTSConfig, MCTS};
use crate::minimax::{MinimaxConfig, MinimaxSearch};
use crate::*;

/// Search driver used by an [`Agent`] after the opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    MCTS,
    AlphaBeta,
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Algorithm::MCTS => f.write_str("mcts"),
            Algorithm::AlphaBeta => f.write_str("alpha-beta"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mcts" => Ok(Algorithm::MCTS),
            "alpha-beta" | "alphabeta" | "minimax" => Ok(Algorithm::AlphaBeta),
            _ => Err(format!("unknown algorithm: {s}")),
        }
    }
}

/// Settings for [`Algorithm::make_search`]. Those that do not apply to the chosen algorithm are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlgorithmOptions {
    pub limits: Option<SearchLimits>,
    pub seed: Option<u64>,
    /// Alpha-beta: depth of the first deepening iteration.
    pub start_depth: Option<u8>,
    /// MCTS: UCT exploration constant.
    pub exploration: Option<f64>,
    pub debug: bool,
}

impl Algorithm {
    pub fn make_search<G: Game + 'static>(self, options: &AlgorithmOptions) -> Box<dyn GameTreeSearch<G> + Send> {
        match self {
            Algorithm::MCTS => {
                let default = MCTSConfig::default();
                Box::new(MCTS::new(MCTSConfig {
                    c: options.exploration.unwrap_or(default.c),
                    seed: options.seed,
                    limits: options.limits,
                    debug: options.debug,
                }))
            }
            Algorithm::AlphaBeta => {
                let default = MinimaxConfig::default();
                Box::new(MinimaxSearch::new(MinimaxConfig {
                    start_depth: options.start_depth.unwrap_or(default.start_depth),
                    limits: options.limits,
                    debug: options.debug,
                }))
            }
        }
    }
}

/// Picks moves turn after turn.
///
/// A uniformly random legal move is always reported first, so that a move is committed immediately.
/// During the first two plies of a game that random move is final; later the wrapped search refines it.
pub struct Agent<G: Game, S: GameTreeSearch<G>, C = ()> {
    pub search: S,
    /// Opaque value kept from one turn to the next for the caller.
    pub context: Option<C>,
    rng: SmallRng,
    _phantom: PhantomData<fn(&G)>,
}

impl<G: Game, S: GameTreeSearch<G>, C> Agent<G, S, C> {
    pub fn new(search: S, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            search,
            context: None,
            rng,
            _phantom: PhantomData,
        }
    }

    /// Reports candidate moves for `state` to `sink`, most recent last. Nothing is reported for a terminal state.
    pub fn get_action(&mut self, state: &G, sink: &mut dyn ActionSink<G::Action>) -> SearchCounter {
        let Some(&opening) = state.actions().choose(&mut self.rng) else {
            return SearchCounter::ZERO;
        };
        sink.put(opening);
        if state.ply_count() < 2 {
            return SearchCounter::ZERO;
        }
        self.search.search_into(state, state.to_move(), sink)
    }
}

impl<G: Game + 'static, C> Agent<G, Box<dyn GameTreeSearch<G> + Send>, C> {
    pub fn with_algorithm(algorithm: Algorithm, limits: Option<SearchLimits>, seed: Option<u64>) -> Self {
        let options = AlgorithmOptions {
            limits,
            seed,
            ..Default::default()
        };
        Self::new(algorithm.make_search(&options), seed)
    }
}
