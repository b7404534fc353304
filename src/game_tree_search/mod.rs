use std::ops::Add;

mod game_trait;
pub use game_trait::*;

mod sink;
pub use sink::*;

use crate::types::player_id::PlayerId;

/// Time budget per move used when a search has no explicit limits.
pub const DEFAULT_TIME_LIMIT_MS: u128 = 150;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchCounter {
    /// Number of states visited through game state advancements.
    pub states_visited: u64,
    /// Number of times a board position was being evaluated (cutoff depth or terminal).
    pub evals: u64,
    /// Number of anytime values produced: MCTS iterations or completed deepening depths.
    pub iterations: u64,
    /// Last finished depth for iterative deepening
    pub last_depth: u8,
}

impl SearchCounter {
    pub const ZERO: SearchCounter = SearchCounter {
        states_visited: 0,
        evals: 0,
        iterations: 0,
        last_depth: 0,
    };

    #[inline]
    pub fn add_in_place(&mut self, c: &SearchCounter) {
        self.states_visited += c.states_visited;
        self.evals += c.evals;
        self.iterations += c.iterations;
        self.last_depth = self.last_depth.max(c.last_depth);
    }

    pub fn summary(&self, dt_ns: u128) -> String {
        let dt_ms: f64 = 1e-6 * (dt_ns as f64);
        let rate: f64 = (1e-6_f64 * 1e9_f64) * (self.states_visited as f64) / (dt_ns.max(1) as f64);
        format!("dt={dt_ms:.2}ms rate={rate:.4} Mstates/s")
    }
}

impl Add for SearchCounter {
    type Output = SearchCounter;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let mut a = self;
        a.add_in_place(&rhs);
        a
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult<G: Game> {
    /// Last action produced before the search stopped. `None` only for terminal positions.
    pub action: Option<G::Action>,
    pub counter: SearchCounter,
}

impl<G: Game> Default for SearchResult<G> {
    fn default() -> Self {
        SearchResult::new(None, Default::default())
    }
}

impl<G: Game> SearchResult<G> {
    #[inline]
    pub fn new(action: Option<G::Action>, counter: SearchCounter) -> Self {
        SearchResult { action, counter }
    }
}

pub trait GameTreeSearch<G: Game> {
    /// Pulls candidate actions for `position` until the search's limits are reached,
    /// forwarding each one to `sink`. At least one action is forwarded unless the position is terminal.
    fn search_into(
        &mut self,
        position: &G,
        maximize_player: PlayerId,
        sink: &mut dyn ActionSink<G::Action>,
    ) -> SearchCounter;

    fn search(&mut self, position: &G, maximize_player: PlayerId) -> SearchResult<G> {
        let mut last = LastAction::default();
        let counter = self.search_into(position, maximize_player, &mut last);
        SearchResult::new(last.into_inner(), counter)
    }
}

impl<G: Game, T: GameTreeSearch<G> + ?Sized> GameTreeSearch<G> for Box<T> {
    #[inline]
    fn search_into(
        &mut self,
        position: &G,
        maximize_player: PlayerId,
        sink: &mut dyn ActionSink<G::Action>,
    ) -> SearchCounter {
        (**self).search_into(position, maximize_player, sink)
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchLimits {
    pub max_time_ms: Option<u128>,
    pub max_positions: Option<u64>,
    pub max_iterations: Option<u64>,
}

impl SearchLimits {
    #[inline]
    pub fn time_limit_ms(time_limit_ms: u128) -> Self {
        Self {
            max_time_ms: Some(time_limit_ms),
            ..Default::default()
        }
    }

    #[inline]
    pub fn iterations(max_iterations: u64) -> Self {
        Self {
            max_iterations: Some(max_iterations),
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.max_time_ms.is_none() && self.max_positions.is_none() && self.max_iterations.is_none()
    }

    /// Whether a search that started `elapsed_ms` ago and did the work in `counter` should stop.
    pub fn should_terminate(&self, elapsed_ms: u128, counter: &SearchCounter) -> bool {
        if self.is_unbounded() {
            return elapsed_ms >= DEFAULT_TIME_LIMIT_MS;
        }
        if let Some(max_time_ms) = self.max_time_ms {
            if elapsed_ms >= max_time_ms {
                return true;
            }
        }
        if let Some(max_positions) = self.max_positions {
            if counter.states_visited >= max_positions {
                return true;
            }
        }
        if let Some(max_iterations) = self.max_iterations {
            if counter.iterations >= max_iterations {
                return true;
            }
        }
        false
    }
}
