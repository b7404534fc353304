use instant::Instant;
use tracing::debug;

use super::eval::{EvalPolicy, MobilityEval};
use crate::*;

/// Number of visited states between two checks of the search limits.
const LIMIT_CHECK_INTERVAL: u64 = 1024;

/// State threaded through one depth-bounded search.
pub struct SearchContext<'a, E> {
    /// Every value is computed from this player's point of view.
    pub maximize_player: PlayerId,
    pub eval_policy: &'a E,
    pub counter: SearchCounter,
    /// Limits checked while searching, with the time the search started.
    /// Ignored until the first depth has completed.
    pub limits: Option<(SearchLimits, Instant)>,
    aborted: bool,
}

impl<'a, E> SearchContext<'a, E> {
    pub fn new(maximize_player: PlayerId, eval_policy: &'a E) -> Self {
        Self {
            maximize_player,
            eval_policy,
            counter: SearchCounter::ZERO,
            limits: None,
            aborted: false,
        }
    }

    pub fn with_limits(mut self, limits: SearchLimits, start_time: Instant) -> Self {
        self.limits = Some((limits, start_time));
        self
    }

    /// Whether the current depth was cut off by the limits. Its result is then meaningless.
    #[inline]
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    #[inline]
    fn visit<G: Game>(&mut self, state: &G, action: G::Action) -> G {
        self.counter.states_visited += 1;
        if self.counter.states_visited % LIMIT_CHECK_INTERVAL == 0 && self.counter.iterations > 0 {
            if let Some((limits, t0)) = self.limits {
                self.aborted |= limits.should_terminate(t0.elapsed().as_millis(), &self.counter);
            }
        }
        apply_legal(state, action)
    }

    /// Terminal utility or horizon evaluation, if `state` is a leaf of this search.
    #[inline]
    fn leaf_value<G: Game>(&mut self, state: &G, depth: u8) -> Option<i32>
    where
        E: EvalPolicy<G>,
    {
        if state.is_terminal() {
            self.counter.evals += 1;
            Some(state.utility(self.maximize_player))
        } else if depth == 0 {
            self.counter.evals += 1;
            Some(self.eval_policy.evaluate(state, self.maximize_player))
        } else {
            None
        }
    }
}

/// Value of `state` with the maximizing player to move, searched `depth` plies deep.
/// Returns `beta` as soon as a child reaches it.
pub fn max_value<G: Game, E: EvalPolicy<G>>(
    ctx: &mut SearchContext<E>,
    state: &G,
    depth: u8,
    mut alpha: i32,
    beta: i32,
) -> i32 {
    if let Some(value) = ctx.leaf_value(state, depth) {
        return value;
    }
    let mut value = i32::MIN;
    for action in state.actions() {
        if ctx.aborted {
            break;
        }
        let next = ctx.visit(state, action);
        value = value.max(min_value(ctx, &next, depth - 1, alpha, beta));
        if value >= beta {
            return beta;
        }
        alpha = alpha.max(value);
    }
    value
}

/// Value of `state` with the minimizing player to move, searched `depth` plies deep.
/// Returns `alpha` as soon as a child reaches it.
pub fn min_value<G: Game, E: EvalPolicy<G>>(
    ctx: &mut SearchContext<E>,
    state: &G,
    depth: u8,
    alpha: i32,
    mut beta: i32,
) -> i32 {
    if let Some(value) = ctx.leaf_value(state, depth) {
        return value;
    }
    let mut value = i32::MAX;
    for action in state.actions() {
        if ctx.aborted {
            break;
        }
        let next = ctx.visit(state, action);
        value = value.min(max_value(ctx, &next, depth - 1, alpha, beta));
        if value <= alpha {
            return alpha;
        }
        beta = beta.min(value);
    }
    value
}

/// Best action of `state` for the maximizing player at a fixed `depth`, with its value.
///
/// The first legal action is kept when no other one scores strictly higher.
/// `None` for a terminal state or when the limits cut the search short.
pub fn alpha_beta<G: Game, E: EvalPolicy<G>>(
    ctx: &mut SearchContext<E>,
    state: &G,
    depth: u8,
) -> Option<(G::Action, i32)> {
    let actions = state.actions();
    let mut best = (*actions.first()?, i32::MIN);
    let mut alpha = i32::MIN;
    for &action in &actions {
        let next = ctx.visit(state, action);
        let value = min_value(ctx, &next, depth.saturating_sub(1), alpha, i32::MAX);
        if ctx.aborted {
            return None;
        }
        if value > best.1 {
            best = (action, value);
        }
        alpha = alpha.max(value);
    }
    Some(best)
}

#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MinimaxConfig {
    /// Depth of the first iteration.
    pub start_depth: u8,
    pub limits: Option<SearchLimits>,
    /// Log the value of every completed depth.
    pub debug: bool,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self {
            start_depth: 2,
            limits: None,
            debug: false,
        }
    }
}

/// Iterative-deepening alpha-beta search. Every depth is searched from scratch.
#[derive(Debug, Default, Clone)]
pub struct MinimaxSearch<E = MobilityEval> {
    pub config: MinimaxConfig,
    pub eval_policy: E,
}

impl MinimaxSearch<MobilityEval> {
    pub fn new(config: MinimaxConfig) -> Self {
        Self::new_with_eval_policy(config, MobilityEval)
    }
}

impl<E> MinimaxSearch<E> {
    pub fn new_with_eval_policy(config: MinimaxConfig, eval_policy: E) -> Self {
        Self { config, eval_policy }
    }

    /// The anytime stream of best actions for `position`, one per completed depth,
    /// starting at `config.start_depth`.
    pub fn iterative_deepening<G: Game>(
        &self,
        position: &G,
        maximize_player: PlayerId,
    ) -> IterativeDeepening<'_, G, E>
    where
        E: EvalPolicy<G>,
    {
        IterativeDeepening {
            position: position.clone(),
            ctx: SearchContext::new(maximize_player, &self.eval_policy),
            depth: self.config.start_depth.max(1),
            debug: self.config.debug,
        }
    }
}

/// Infinite iterator over the best action at increasing depths.
/// Ends early only for a terminal position or once the context's limits abort a depth.
pub struct IterativeDeepening<'a, G: Game, E> {
    position: G,
    ctx: SearchContext<'a, E>,
    depth: u8,
    debug: bool,
}

impl<'a, G: Game, E: EvalPolicy<G>> IterativeDeepening<'a, G, E> {
    /// Lets the limits cut off a depth in progress once the first depth has completed.
    pub fn with_limits(mut self, limits: SearchLimits, start_time: Instant) -> Self {
        self.ctx = self.ctx.with_limits(limits, start_time);
        self
    }

    #[inline]
    pub fn counter(&self) -> SearchCounter {
        self.ctx.counter
    }

    /// Depth of the next iteration.
    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl<'a, G: Game, E: EvalPolicy<G>> Iterator for IterativeDeepening<'a, G, E> {
    type Item = G::Action;

    fn next(&mut self) -> Option<G::Action> {
        let depth = self.depth;
        let (action, value) = alpha_beta(&mut self.ctx, &self.position, depth)?;
        self.ctx.counter.iterations += 1;
        self.ctx.counter.last_depth = depth;
        self.depth = depth.saturating_add(1);
        if self.debug {
            debug!(
                depth,
                value,
                states_visited = self.ctx.counter.states_visited,
                "alpha-beta: {action:?}"
            );
        }
        Some(action)
    }
}

impl<G: Game, E: EvalPolicy<G>> GameTreeSearch<G> for MinimaxSearch<E> {
    fn search_into(
        &mut self,
        position: &G,
        maximize_player: PlayerId,
        sink: &mut dyn ActionSink<G::Action>,
    ) -> SearchCounter {
        let t0 = Instant::now();
        let limits = self.config.limits.unwrap_or_default();
        let mut moves = self.iterative_deepening(position, maximize_player).with_limits(limits, t0);
        while let Some(action) = moves.next() {
            sink.put(action);
            if limits.should_terminate(t0.elapsed().as_millis(), &moves.counter()) {
                break;
            }
        }

        let counter = moves.counter();
        if self.config.debug {
            debug!(
                last_depth = counter.last_depth,
                evals = counter.evals,
                "alpha-beta: {}",
                counter.summary(t0.elapsed().as_nanos())
            );
        }
        counter
    }
}
