use atree::{Arena, Token};
use instant::Instant;
use isolation_sim::rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::{debug, trace};

use crate::*;

mod dump;
pub use dump::*;

mod policy;
pub use policy::*;

mod stats;
pub use stats::*;

/// A position in the search tree. The children of a node are owned by the arena,
/// one per legal action of `state`, in action order.
#[derive(Debug, Clone)]
pub struct NodeData<G: Game> {
    pub state: G,
    /// Action that produced this node from its parent. `None` at the root.
    pub action: Option<G::Action>,
    pub stats: NodeStats,
}

impl<G: Game> NodeData<G> {
    #[inline]
    pub fn new(state: G, action: Option<G::Action>) -> Self {
        Self {
            state,
            action,
            stats: Default::default(),
        }
    }
}

#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MCTSConfig {
    /// UCT exploration constant
    pub c: f64,
    /// Seed for rollouts and expansion choices. Seeded from entropy when absent.
    pub seed: Option<u64>,
    pub limits: Option<SearchLimits>,
    /// Log the top of the tree after every search.
    pub debug: bool,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            c: DEFAULT_EXPLORATION,
            seed: None,
            limits: None,
            debug: false,
        }
    }
}

/// Monte-Carlo tree search with random rollouts.
///
/// Every rollout is scored from the point of view of `maximize_player`, at every depth of the tree,
/// regardless of which player is to move at a node.
pub struct MCTS<G: Game, S: SelectionPolicy<G> = UCT> {
    pub config: MCTSConfig,
    pub maximize_player: PlayerId,
    pub tree: Arena<NodeData<G>>,
    pub root: Option<Token>,
    pub selection_policy: S,
    pub counter: SearchCounter,
    rng: SmallRng,
}

impl<G: Game> MCTS<G, UCT> {
    pub fn new(config: MCTSConfig) -> Self {
        Self::new_with_selection_policy(config, UCT { c: config.c })
    }
}

/// Outcome of a rollout from `state`: `1` if it ends in a win for `owner`, `-1` otherwise.
/// Moves are chosen uniformly at random among the legal actions until a terminal state is reached.
pub fn random_playout<G: Game, R: Rng>(state: &G, owner: PlayerId, rng: &mut R, counter: &mut SearchCounter) -> i32 {
    let mut state = state.clone();
    while !state.is_terminal() {
        let actions = state.actions();
        let action = actions[rng.gen_range(0..actions.len())];
        state = apply_legal(&state, action);
        counter.states_visited += 1;
    }
    counter.evals += 1;
    if state.utility(owner) > 0 {
        1
    } else {
        -1
    }
}

impl<G: Game, S: SelectionPolicy<G>> MCTS<G, S> {
    pub fn new_with_selection_policy(config: MCTSConfig, selection_policy: S) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            config,
            maximize_player: PlayerId::PlayerFirst,
            tree: Arena::new(),
            root: None,
            selection_policy,
            counter: SearchCounter::ZERO,
            rng,
        }
    }

    /// Discards the previous tree and starts a new one rooted at `position`.
    fn init(&mut self, position: &G, maximize_player: PlayerId) -> Token {
        let (tree, root) = Arena::with_data(NodeData::new(position.clone(), None));
        self.tree = tree;
        self.root = Some(root);
        self.maximize_player = maximize_player;
        self.counter = SearchCounter::ZERO;
        root
    }

    /// Leaf reached from `root` by following the selection policy, with its depth.
    fn select(&self, root: Token) -> (Token, usize) {
        let mut token = root;
        let mut depth = 0;
        while let Some(child) = self.selection_policy.best_child(&self.tree, token) {
            token = child;
            depth += 1;
        }
        (token, depth)
    }

    /// Adds one child per legal action of `leaf` and returns a random one of them.
    /// A terminal `leaf` stays childless and is returned as is.
    fn expand(&mut self, leaf: Token) -> Token {
        let state = match self.tree.get(leaf) {
            Some(node) if !node.data.state.is_terminal() => node.data.state.clone(),
            _ => return leaf,
        };
        let actions = state.actions();
        for &action in &actions {
            leaf.append(&mut self.tree, NodeData::new(apply_legal(&state, action), Some(action)));
        }
        self.counter.states_visited += actions.len() as u64;

        let k = self.rng.gen_range(0..actions.len());
        self.tree
            .get(leaf)
            .and_then(|node| node.children(&self.tree).nth(k))
            .map(|child| child.token())
            .unwrap_or(leaf)
    }

    /// Credits `result` to `token` and then to each parent up to the root.
    fn backpropagate(&mut self, token: Token, result: i32) {
        for node in token.ancestors_mut(&mut self.tree) {
            node.data.stats.add_result(result);
        }
    }

    /// One round of selection, expansion, simulation and backpropagation.
    pub fn iteration(&mut self, root: Token) -> Option<()> {
        let (leaf, mut depth) = self.select(root);
        let simulated = self.expand(leaf);
        if simulated != leaf {
            depth += 1;
        }

        let state = &self.tree.get(simulated)?.data.state;
        let result = random_playout(state, self.maximize_player, &mut self.rng, &mut self.counter);
        self.backpropagate(simulated, result);
        self.counter.iterations += 1;
        trace!(iteration = self.counter.iterations, depth, result, "mcts iteration");
        Some(())
    }

    /// Action of the most visited child of `token`. Ties go to the first child.
    pub fn robust_child_action(&self, token: Token) -> Option<G::Action> {
        let node = self.tree.get(token)?;
        let mut best: Option<&NodeData<G>> = None;
        for child in node.children(&self.tree) {
            match best {
                Some(b) if child.data.stats.visit_count <= b.stats.visit_count => {}
                _ => best = Some(&child.data),
            }
        }
        best.and_then(|data| data.action)
    }

    /// Starts a fresh tree for `position` and returns the anytime stream of recommended actions,
    /// one per iteration. `None` if `position` is terminal.
    pub fn next_moves(&mut self, position: &G, maximize_player: PlayerId) -> Option<NextMoves<'_, G, S>> {
        if position.is_terminal() {
            return None;
        }
        let root = self.init(position, maximize_player);
        Some(NextMoves { mcts: self, root })
    }
}

/// Infinite iterator over the robust child of the root after each MCTS iteration.
pub struct NextMoves<'a, G: Game, S: SelectionPolicy<G>> {
    mcts: &'a mut MCTS<G, S>,
    root: Token,
}

impl<'a, G: Game, S: SelectionPolicy<G>> NextMoves<'a, G, S> {
    #[inline]
    pub fn counter(&self) -> SearchCounter {
        self.mcts.counter
    }
}

impl<'a, G: Game, S: SelectionPolicy<G>> Iterator for NextMoves<'a, G, S> {
    type Item = G::Action;

    fn next(&mut self) -> Option<G::Action> {
        self.mcts.iteration(self.root)?;
        self.mcts.robust_child_action(self.root)
    }
}

impl<G: Game, S: SelectionPolicy<G>> GameTreeSearch<G> for MCTS<G, S> {
    fn search_into(
        &mut self,
        position: &G,
        maximize_player: PlayerId,
        sink: &mut dyn ActionSink<G::Action>,
    ) -> SearchCounter {
        let t0 = Instant::now();
        let limits = self.config.limits.unwrap_or_default();
        let Some(mut moves) = self.next_moves(position, maximize_player) else {
            return SearchCounter::ZERO;
        };
        while let Some(action) = moves.next() {
            sink.put(action);
            if limits.should_terminate(t0.elapsed().as_millis(), &moves.counter()) {
                break;
            }
        }

        let counter = self.counter;
        if self.config.debug {
            debug!(
                iterations = counter.iterations,
                states_visited = counter.states_visited,
                "mcts: {}",
                counter.summary(t0.elapsed().as_nanos())
            );
            if let Some(root) = self.root {
                self.print_tree(root, 2, 8);
            }
        }
        counter
    }
}
