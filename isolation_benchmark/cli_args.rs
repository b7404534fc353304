use std::str::FromStr;
use structopt::StructOpt;

use isolation_search::{
    agent::{Agent, Algorithm, AlgorithmOptions},
    ActionSink, GameTreeSearch, PlayerId, SearchCounter, SearchLimits,
};
use isolation_sim::{
    isolation::{Action, Isolation},
    rand::{rngs::SmallRng, SeedableRng},
};

use crate::baseline::{GreedySearch, RandomSearch};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SearchAlgorithm {
    Tree(Algorithm),
    Greedy,
    Random,
}

impl FromStr for SearchAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "greedy" => Ok(Self::Greedy),
            "random" => Ok(Self::Random),
            name => name.parse::<Algorithm>().map(Self::Tree),
        }
    }
}

#[derive(Debug, StructOpt, Clone, Default)]
pub struct SearchConfig {
    #[structopt(
        short = "A",
        long = "--algorithm",
        help = "mcts|alpha-beta|greedy|random: algorithm used to pick moves after the opening."
    )]
    pub algorithm: Option<SearchAlgorithm>,

    #[structopt(
        short = "d",
        long = "--start-depth",
        help = "Alpha-beta: depth of the first iterative deepening step"
    )]
    pub start_depth: Option<u8>,

    #[structopt(
        short = "C",
        long = "--mcts-c",
        help = "MCTS: UCT exploration constant. Higher value promotes wider search, while lower value promotes deeper search."
    )]
    pub mcts_c: Option<f64>,

    #[structopt(
        short = "T",
        long = "--time-limit-ms",
        help = "Set time limit per move in milliseconds"
    )]
    pub time_limit_ms: Option<u128>,

    #[structopt(short = "P", long = "--max-positions", help = "Max positions to search")]
    pub max_positions: Option<u64>,

    #[structopt(
        short = "I",
        long = "--max-iterations",
        help = "Max MCTS iterations or alpha-beta depths per move"
    )]
    pub max_iterations: Option<u64>,

    #[structopt(short = "D", long = "--debug", help = "Log search details")]
    pub debug: bool,
}

#[derive(Debug, StructOpt, Clone)]
pub struct SearchOpts {
    #[structopt(short = "s", long = "--steps", help = "Max plies to play out per game")]
    pub steps: Option<u32>,

    #[structopt(short = "S", long = "--seed", help = "Random seed for the agents")]
    pub seed: Option<u64>,

    #[structopt(flatten)]
    pub search: SearchConfig,
}

pub enum GenericSearch {
    Tree(Box<dyn GameTreeSearch<Isolation> + Send>),
    Greedy(GreedySearch),
    Random(RandomSearch),
}

impl GameTreeSearch<Isolation> for GenericSearch {
    fn search_into(
        &mut self,
        position: &Isolation,
        maximize_player: PlayerId,
        sink: &mut dyn ActionSink<Action>,
    ) -> SearchCounter {
        match self {
            Self::Tree(s) => s.search_into(position, maximize_player, sink),
            Self::Greedy(s) => s.search_into(position, maximize_player, sink),
            Self::Random(s) => s.search_into(position, maximize_player, sink),
        }
    }
}

impl SearchConfig {
    pub fn make_search(&self, limits: Option<SearchLimits>, seed: Option<u64>) -> GenericSearch {
        let make_rng = || match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        match self.algorithm.unwrap_or(SearchAlgorithm::Tree(Algorithm::AlphaBeta)) {
            SearchAlgorithm::Tree(algorithm) => GenericSearch::Tree(algorithm.make_search(&AlgorithmOptions {
                limits,
                seed,
                start_depth: self.start_depth,
                exploration: self.mcts_c,
                debug: self.debug,
            })),
            SearchAlgorithm::Greedy => GenericSearch::Greedy(GreedySearch),
            SearchAlgorithm::Random => GenericSearch::Random(RandomSearch { rng: make_rng() }),
        }
    }

    pub fn get_limits(&self) -> Option<SearchLimits> {
        if self.time_limit_ms.is_none() && self.max_positions.is_none() && self.max_iterations.is_none() {
            return None;
        }
        Some(SearchLimits {
            max_time_ms: self.time_limit_ms,
            max_positions: self.max_positions,
            max_iterations: self.max_iterations,
        })
    }

    pub fn make_agent(&self, seed: Option<u64>) -> Agent<Isolation, GenericSearch> {
        Agent::new(self.make_search(self.get_limits(), seed), seed)
    }
}

impl SearchOpts {
    /// Seed for the agents of game `round`, derived from `--seed`.
    pub fn round_seed(&self, round: u64) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(2).wrapping_mul(round + 1))
    }
}
