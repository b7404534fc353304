pub mod eval;
pub mod search;

pub use eval::{EvalPolicy, MobilityEval};
pub use search::{
    alpha_beta, max_value, min_value, IterativeDeepening, MinimaxConfig, MinimaxSearch, SearchContext,
};
