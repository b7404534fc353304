use instant::Instant;
use structopt::StructOpt;
use tracing::info;

use isolation_sim::types::by_player::ByPlayer;

mod baseline;
mod cli_args;
mod match_round;

use cli_args::{SearchAlgorithm, SearchConfig, SearchOpts};
use match_round::{iterate_match, trace_game, BenchmarkError, IterateMatchOpts};

#[derive(Debug, StructOpt, Clone)]
#[structopt(about = "Knight's Isolation search benchmark")]
pub enum BenchmarkOpts {
    #[structopt(help = "Play one game between two agents with the same settings and print every move.")]
    Trace {
        #[structopt(flatten)]
        search: SearchOpts,
    },
    #[structopt(help = "Measure win rate against a standardized opponent.")]
    Match {
        #[structopt(long)]
        rounds: Option<u32>,

        #[structopt(flatten)]
        search: SearchOpts,

        #[structopt(long)]
        standard_algorithm: Option<SearchAlgorithm>,

        #[structopt(long)]
        standard_time_limit_ms: Option<u128>,
    },
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();
}

fn standard_search_opts(algorithm: Option<SearchAlgorithm>, standard_time_limit_ms: Option<u128>) -> SearchConfig {
    SearchConfig {
        algorithm: algorithm.or(Some(SearchAlgorithm::Greedy)),
        time_limit_ms: standard_time_limit_ms.or(Some(150)),
        ..Default::default()
    }
}

fn main() -> Result<(), BenchmarkError> {
    init_tracing("info");
    let opts = BenchmarkOpts::from_args();
    match opts {
        BenchmarkOpts::Trace { search } => {
            let steps = search.steps.unwrap_or(200);
            let mut agents = ByPlayer::new(
                search.search.make_agent(search.round_seed(0)),
                search.search.make_agent(search.round_seed(1)),
            );
            let (dt_ns, c) = trace_game(&mut agents, steps)?;
            println!();
            println!("{:?} {}", c, c.summary(dt_ns));
        }
        BenchmarkOpts::Match {
            rounds,
            search,
            standard_algorithm,
            standard_time_limit_ms,
        } => {
            let t0 = Instant::now();
            let standard = standard_search_opts(standard_algorithm, standard_time_limit_ms);
            let rounds = rounds.unwrap_or(100);
            info!(?standard, rounds, "match");
            let make_agents = |round: u64| {
                let seed = search.round_seed(round);
                ByPlayer::new(
                    search.search.make_agent(seed),
                    standard.make_agent(seed.map(|s| s ^ 0x5EED)),
                )
            };
            let match_opts = IterateMatchOpts {
                rounds,
                steps: search.steps.unwrap_or(200),
            };
            let (_, score, total_counter) = iterate_match(&make_agents, match_opts)?;
            println!(
                "{:?}, rate={:.4}Mstates/s",
                total_counter,
                (total_counter.states_visited as f64) / (t0.elapsed().as_micros().max(1) as f64)
            );
            println!("{score}, {:.2}ms", t0.elapsed().as_millis());
        }
    };

    Ok(())
}
