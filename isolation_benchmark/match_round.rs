use instant::{Duration, Instant};
use rayon::prelude::*;
use std::sync::atomic::{AtomicI32, Ordering};
use thiserror::Error;
use tracing::{debug, info};

use isolation_search::{agent::Agent, Game, GameTreeSearch, LastAction, SearchCounter};
use isolation_sim::{
    isolation::{Action, Isolation, IsolationError},
    types::{by_player::ByPlayer, player_id::PlayerId},
};

#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("ply {ply}: {player} reported no move")]
    NoMove { ply: u32, player: PlayerId },
    #[error("ply {ply}: {player} played an illegal move")]
    IllegalMove {
        ply: u32,
        player: PlayerId,
        #[source]
        source: IsolationError,
    },
}

/// Winner of `state`, if the game is over.
#[inline]
pub fn winner(state: &Isolation) -> Option<PlayerId> {
    state.is_terminal().then(|| state.to_move().opposite())
}

/// Asks the agent to move for the player to move and applies the committed action.
fn play_turn<S: GameTreeSearch<Isolation>>(
    state: &Isolation,
    agents: &mut ByPlayer<Agent<Isolation, S>>,
) -> Result<(Isolation, Action, SearchCounter), BenchmarkError> {
    let player = state.to_move();
    let ply = state.ply_count();
    let mut last = LastAction::default();
    let counter = agents[player].get_action(state, &mut last);
    let action = last.into_inner().ok_or(BenchmarkError::NoMove { ply, player })?;
    let next = state
        .result(action)
        .map_err(|source| BenchmarkError::IllegalMove { ply, player, source })?;
    Ok((next, action, counter))
}

/// Plays one game of at most `steps` plies. `None` as the winner if the game was cut short.
pub fn match_round<S: GameTreeSearch<Isolation>>(
    agents: &mut ByPlayer<Agent<Isolation, S>>,
    steps: u32,
) -> Result<(Option<PlayerId>, Duration, SearchCounter), BenchmarkError> {
    let t0 = Instant::now();
    let mut state = Isolation::new();
    let mut total_counter = SearchCounter::default();
    for _ in 0..steps {
        if state.is_terminal() {
            break;
        }
        let (next, _, c) = play_turn(&state, agents)?;
        total_counter.add_in_place(&c);
        state = next;
    }
    Ok((winner(&state), t0.elapsed(), total_counter))
}

/// Plays one game, printing every move and the final board.
pub fn trace_game<S: GameTreeSearch<Isolation>>(
    agents: &mut ByPlayer<Agent<Isolation, S>>,
    steps: u32,
) -> Result<(u128, SearchCounter), BenchmarkError> {
    let mut state = Isolation::new();
    let mut total_counter = SearchCounter::default();
    let mut total_time: u128 = 0;
    for i in 0..steps {
        if let Some(winner) = winner(&state) {
            println!("Winner: {winner}");
            break;
        }
        let t1 = Instant::now();
        let player = state.to_move();
        let (next, action, c) = play_turn(&state, agents)?;
        let dt_ns = t1.elapsed().as_nanos();
        total_time += dt_ns;
        total_counter.add_in_place(&c);
        println!("--> {i:2} {player} {action} | {} | {c:?}", c.summary(dt_ns));
        debug!("\n{next}");
        state = next;
    }
    println!("{state}");
    Ok((total_time, total_counter))
}

#[derive(Debug, Default)]
pub struct IterateMatchOpts {
    pub rounds: u32,
    pub steps: u32,
}

/// Plays `rounds` games in parallel, alternating which agent moves first.
/// Returns the total score (2 per win, 1 per unfinished game) of the agent built by `make_agents().0`,
/// the same score normalized to `[0, 1]`, and the combined counters.
pub fn iterate_match<S, M>(make_agents: &M, opts: IterateMatchOpts) -> Result<(i32, f32, SearchCounter), BenchmarkError>
where
    S: GameTreeSearch<Isolation>,
    M: Send + Sync + Fn(u64) -> ByPlayer<Agent<Isolation, S>>,
{
    let IterateMatchOpts { rounds, steps } = opts;
    let matches_started = AtomicI32::default();
    let (score, total_counter) = (0..rounds)
        .into_par_iter()
        .map(|_| -> Result<(i32, SearchCounter), BenchmarkError> {
            let i = matches_started.fetch_add(1, Ordering::SeqCst);
            let flip = i % 2 == 1;
            let mut agents = make_agents(i as u64);
            if flip {
                agents.flip();
            }

            info!("+ Round {:3}", i + 1);
            let (winner, dt, c) = match_round(&mut agents, steps)?;
            let (winner_str, d_score) = get_winner_value(winner, flip);
            println!(
                "- Round {:3} ... {winner_str} dt={:6.2}ms, states_visited={:8}",
                i + 1,
                dt.as_millis(),
                c.states_visited
            );
            Ok((d_score, c))
        })
        .try_reduce(
            || (Default::default(), Default::default()),
            |(s, mut c), (s1, c1)| {
                c.add_in_place(&c1);
                Ok((s + s1, c))
            },
        )?;

    Ok((score, (score as f32) / ((2 * rounds.max(1)) as f32), total_counter))
}

/// Result string and score of a game for the agent that was created first.
pub fn get_winner_value(winner: Option<PlayerId>, flip: bool) -> (&'static str, i32) {
    match winner {
        Some(PlayerId::PlayerFirst) => {
            if flip {
                ("0-1", 0)
            } else {
                ("1-0", 2)
            }
        }
        Some(PlayerId::PlayerSecond) => {
            if flip {
                ("1-0", 2)
            } else {
                ("0-1", 0)
            }
        }
        None => ("1/2", 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::{GreedySearch, RandomSearch};
    use isolation_sim::rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn game_runs_to_completion() {
        let mut agents = ByPlayer::new(
            Agent::new(GreedySearch, Some(1)),
            Agent::new(GreedySearch, Some(2)),
        );
        let (winner, _, counter) = match_round(&mut agents, 200).unwrap();
        assert!(winner.is_some());
        assert!(counter.iterations > 0);
    }

    #[test]
    fn cut_short_game_has_no_winner() {
        let mut agents = ByPlayer::new(
            Agent::new(GreedySearch, Some(1)),
            Agent::new(GreedySearch, Some(2)),
        );
        let (winner, _, _) = match_round(&mut agents, 2).unwrap();
        assert_eq!(None, winner);
    }

    #[test]
    fn parallel_rounds_add_up() {
        let make_agents = |i: u64| {
            let random = |seed| RandomSearch {
                rng: SmallRng::seed_from_u64(seed),
            };
            ByPlayer::new(Agent::new(random(i), Some(i)), Agent::new(random(i + 100), Some(i + 100)))
        };
        let (score, normalized, _) = iterate_match(&make_agents, IterateMatchOpts { rounds: 4, steps: 200 }).unwrap();
        assert!((0..=8).contains(&score));
        assert!((0.0..=1.0).contains(&normalized));
    }

    #[test]
    fn winner_value_follows_flip() {
        assert_eq!(("1-0", 2), get_winner_value(Some(PlayerId::PlayerFirst), false));
        assert_eq!(("1-0", 2), get_winner_value(Some(PlayerId::PlayerSecond), true));
        assert_eq!(("0-1", 0), get_winner_value(Some(PlayerId::PlayerSecond), false));
        assert_eq!(("1/2", 1), get_winner_value(None, true));
    }
}
