use isolation_search::{ActionSink, Game, GameTreeSearch, PlayerId, SearchCounter};
use isolation_sim::rand::{rngs::SmallRng, seq::SliceRandom};

/// Plays a uniformly random legal action.
pub struct RandomSearch {
    pub rng: SmallRng,
}

impl<G: Game> GameTreeSearch<G> for RandomSearch {
    fn search_into(&mut self, position: &G, _: PlayerId, sink: &mut dyn ActionSink<G::Action>) -> SearchCounter {
        if let Some(&action) = position.actions().choose(&mut self.rng) {
            sink.put(action);
        }
        SearchCounter {
            iterations: 1,
            ..SearchCounter::ZERO
        }
    }
}

/// Plays the action that leaves the mover with the most liberties. Ties go to the first action.
#[derive(Debug, Default, Copy, Clone)]
pub struct GreedySearch;

impl<G: Game> GameTreeSearch<G> for GreedySearch {
    fn search_into(
        &mut self,
        position: &G,
        maximize_player: PlayerId,
        sink: &mut dyn ActionSink<G::Action>,
    ) -> SearchCounter {
        let mut counter = SearchCounter::ZERO;
        let mut best: Option<(G::Action, usize)> = None;
        for action in position.actions() {
            let Ok(next) = position.result(action) else {
                continue;
            };
            counter.states_visited += 1;
            counter.evals += 1;
            let liberties = next.liberties(next.location(maximize_player)).len();
            if best.map_or(true, |(_, b)| liberties > b) {
                best = Some((action, liberties));
            }
        }
        if let Some((action, _)) = best {
            sink.put(action);
            counter.iterations = 1;
            counter.last_depth = 1;
        }
        counter
    }
}
