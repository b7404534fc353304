use crate::*;

/// Static evaluation of non-terminal positions at the search horizon.
pub trait EvalPolicy<G: Game>: Send + Sync {
    /// Score of `state` from the point of view of `player_id`. Higher is better.
    fn evaluate(&self, state: &G, player_id: PlayerId) -> i32;
}

/// Own liberties minus the opponent's liberties.
#[derive(Debug, Default, Copy, Clone)]
pub struct MobilityEval;

impl<G: Game> EvalPolicy<G> for MobilityEval {
    #[inline]
    fn evaluate(&self, state: &G, player_id: PlayerId) -> i32 {
        let own = state.liberties(state.location(player_id)).len() as i32;
        let opp = state.liberties(state.location(player_id.opposite())).len() as i32;
        own - opp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isolation_sim::isolation::{Action, Cell, Direction, Isolation};

    #[test]
    fn mobility_is_antisymmetric() {
        let state = Isolation::new()
            .result(Action::Place(Cell::from_xy(0, 0).unwrap()))
            .unwrap()
            .result(Action::Place(Cell::from_xy(5, 4).unwrap()))
            .unwrap();
        // Corner piece reaches 2 cells, centre piece 8.
        assert_eq!(-6, MobilityEval.evaluate(&state, PlayerId::PlayerFirst));
        assert_eq!(6, MobilityEval.evaluate(&state, PlayerId::PlayerSecond));

        let next = state.result(Action::Jump(Direction::NNE)).unwrap();
        assert_eq!(
            -MobilityEval.evaluate(&next, PlayerId::PlayerFirst),
            MobilityEval.evaluate(&next, PlayerId::PlayerSecond)
        );
    }
}
