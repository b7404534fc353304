use crate::game_tree_search::*;
use crate::isolation::*;
use crate::types::player_id::PlayerId;

pub mod isolation;


impl Isolation {
    /// Panics: If `result` causes an error.
    fn advance_multiple<T: IntoIterator<Item = Action>>(self, actions: T) -> Isolation {
        actions
            .into_iter()
            .fold(self, |state, action| state.result(action).unwrap())
    }
}

fn cell(col: u8, row: u8) -> Cell {
    Cell::from_xy(col, row).unwrap()
}
