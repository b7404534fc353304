use std::fmt::Display;

use thiserror::Error;

use crate::game_tree_search::{ActionList, CellList, Game, WIN};
use crate::types::{by_player::ByPlayer, player_id::PlayerId};

mod action;
pub use action::*;

pub const WIDTH: u8 = 11;
pub const HEIGHT: u8 = 9;

/// Cells per bitboard row: the board width plus two padding columns, so that
/// knight offsets from an edge column land on padding instead of wrapping.
pub const ROW_STRIDE: u8 = WIDTH + 2;

/// Number of bits in use. The final row needs no trailing padding.
pub const SIZE: u8 = ROW_STRIDE * HEIGHT - 2;

const fn blank_board() -> u128 {
    let mut board = 0u128;
    let mut i = 0;
    while i < SIZE {
        if i % ROW_STRIDE < WIDTH {
            board |= 1u128 << i;
        }
        i += 1;
    }
    board
}

/// All playable cells open.
pub const BLANK_BOARD: u128 = blank_board();

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsolationError {
    #[error("{action} is not available for {player}: the destination is closed or off the board")]
    InvalidMove { player: PlayerId, action: Action },
    #[error("{player} must place a piece before jumping")]
    NotPlaced { player: PlayerId },
    #[error("{player} has already placed a piece")]
    AlreadyPlaced { player: PlayerId },
}

/// A Knight's Isolation position.
///
/// `board` has a set bit for every open cell. Cells occupied by a piece or
/// visited earlier are closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Isolation {
    pub board: u128,
    pub ply_count: u32,
    pub locs: ByPlayer<Option<Cell>>,
}

impl Default for Isolation {
    fn default() -> Self {
        Self::new()
    }
}

impl Isolation {
    pub const fn new() -> Self {
        Self {
            board: BLANK_BOARD,
            ply_count: 0,
            locs: ByPlayer::new(None, None),
        }
    }

    #[inline]
    pub fn is_open(&self, cell: Cell) -> bool {
        cell.0 < SIZE && self.board & (1u128 << cell.0) != 0
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..SIZE).map(Cell).filter(|&c| self.is_open(c))
    }

    #[inline]
    pub fn open_cell_count(&self) -> u32 {
        self.board.count_ones()
    }

    fn has_liberties(&self, player_id: PlayerId) -> bool {
        match self.locs[player_id] {
            None => self.board != 0,
            Some(loc) => Direction::VALUES
                .iter()
                .any(|&d| loc.offset(d).is_some_and(|c| self.is_open(c))),
        }
    }

    fn destination(&self, player_id: PlayerId, action: Action) -> Result<Cell, IsolationError> {
        let cell = match (self.locs[player_id], action) {
            (None, Action::Place(cell)) => Some(cell),
            (Some(loc), Action::Jump(direction)) => loc.offset(direction),
            (None, Action::Jump(..)) => return Err(IsolationError::NotPlaced { player: player_id }),
            (Some(..), Action::Place(..)) => return Err(IsolationError::AlreadyPlaced { player: player_id }),
        };
        match cell {
            Some(cell) if self.is_open(cell) => Ok(cell),
            _ => Err(IsolationError::InvalidMove {
                player: player_id,
                action,
            }),
        }
    }
}

impl Game for Isolation {
    type Action = Action;
    type Location = Cell;
    type Error = IsolationError;

    #[inline]
    fn to_move(&self) -> PlayerId {
        PlayerId::from_ply(self.ply_count)
    }

    #[inline]
    fn ply_count(&self) -> u32 {
        self.ply_count
    }

    #[inline]
    fn is_terminal(&self) -> bool {
        !self.has_liberties(self.to_move())
    }

    fn actions(&self) -> ActionList<Action> {
        match self.locs[self.to_move()] {
            None => self.open_cells().map(Action::Place).collect(),
            Some(loc) => Direction::VALUES
                .iter()
                .copied()
                .filter(|&d| loc.offset(d).is_some_and(|c| self.is_open(c)))
                .map(Action::Jump)
                .collect(),
        }
    }

    fn result(&self, action: Action) -> Result<Self, IsolationError> {
        let player_id = self.to_move();
        let cell = self.destination(player_id, action)?;
        let mut next = *self;
        next.board &= !(1u128 << cell.0);
        next.locs[player_id] = Some(cell);
        next.ply_count += 1;
        Ok(next)
    }

    fn utility(&self, player_id: PlayerId) -> i32 {
        if !self.is_terminal() {
            0
        } else if player_id == self.to_move() {
            -WIN
        } else {
            WIN
        }
    }

    #[inline]
    fn location(&self, player_id: PlayerId) -> Option<Cell> {
        self.locs[player_id]
    }

    fn liberties(&self, location: Option<Cell>) -> CellList<Cell> {
        match location {
            None => self.open_cells().collect(),
            Some(loc) => Direction::VALUES
                .iter()
                .filter_map(|&d| loc.offset(d))
                .filter(|&c| self.is_open(c))
                .collect(),
        }
    }
}

impl Display for Isolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in (0..HEIGHT).rev() {
            for col in 0..WIDTH {
                let Some(cell) = Cell::from_xy(col, row) else {
                    continue;
                };
                let c = if self.locs.0 == Some(cell) {
                    '1'
                } else if self.locs.1 == Some(cell) {
                    '2'
                } else if self.is_open(cell) {
                    '.'
                } else {
                    '#'
                };
                write!(f, "{c}")?;
                if col + 1 < WIDTH {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
