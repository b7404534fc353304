use std::fmt::Display;

use super::{HEIGHT, ROW_STRIDE, WIDTH};

/// A cell of the board, indexed as `row * ROW_STRIDE + col`.
/// The two padding columns per row never hold an open cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell(pub u8);

impl Cell {
    /// Returns `None` for coordinates off the board.
    #[inline]
    pub fn from_xy(col: u8, row: u8) -> Option<Cell> {
        if col < WIDTH && row < HEIGHT {
            Some(Cell(row * ROW_STRIDE + col))
        } else {
            None
        }
    }

    #[inline]
    pub fn col(self) -> u8 {
        self.0 % ROW_STRIDE
    }

    #[inline]
    pub fn row(self) -> u8 {
        self.0 / ROW_STRIDE
    }

    /// The cell reached by jumping in `direction`. May land on padding or outside the board;
    /// callers check the board for openness.
    #[inline]
    pub fn offset(self, direction: Direction) -> Option<Cell> {
        let target = (self.0 as i16) + direction.offset();
        u8::try_from(target).ok().map(Cell)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("({}, {})", self.col(), self.row()))
    }
}

/// The eight knight moves, named by their dominant compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    NNE,
    ENE,
    ESE,
    SSE,
    SSW,
    WSW,
    WNW,
    NNW,
}

impl Direction {
    pub const VALUES: [Direction; 8] = [
        Direction::NNE,
        Direction::ENE,
        Direction::ESE,
        Direction::SSE,
        Direction::SSW,
        Direction::WSW,
        Direction::WNW,
        Direction::NNW,
    ];

    #[inline]
    pub const fn offset(self) -> i16 {
        const R: i16 = ROW_STRIDE as i16;
        match self {
            Direction::NNE => 2 * R + 1,
            Direction::ENE => R + 2,
            Direction::ESE => -R + 2,
            Direction::SSE => -2 * R + 1,
            Direction::SSW => -2 * R - 1,
            Direction::WSW => -R - 2,
            Direction::WNW => R - 2,
            Direction::NNW => 2 * R - 1,
        }
    }
}

/// A move: the initial placement of a piece, or a knight jump from its current cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Place(Cell),
    Jump(Direction),
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Place(cell) => f.write_fmt(format_args!("Place{cell}")),
            Action::Jump(direction) => f.write_fmt(format_args!("{direction:?}")),
        }
    }
}
