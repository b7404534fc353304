use std::fmt::Debug;

use smallvec::SmallVec;

use crate::types::player_id::PlayerId;

/// Legal actions of a position. Order is stable for a given state.
pub type ActionList<A> = SmallVec<[A; 8]>;

/// Cells reachable from a location.
pub type CellList<L> = SmallVec<[L; 8]>;

/// Utility of a won terminal position. A lost one is `-WIN`.
pub const WIN: i32 = i32::MAX;

/// A two-player, zero-sum, perfect-information game with immutable states.
///
/// Every transition produces a new state through [`Game::result`]; the receiver is never modified,
/// so positions can be shared freely between the search tree and rollouts.
pub trait Game: Debug + Clone + Send + Sync {
    type Action: Copy + Clone + Send + Sync + Debug + PartialEq + Eq;
    type Location: Copy + Clone + Send + Sync + Debug + PartialEq + Eq;
    type Error: Debug;

    /// The player whose turn it is.
    fn to_move(&self) -> PlayerId;

    /// Number of moves played so far.
    fn ply_count(&self) -> u32;

    /// True iff the player to move has no legal action.
    fn is_terminal(&self) -> bool;

    /// Legal actions for the player to move. Non-empty unless [`Game::is_terminal`].
    fn actions(&self) -> ActionList<Self::Action>;

    /// The successor state after `action`.
    fn result(&self, action: Self::Action) -> Result<Self, Self::Error>;

    /// `WIN` if `player_id` has won, `-WIN` if lost. Only meaningful on terminal states, `0` elsewhere.
    fn utility(&self, player_id: PlayerId) -> i32;

    /// Location of the piece of `player_id`, `None` before it has been placed.
    fn location(&self, player_id: PlayerId) -> Option<Self::Location>;

    /// Open cells a piece at `location` could move to. An unplaced piece may go to any open cell.
    fn liberties(&self, location: Option<Self::Location>) -> CellList<Self::Location>;
}
