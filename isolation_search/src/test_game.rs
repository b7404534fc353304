//! Fixtures for the search tests: an explicit game tree for hand-built positions, and a debug event counter.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use isolation_sim::game_tree_search::{ActionList, CellList, Game, WIN};
use isolation_sim::smallvec::smallvec;
use isolation_sim::types::player_id::PlayerId;
use proptest::prelude::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    layer::{Context, SubscriberExt},
    Layer,
};

/// Shape of a game tree. Mobility is given as `(first player's liberties, second player's liberties)`.
#[derive(Debug, Clone)]
pub enum Shape {
    /// A position where the player to move is stuck, with its utility for the first player.
    Terminal(i32),
    Inner((usize, usize), Vec<Shape>),
}

#[derive(Debug, Clone)]
struct Position {
    to_move: PlayerId,
    children: Vec<usize>,
    utility_first: i32,
    liberties: (usize, usize),
}

#[derive(Debug, Clone)]
pub struct TreeGame {
    positions: Arc<Vec<Position>>,
    current: usize,
    ply: u32,
}

impl TreeGame {
    pub fn new(shape: &Shape) -> Self {
        fn flatten(shape: &Shape, to_move: PlayerId, out: &mut Vec<Position>) -> usize {
            let index = out.len();
            out.push(Position {
                to_move,
                children: vec![],
                utility_first: 0,
                liberties: (0, 0),
            });
            match shape {
                Shape::Terminal(utility) => out[index].utility_first = *utility,
                Shape::Inner(liberties, children) => {
                    out[index].liberties = *liberties;
                    let ids = children
                        .iter()
                        .map(|child| flatten(child, to_move.opposite(), out))
                        .collect();
                    out[index].children = ids;
                }
            }
            index
        }

        let mut positions = vec![];
        flatten(shape, PlayerId::PlayerFirst, &mut positions);
        Self {
            positions: Arc::new(positions),
            current: 0,
            ply: 0,
        }
    }

    /// The first player chooses among `n` moves that all end the game in a loss for them.
    pub fn single_choice(n: usize) -> Self {
        Self::new(&Shape::Inner((n, 0), vec![Shape::Terminal(-WIN); n]))
    }

    /// The first player chooses among `n` moves; only `winning` ends the game in their favour.
    pub fn one_winning_move(n: usize, winning: usize) -> Self {
        let children = (0..n)
            .map(|i| Shape::Terminal(if i == winning { WIN } else { -WIN }))
            .collect();
        Self::new(&Shape::Inner((n, n), children))
    }

    fn position(&self) -> &Position {
        &self.positions[self.current]
    }
}

impl Game for TreeGame {
    type Action = u8;
    type Location = u8;
    type Error = String;

    fn to_move(&self) -> PlayerId {
        self.position().to_move
    }

    fn ply_count(&self) -> u32 {
        self.ply
    }

    fn is_terminal(&self) -> bool {
        self.position().children.is_empty()
    }

    fn actions(&self) -> ActionList<u8> {
        (0..self.position().children.len() as u8).collect()
    }

    fn result(&self, action: u8) -> Result<Self, String> {
        let Some(&next) = self.position().children.get(action as usize) else {
            return Err(format!("no move {action} from position {}", self.current));
        };
        Ok(Self {
            positions: self.positions.clone(),
            current: next,
            ply: self.ply + 1,
        })
    }

    fn utility(&self, player_id: PlayerId) -> i32 {
        if !self.is_terminal() {
            return 0;
        }
        let u = self.position().utility_first;
        match player_id {
            PlayerId::PlayerFirst => u,
            PlayerId::PlayerSecond => -u,
        }
    }

    fn location(&self, player_id: PlayerId) -> Option<u8> {
        Some(player_id.index() as u8)
    }

    fn liberties(&self, location: Option<u8>) -> CellList<u8> {
        let (first, second) = self.position().liberties;
        let n = match location {
            Some(0) => first,
            _ => second,
        };
        smallvec![0; n]
    }
}

/// Random game trees of depth up to 4 whose inner positions have 1 to 3 moves.
pub fn arb_shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![Just(Shape::Terminal(WIN)), Just(Shape::Terminal(-WIN))];
    leaf.prop_recursive(4, 81, 3, |inner| {
        ((0usize..8, 0usize..8), prop::collection::vec(inner, 1..=3))
            .prop_map(|(liberties, children)| Shape::Inner(liberties, children))
    })
}

struct CountDebugEvents(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for CountDebugEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::DEBUG {
            self.0.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Number of debug-level events emitted on this thread while `f` runs.
pub fn count_debug_events(f: impl FnOnce()) -> usize {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(CountDebugEvents(count.clone()));
    tracing::subscriber::with_default(subscriber, f);
    count.load(Ordering::Relaxed)
}
