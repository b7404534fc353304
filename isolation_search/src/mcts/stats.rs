use std::{fmt::Display, ops::AddAssign};

/// Statistics accumulated from the simulations that passed through a node.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct NodeStats {
    pub visit_count: u32,
    pub win_score: i64,
}

impl Display for NodeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:+}/{}", self.win_score, self.visit_count))
    }
}

impl NodeStats {
    #[inline]
    pub fn new(visit_count: u32, win_score: i64) -> Self {
        Self { visit_count, win_score }
    }

    /// Records one simulation with outcome `result` (`+1` win, `-1` loss).
    #[inline]
    pub fn add_result(&mut self, result: i32) {
        self.visit_count += 1;
        self.win_score += result as i64;
    }

    /// Mean simulation result in `[-1, 1]`, `0` for an unvisited node.
    #[inline]
    pub fn mean(self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            (self.win_score as f64) / (self.visit_count as f64)
        }
    }
}

impl AddAssign for NodeStats {
    fn add_assign(&mut self, rhs: Self) {
        self.visit_count += rhs.visit_count;
        self.win_score += rhs.win_score;
    }
}
