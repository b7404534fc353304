use super::*;

/// Default exploration constant: half of the canonical UCT constant sqrt(2), rounded.
pub const DEFAULT_EXPLORATION: f64 = 0.5 * 1.41;

/// Trait for customizing the MCTS selection phase.
/// Starting at the root, the child with the highest `score` is descended into until a leaf is reached.
///
/// See also: <https://en.wikipedia.org/wiki/Monte_Carlo_tree_search#Exploration_and_exploitation>
pub trait SelectionPolicy<G: Game>: Send + Sync {
    /// Selection value of a child with statistics `child`, given its parent's visit count.
    fn score(&self, parent_visits: u32, child: &NodeStats) -> f64;

    /// The child of `token` maximizing [`SelectionPolicy::score`], ties broken by insertion order.
    /// `None` for a leaf.
    fn best_child(&self, tree: &Arena<NodeData<G>>, token: Token) -> Option<Token> {
        let node = tree.get(token)?;
        let parent_visits = node.data.stats.visit_count;
        let mut best: Option<(Token, f64)> = None;
        for child in node.children(tree) {
            let score = self.score(parent_visits, &child.data.stats);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((child.token(), score)),
            }
        }
        best.map(|(token, _)| token)
    }
}

/// Upper Confidence bound applied to Trees.
#[derive(Debug, Copy, Clone)]
pub struct UCT {
    pub c: f64,
}

impl Default for UCT {
    fn default() -> Self {
        Self { c: DEFAULT_EXPLORATION }
    }
}

/// `w / v + c * sqrt(ln(n) / v)`, or `+inf` for an unvisited child so that it is explored first.
#[inline]
pub fn uct_value(parent_visits: u32, win_score: i64, visit_count: u32, c: f64) -> f64 {
    if visit_count == 0 {
        return f64::INFINITY;
    }
    let v = visit_count as f64;
    (win_score as f64) / v + c * f64::sqrt(f64::ln(parent_visits as f64) / v)
}

impl<G: Game> SelectionPolicy<G> for UCT {
    #[inline]
    fn score(&self, parent_visits: u32, child: &NodeStats) -> f64 {
        uct_value(parent_visits, child.win_score, child.visit_count, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_game::TreeGame;

    fn tree_with_children(stats: &[NodeStats], parent: NodeStats) -> (Arena<NodeData<TreeGame>>, Token) {
        let game = TreeGame::single_choice(stats.len());
        let mut root_data = NodeData::new(game.clone(), None);
        root_data.stats = parent;
        let (mut tree, root) = Arena::with_data(root_data);
        for (i, s) in stats.iter().enumerate() {
            let action = game.actions()[i];
            let mut data = NodeData::new(game.result(action).unwrap(), Some(action));
            data.stats = *s;
            root.append(&mut tree, data);
        }
        (tree, root)
    }

    fn child_index(tree: &Arena<NodeData<TreeGame>>, root: Token, token: Token) -> usize {
        tree.get(root)
            .unwrap()
            .children(tree)
            .position(|c| c.token() == token)
            .unwrap()
    }

    #[test]
    fn unvisited_child_scores_infinity() {
        assert_eq!(f64::INFINITY, uct_value(10, 0, 0, DEFAULT_EXPLORATION));
    }

    #[test]
    fn uct_value_matches_formula() {
        let v = uct_value(10, 3, 4, DEFAULT_EXPLORATION);
        let expected = 0.75 + 0.705 * (10f64.ln() / 4.0).sqrt();
        assert!((v - expected).abs() < 1e-12);
    }

    #[test]
    fn unvisited_children_are_selected_before_visited_one() {
        let stats = [
            NodeStats::new(1, 1),
            NodeStats::default(),
            NodeStats::default(),
            NodeStats::default(),
        ];
        let (tree, root) = tree_with_children(&stats, NodeStats::new(1, 1));
        let best = SelectionPolicy::<TreeGame>::best_child(&UCT::default(), &tree, root).unwrap();
        assert_eq!(1, child_index(&tree, root, best), "first unvisited child wins the tie");
    }

    #[test]
    fn ties_go_to_first_child() {
        let stats = [NodeStats::new(2, 0), NodeStats::new(2, 0)];
        let (tree, root) = tree_with_children(&stats, NodeStats::new(4, 0));
        let best = SelectionPolicy::<TreeGame>::best_child(&UCT::default(), &tree, root).unwrap();
        assert_eq!(0, child_index(&tree, root, best));
    }

    #[test]
    fn exploration_prefers_less_visited_child_with_equal_mean() {
        let stats = [NodeStats::new(8, 4), NodeStats::new(2, 1)];
        let (tree, root) = tree_with_children(&stats, NodeStats::new(10, 5));
        let best = SelectionPolicy::<TreeGame>::best_child(&UCT::default(), &tree, root).unwrap();
        assert_eq!(1, child_index(&tree, root, best));
    }

    #[test]
    fn leaf_has_no_best_child() {
        let (tree, root) = tree_with_children(&[], NodeStats::new(1, 0));
        assert_eq!(None, SelectionPolicy::<TreeGame>::best_child(&UCT::default(), &tree, root));
    }
}
