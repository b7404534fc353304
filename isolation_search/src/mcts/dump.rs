use super::*;

/// Nested snapshot of the top levels of a search tree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeDump<T> {
    #[cfg_attr(feature = "serde", serde(rename = "_"))]
    pub value: T,
    pub children: Vec<TreeDump<T>>,
}

impl<T> TreeDump<T> {
    pub fn new(value: T, children: Vec<TreeDump<T>>) -> Self {
        Self { value, children }
    }
}

impl<G: Game> NodeData<G> {
    fn description(&self, children_count: usize) -> String {
        let action = self
            .action
            .map(|a| format!("{a:?}"))
            .unwrap_or_else(|| "[Root]".to_string());
        format!(
            "{action} {} (mean={:+.3}), #children = {children_count}",
            self.stats,
            self.stats.mean()
        )
    }
}

impl<G: Game, S: SelectionPolicy<G>> MCTS<G, S> {
    /// Descriptions of `token` and its descendants, `max_depth` levels deep.
    pub fn dump_tree(&self, token: Token, max_depth: u8) -> TreeDump<String> {
        let Some(node) = self.tree.get(token) else {
            return Default::default();
        };
        let desc = node.data.description(node.children(&self.tree).count());
        if max_depth <= 1 {
            return TreeDump::new(desc, vec![]);
        }
        let children = node
            .children(&self.tree)
            .map(|child| self.dump_tree(child.token(), max_depth - 1))
            .collect();
        TreeDump::new(desc, children)
    }

    /// Logs the subtree of `token` at debug level, most visited children first.
    /// Children visited fewer than `min_visits` times are summarized in one line.
    pub fn print_tree(&self, token: Token, max_depth: u8, min_visits: u32) {
        self.print_subtree(token, 0, max_depth, min_visits);
    }

    fn print_subtree(&self, token: Token, depth: u8, max_depth: u8, min_visits: u32) {
        let Some(node) = self.tree.get(token) else {
            return;
        };
        let indent = "  ".repeat(depth as usize);
        debug!("{indent}- {}", node.data.description(node.children(&self.tree).count()));
        if depth >= max_depth {
            return;
        }

        let mut children: Vec<_> = node.children(&self.tree).collect();
        children.sort_by_key(|c| std::cmp::Reverse(c.data.stats.visit_count));
        let mut omitted = NodeStats::default();
        let mut omitted_count = 0;
        for (i, child) in children.into_iter().enumerate() {
            if i == 0 || child.data.stats.visit_count >= min_visits {
                self.print_subtree(child.token(), depth + 1, max_depth, min_visits);
            } else {
                omitted += child.data.stats;
                omitted_count += 1;
            }
        }
        if omitted_count > 0 {
            debug!("{indent}  - ...[{omitted_count} omitted] ({omitted})");
        }
    }
}
