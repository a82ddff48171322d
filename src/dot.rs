//! Game tree to DOT (Graphviz) conversion.
//!
//! Renders a built [`GameTree`] for visualization with Graphviz tools like
//! `dot` or online viewers. Internal nodes are ellipses labeled with their
//! position, leaves are boxes, and nodes at the same depth share a rank so
//! the levels line up with the turn sequence. The annotated variant appends
//! each node's resolved minimax value for one evaluated table.

use crate::engine::{GameTree, TreeEvaluator};

impl GameTree {
    /// Convert the tree to DOT (Graphviz) format.
    ///
    /// Node labels use the position encoding of
    /// [`GameState`](crate::engine::GameState): owners, values, then the
    /// pending turn. Render with `dot -Tpng tree.dot -o tree.png`.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.render_dot(None)
    }

    /// Convert the tree to DOT format with per-node minimax values.
    ///
    /// The evaluator must hold the values of a finished
    /// [`evaluate`](TreeEvaluator::evaluate) pass over this tree; each label
    /// gains an `=0` or `=1` suffix showing the node's resolved value.
    pub fn to_dot_with_values(&self, evaluator: &TreeEvaluator) -> Result<String, std::fmt::Error> {
        self.render_dot(Some(evaluator))
    }

    fn render_dot(&self, evaluator: Option<&TreeEvaluator>) -> Result<String, std::fmt::Error> {
        use std::fmt::Write as _;

        let mut dot = String::new();
        writeln!(dot, "digraph game_tree {{")?;
        writeln!(dot, "node [shape=ellipse, fontsize=10];")?;

        // Group nodes by depth so every level shares a rank
        for level in &self.levels {
            writeln!(dot, "{{ rank=same")?;
            for &id in level {
                let node = self.node(id);
                let mut label = node.state.to_string();
                if let Some(evaluator) = evaluator {
                    if let Some(value) = evaluator.value(id) {
                        label.push_str(if value { "=1" } else { "=0" });
                    }
                }
                if node.state.is_terminal() {
                    writeln!(dot, "{} [shape=box, label=\"{}\"];", id, label)?;
                } else {
                    writeln!(dot, "{} [label=\"{}\"];", id, label)?;
                }
            }
            writeln!(dot, "}}")?;
        }

        // One edge per parent-child link
        for (id, node) in self.nodes.iter().enumerate() {
            for &child in &node.children {
                writeln!(dot, "{} -> {};", id, child)?;
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::{GameTree, TreeEvaluator, TruthTable};

    fn build(num_vars: usize, text: &str) -> GameTree {
        GameTree::build(num_vars, &text.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_to_dot_basic() {
        let tree = build(2, "F0 V0 F1 V1");
        let dot = tree.to_dot().unwrap();

        assert!(dot.starts_with("digraph game_tree {"));
        assert!(dot.ends_with("}\n"));
        // Every node except the root is the target of exactly one edge
        assert_eq!(dot.matches(" -> ").count(), tree.num_nodes() - 1);
        // Terminal positions render as boxes
        assert_eq!(dot.matches("shape=box").count(), tree.leaves().len());
    }

    #[test]
    fn test_to_dot_groups_levels() {
        let tree = build(2, "F0 V0 F1 V1");
        let dot = tree.to_dot().unwrap();

        assert_eq!(dot.matches("rank=same").count(), tree.levels.len());
    }

    #[test]
    fn test_to_dot_with_values_annotates_every_node() {
        let tree = build(2, "F0 V0 F1 V1");
        let mut evaluator = TreeEvaluator::new(&tree);
        evaluator
            .evaluate(&tree, &TruthTable::all_true(2))
            .unwrap();

        let dot = tree.to_dot_with_values(&evaluator).unwrap();
        // Under the constant-true table every node resolves to 1
        assert_eq!(dot.matches("=1\"").count(), tree.num_nodes());
        assert_eq!(dot.matches("=0\"").count(), 0);
    }
}
