// paths.rs
// ──────────────────────────────────────────────────────────────────────────────
// Distinct-path counting over the subgraph reachable from a root.
//
// 1. Collect every node reachable from the root (iterative DFS).
// 2. Order them with Kahn's algorithm, using in-degrees restricted to the
//    reachable subgraph.  Any node left with a non-zero in-degree sits on
//    a cycle and the count is refused.
// 3. Sweep the order forward: count(root) = 1, and every node adds its own
//    count to each successor.  Branching copies the count to every child,
//    merging sums the incoming counts.
// 4. The answer is the sum of counts over the reachable sinks.
// ──────────────────────────────────────────────────────────────────────────────
use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use super::digraph::{NodeId, PathCountingGraph};
use super::error::GraphError;

impl<L, K, F> PathCountingGraph<L, K, F>
where
    K: Eq + Hash + Debug,
    F: Fn(&L) -> K,
{
    /// Number of distinct directed paths from `root` to any sink reachable
    /// from it. A root without outgoing edges has exactly one path.
    ///
    /// # Errors
    /// * `GraphError::UnknownNode` if `root` was never upserted.
    /// * `GraphError::CycleDetected` if a cycle is reachable from `root`.
    /// * `GraphError::Overflow` if the count exceeds `u64::MAX`.
    pub fn count_distinct_paths(&self, root: &L) -> Result<u64, GraphError> {
        let root = self.resolve(root)?;
        let order = self.topological_ids(root)?;

        let mut counts = vec![0u64; self.nodes.len()];
        counts[root] = 1;
        let mut total: u64 = 0;

        for id in order {
            let here = counts[id];
            let succ = &self.nodes[id].succ;
            if succ.is_empty() {
                total = total
                    .checked_add(here)
                    .ok_or_else(|| GraphError::Overflow(self.describe(id)))?;
                continue;
            }
            for &next in succ {
                counts[next] = counts[next]
                    .checked_add(here)
                    .ok_or_else(|| GraphError::Overflow(self.describe(next)))?;
            }
        }

        Ok(total)
    }

    /// Labels of every node reachable from `root`, in an order where each
    /// edge points from an earlier label to a later one. `root` comes first.
    ///
    /// # Errors
    /// Same as [`PathCountingGraph::count_distinct_paths`], minus overflow.
    pub fn topological_order(&self, root: &L) -> Result<Vec<&L>, GraphError> {
        let root = self.resolve(root)?;
        Ok(self
            .topological_ids(root)?
            .into_iter()
            .map(|id| &self.nodes[id].label)
            .collect())
    }

    fn topological_ids(&self, root: NodeId) -> Result<Vec<NodeId>, GraphError> {
        let mut seen = vec![false; self.nodes.len()];
        let mut reachable = Vec::new();
        let mut stack = vec![root];
        seen[root] = true;

        while let Some(id) = stack.pop() {
            reachable.push(id);
            for &next in &self.nodes[id].succ {
                if !seen[next] {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }

        let mut in_degree = vec![0usize; self.nodes.len()];
        for &id in &reachable {
            for &next in &self.nodes[id].succ {
                in_degree[next] += 1;
            }
        }

        // Every reachable node other than the root has a reachable
        // predecessor, so the root is the only possible starting point.
        let mut queue = VecDeque::new();
        if in_degree[root] == 0 {
            queue.push_back(root);
        }

        let mut order = Vec::with_capacity(reachable.len());
        while let Some(id) = queue.pop_front() {
            order.push(id);
            for &next in &self.nodes[id].succ {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    queue.push_back(next);
                }
            }
        }

        if order.len() < reachable.len() {
            let stuck = reachable
                .iter()
                .copied()
                .find(|&id| in_degree[id] > 0)
                .unwrap_or(root);
            return Err(GraphError::CycleDetected {
                node: self.describe(stuck),
                unresolved: reachable.len() - order.len(),
            });
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn graph_from(
        edges: &[(&'static str, &'static str)],
    ) -> PathCountingGraph<&'static str, &'static str, impl Fn(&&'static str) -> &'static str> {
        let mut g = PathCountingGraph::new(|label: &&'static str| *label);
        for &(from, to) in edges {
            g.upsert_node(to, Some(from));
        }
        g
    }

    #[test]
    fn chain_has_one_path() {
        let g = graph_from(&[("root", "a"), ("a", "b"), ("b", "sink")]);
        assert_eq!(g.count_distinct_paths(&"root").unwrap(), 1);
    }

    #[test]
    fn fork_into_two_sinks_has_two_paths() {
        let g = graph_from(&[("root", "left"), ("root", "right")]);
        assert_eq!(g.count_distinct_paths(&"root").unwrap(), 2);
    }

    #[test]
    fn diamond_counts_paths_not_products() {
        let g = graph_from(&[("root", "a"), ("root", "b"), ("a", "sink"), ("b", "sink")]);
        assert_eq!(g.count_distinct_paths(&"root").unwrap(), 2);
    }

    #[test]
    fn stacked_diamonds_multiply() {
        let g = graph_from(&[
            ("root", "a"),
            ("root", "b"),
            ("a", "mid"),
            ("b", "mid"),
            ("mid", "c"),
            ("mid", "d"),
            ("mid", "e"),
            ("c", "sink"),
            ("d", "sink"),
            ("e", "other"),
        ]);
        // 2 ways into `mid`, 3 ways out of it.
        assert_eq!(g.count_distinct_paths(&"root").unwrap(), 6);
    }

    #[test]
    fn isolated_root_has_one_path() {
        let mut g = graph_from(&[("x", "y")]);
        g.upsert_node("root", None);
        assert_eq!(g.count_distinct_paths(&"root").unwrap(), 1);
    }

    #[test]
    fn counting_from_an_inner_node_ignores_upstream() {
        let g = graph_from(&[("root", "a"), ("root", "b"), ("a", "c"), ("a", "d")]);
        assert_eq!(g.count_distinct_paths(&"a").unwrap(), 2);
        assert_eq!(g.count_distinct_paths(&"root").unwrap(), 3);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        // Edges arrive deepest-first, so insertion order is not a
        // topological order.
        let g = graph_from(&[
            ("c", "sink"),
            ("b", "c"),
            ("a", "c"),
            ("root", "b"),
            ("a", "b"),
            ("root", "a"),
        ]);
        // root-a-c, root-a-b-c, root-b-c
        assert_eq!(g.count_distinct_paths(&"root").unwrap(), 3);

        let order = g.topological_order(&"root").unwrap();
        let position = |label: &str| order.iter().position(|l| **l == label).unwrap();
        assert_eq!(order[0], &"root");
        assert!(position("a") < position("b"));
        assert!(position("b") < position("c"));
        assert!(position("c") < position("sink"));
    }

    #[test]
    fn duplicate_edges_do_not_add_paths() {
        let mut g = graph_from(&[("root", "a"), ("root", "b"), ("a", "sink"), ("b", "sink")]);
        let before = g.count_distinct_paths(&"root").unwrap();
        g.upsert_node("sink", Some("a"));
        g.upsert_node("a", Some("root"));
        assert_eq!(g.count_distinct_paths(&"root").unwrap(), before);
    }

    #[test]
    fn two_node_cycle_is_reported() {
        let g = graph_from(&[("a", "b"), ("b", "a")]);
        assert!(matches!(
            g.count_distinct_paths(&"a"),
            Err(GraphError::CycleDetected { unresolved: 2, .. })
        ));
    }

    #[test]
    fn cycle_below_root_is_reported() {
        let g = graph_from(&[("root", "a"), ("a", "b"), ("b", "c"), ("c", "a"), ("b", "sink")]);
        assert!(matches!(
            g.count_distinct_paths(&"root"),
            Err(GraphError::CycleDetected { unresolved: 4, .. })
        ));
        assert!(g.topological_order(&"root").is_err());
    }

    #[test]
    fn self_loop_is_reported() {
        let g = graph_from(&[("root", "root")]);
        assert!(matches!(
            g.count_distinct_paths(&"root"),
            Err(GraphError::CycleDetected { .. })
        ));
    }

    #[test]
    fn unreachable_cycle_is_ignored() {
        let g = graph_from(&[("root", "sink"), ("x", "y"), ("y", "x")]);
        assert_eq!(g.count_distinct_paths(&"root").unwrap(), 1);
    }

    #[test]
    fn unknown_root_fails() {
        let g = graph_from(&[("root", "sink")]);
        assert_eq!(
            g.count_distinct_paths(&"nowhere").unwrap_err(),
            GraphError::UnknownNode("\"nowhere\"".into())
        );
    }

    #[test]
    fn overflow_is_reported() {
        // 64 diamonds in a row yield 2^64 paths.
        let mut g = PathCountingGraph::new(|n: &u32| *n);
        for layer in 0..64u32 {
            let (top, left, right, bottom) = (layer * 3, layer * 3 + 1, layer * 3 + 2, layer * 3 + 3);
            g.upsert_node(left, Some(top));
            g.upsert_node(right, Some(top));
            g.upsert_node(bottom, Some(left));
            g.upsert_node(bottom, Some(right));
        }
        assert!(matches!(
            g.count_distinct_paths(&0),
            Err(GraphError::Overflow(_))
        ));
    }

    /// Counts paths by explicit enumeration.
    fn enumerate_paths(succ: &[Vec<usize>], node: usize) -> u64 {
        if succ[node].is_empty() {
            return 1;
        }
        succ[node].iter().map(|&next| enumerate_paths(succ, next)).sum()
    }

    /// Seeds every sink with 1 and accumulates backwards towards the root.
    fn backward_count(succ: &[Vec<usize>], root: usize) -> u64 {
        let mut memo: Vec<Option<u64>> = vec![None; succ.len()];
        fn visit(succ: &[Vec<usize>], node: usize, memo: &mut Vec<Option<u64>>) -> u64 {
            if let Some(count) = memo[node] {
                return count;
            }
            let count = if succ[node].is_empty() {
                1
            } else {
                succ[node].iter().map(|&next| visit(succ, next, memo)).sum()
            };
            memo[node] = Some(count);
            count
        }
        visit(succ, root, &mut memo)
    }

    proptest! {
        #[test]
        fn forward_count_matches_enumeration_and_backward_count(
            size in 1usize..10,
            raw_edges in proptest::collection::vec((0usize..10, 0usize..10), 0..30),
        ) {
            // Edges only go from lower to higher ids, so the graph is a DAG.
            let mut succ = vec![Vec::new(); size];
            let mut g = PathCountingGraph::new(|n: &usize| *n);
            for n in 0..size {
                g.upsert_node(n, None);
            }
            for (a, b) in raw_edges {
                let (a, b) = (a % size, b % size);
                if a >= b || succ[a].contains(&b) {
                    continue;
                }
                succ[a].push(b);
                g.upsert_node(b, Some(a));
            }

            let counted = g.count_distinct_paths(&0).unwrap();
            prop_assert_eq!(counted, enumerate_paths(&succ, 0));
            prop_assert_eq!(counted, backward_count(&succ, 0));
        }
    }
}
