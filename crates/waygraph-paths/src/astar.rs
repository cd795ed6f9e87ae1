use std::collections::BinaryHeap;

use waygraph_core::{LevelGraph, NodeId};

use crate::PathFinder;
use crate::finder::{Path, QueueEntry, SearchError};
use crate::traits::Heuristic;

impl PathFinder {
    /// Compute the minimum-cost route from `start` to `goal`, guided by a
    /// heuristic.
    ///
    /// Selection is by `cost_so_far + estimate`, so a good heuristic
    /// reaches the goal after settling far fewer nodes than
    /// [`dijkstra`](Self::dijkstra). The returned route is optimal as long
    /// as the heuristic is admissible (see [`Heuristic`]).
    ///
    /// An admissible but inconsistent estimate can settle a node before its
    /// best route is known; when a cheaper route to a closed node turns up
    /// later, the node is reopened and its stored estimate reused rather
    /// than recomputed.
    ///
    /// Returns an empty zero-cost path when `start == goal`, and
    /// [`SearchError::NoPath`] when the goal is unreachable.
    pub fn astar<H: Heuristic>(
        &mut self,
        graph: &LevelGraph,
        start: NodeId,
        goal: NodeId,
        heuristic: &H,
    ) -> Result<Path, SearchError> {
        let Some(start_node) = graph.node(start) else {
            return Err(SearchError::InvalidStart(start));
        };
        let Some(goal_node) = graph.node(goal) else {
            return Err(SearchError::InvalidGoal(goal));
        };
        if start == goal {
            return Ok(Path::default());
        }

        let cur_gen = self.begin(graph.node_count());
        let start_idx = start.index();
        let goal_idx = goal.index();

        // Initialise the start record.
        let start_estimate = heuristic.estimate(start_node, goal_node);
        {
            let rec = &mut self.records[start_idx];
            rec.cost_so_far = 0.0;
            rec.estimated_total = start_estimate;
            rec.via = None;
            rec.generation = cur_gen;
            rec.open = true;
        }

        let mut open: BinaryHeap<QueueEntry> = BinaryHeap::new();
        let mut seq: u64 = 0;
        open.push(QueueEntry {
            idx: start_idx,
            key: start_estimate,
            seq,
        });

        let mut settled: u32 = 0;

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip entries superseded by a cheaper re-push.
            if self.records[ci].generation != cur_gen || !self.records[ci].open {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            // Settle: the record moves from open to closed.
            self.records[ci].open = false;
            settled += 1;
            let current_cost = self.records[ci].cost_so_far;
            let current_id = NodeId(ci as u32);

            for &conn in graph.connections(current_id) {
                debug_assert!(conn.cost >= 0.0, "negative cost reached the search");
                let candidate = current_cost + conn.cost;
                let ni = conn.to.index();

                let rec = &mut self.records[ni];
                let key = if rec.generation == cur_gen {
                    // Known node, open or closed: skip unless strictly
                    // cheaper. An improved closed record is reopened here;
                    // the stored estimate is reused instead of calling the
                    // heuristic again.
                    if rec.cost_so_far <= candidate {
                        continue;
                    }
                    let estimate = rec.estimated_total - rec.cost_so_far;
                    rec.cost_so_far = candidate;
                    rec.estimated_total = candidate + estimate;
                    rec.via = Some(conn);
                    rec.open = true;
                    rec.estimated_total
                } else {
                    let estimate = heuristic.estimate(&graph[conn.to], goal_node);
                    rec.generation = cur_gen;
                    rec.cost_so_far = candidate;
                    rec.estimated_total = candidate + estimate;
                    rec.via = Some(conn);
                    rec.open = true;
                    rec.estimated_total
                };

                seq += 1;
                open.push(QueueEntry { idx: ni, key, seq });
            }
        };

        if !found {
            log::debug!("astar {start}->{goal}: no route, {settled} settled");
            return Err(SearchError::NoPath { start, goal });
        }

        let connections = self.reconstruct(graph.node_count(), start_idx, goal_idx);
        let cost = self.records[goal_idx].cost_so_far;
        log::debug!(
            "astar {start}->{goal}: cost {cost} over {} connections, {settled} settled",
            connections.len()
        );
        Ok(Path::new(connections, cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::find_path_astar;
    use crate::heuristics::{EuclideanDistance, ZeroEstimate};
    use waygraph_core::{Location, Node};

    /// Heuristic with a fixed estimate per node id, for steering expansion
    /// order in tests.
    struct Table(Vec<f32>);

    impl Heuristic for Table {
        fn estimate(&self, from: &Node, _goal: &Node) -> f32 {
            self.0[from.id.index()]
        }
    }

    /// Positions on a line, costs equal to world distance, with a detour.
    fn corridor() -> (LevelGraph, [NodeId; 4]) {
        let mut g = LevelGraph::new();
        let a = g.add_node(Location::at(0.0, 0.0, 0.0));
        let b = g.add_node(Location::at(1.0, 0.0, 0.0));
        let c = g.add_node(Location::at(2.0, 0.0, 0.0));
        let detour = g.add_node(Location::at(1.0, 3.0, 0.0));
        g.connect(a, b, 1.0).unwrap();
        g.connect(b, c, 1.0).unwrap();
        g.connect(a, detour, 10.0).unwrap();
        g.connect(detour, c, 10.0).unwrap();
        (g, [a, b, c, detour])
    }

    #[test]
    fn euclidean_guided_route_is_optimal() {
        let (g, [a, b, c, _]) = corridor();
        let path = find_path_astar(&g, a, c, &EuclideanDistance).unwrap();
        assert_eq!(path.cost(), 2.0);
        assert_eq!(path.nodes(), vec![a, b, c]);
    }

    #[test]
    fn agrees_with_dijkstra_on_cost() {
        let (g, ids) = corridor();
        let mut finder = PathFinder::new();
        for &start in &ids {
            for &goal in &ids {
                let uninformed = finder.dijkstra(&g, start, goal);
                let guided = finder.astar(&g, start, goal, &EuclideanDistance);
                match (uninformed, guided) {
                    (Ok(d), Ok(a)) => assert_eq!(d.cost(), a.cost(), "{start}->{goal}"),
                    (Err(d), Err(a)) => assert_eq!(d, a),
                    (d, a) => panic!("outcomes differ for {start}->{goal}: {d:?} vs {a:?}"),
                }
            }
        }
    }

    #[test]
    fn zero_estimate_matches_dijkstra_exactly() {
        let (g, [a, _, c, _]) = corridor();
        let mut finder = PathFinder::new();
        let plain = finder.dijkstra(&g, a, c).unwrap();
        let zero = finder.astar(&g, a, c, &ZeroEstimate).unwrap();
        assert_eq!(plain, zero);
    }

    #[test]
    fn reopens_a_closed_node_for_a_cheaper_route() {
        // s -> x directly (10), or s -> m -> x (2). An admissible but
        // inconsistent estimate at m makes x settle through the expensive
        // route first; the cheap route must then reopen it.
        let mut g = LevelGraph::new();
        let s = g.add_node(Location::ZERO);
        let m = g.add_node(Location::ZERO);
        let x = g.add_node(Location::ZERO);
        let goal = g.add_node(Location::ZERO);
        g.connect(s, x, 10.0).unwrap();
        g.connect(s, m, 1.0).unwrap();
        g.connect(m, x, 1.0).unwrap();
        g.connect(x, goal, 10.0).unwrap();

        // True remaining costs: s=12, m=11, x=10, goal=0.
        let table = Table(vec![0.0, 11.0, 0.0, 0.0]);
        let path = find_path_astar(&g, s, goal, &table).unwrap();
        assert_eq!(path.cost(), 12.0);
        assert_eq!(path.nodes(), vec![s, m, x, goal]);
    }

    #[test]
    fn start_equals_goal_is_the_empty_path() {
        let (g, [a, ..]) = corridor();
        let path = find_path_astar(&g, a, a, &EuclideanDistance).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.cost(), 0.0);
    }

    #[test]
    fn unreachable_goal_is_no_path() {
        let mut g = LevelGraph::new();
        let a = g.add_node(Location::ZERO);
        let b = g.add_node(Location::at(5.0, 0.0, 0.0));
        let island = g.add_node(Location::at(9.0, 0.0, 0.0));
        g.connect(a, b, 5.0).unwrap();
        assert_eq!(
            find_path_astar(&g, a, island, &EuclideanDistance),
            Err(SearchError::NoPath {
                start: a,
                goal: island
            })
        );
    }

    #[test]
    fn endpoints_are_validated_first() {
        let (g, [a, ..]) = corridor();
        let ghost = NodeId(7);
        assert_eq!(
            find_path_astar(&g, ghost, a, &EuclideanDistance),
            Err(SearchError::InvalidStart(ghost))
        );
        assert_eq!(
            find_path_astar(&g, a, ghost, &EuclideanDistance),
            Err(SearchError::InvalidGoal(ghost))
        );
    }

    #[test]
    fn repeated_queries_are_identical() {
        let (g, [a, _, c, _]) = corridor();
        let mut finder = PathFinder::new();
        let first = finder.astar(&g, a, c, &EuclideanDistance).unwrap();
        for _ in 0..10 {
            assert_eq!(finder.astar(&g, a, c, &EuclideanDistance).unwrap(), first);
        }
    }
}
