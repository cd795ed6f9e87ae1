use std::collections::BinaryHeap;

use waygraph_core::{LevelGraph, NodeId};

use crate::PathFinder;
use crate::finder::{NodeCost, Path, QueueEntry, SearchError, UNREACHED};

impl PathFinder {
    /// Compute the minimum-cost route from `start` to `goal`.
    ///
    /// Uninformed search: nodes are settled strictly in order of
    /// accumulated cost, so the first settlement of the goal is optimal and
    /// a settled node never needs revisiting. Suited to offline analysis of
    /// a level; prefer [`astar`](Self::astar) with a usable heuristic for
    /// per-request queries.
    ///
    /// Returns an empty zero-cost path when `start == goal`, and
    /// [`SearchError::NoPath`] when the goal is unreachable.
    pub fn dijkstra(
        &mut self,
        graph: &LevelGraph,
        start: NodeId,
        goal: NodeId,
    ) -> Result<Path, SearchError> {
        if !graph.contains(start) {
            return Err(SearchError::InvalidStart(start));
        }
        if !graph.contains(goal) {
            return Err(SearchError::InvalidGoal(goal));
        }
        if start == goal {
            return Ok(Path::default());
        }

        let cur_gen = self.begin(graph.node_count());
        let start_idx = start.index();
        let goal_idx = goal.index();

        // Initialise the start record.
        {
            let rec = &mut self.records[start_idx];
            rec.cost_so_far = 0.0;
            rec.estimated_total = 0.0;
            rec.via = None;
            rec.generation = cur_gen;
            rec.open = true;
        }

        let mut open: BinaryHeap<QueueEntry> = BinaryHeap::new();
        let mut seq: u64 = 0;
        open.push(QueueEntry {
            idx: start_idx,
            key: 0.0,
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
                if rec.generation == cur_gen {
                    // Closed records are already optimal under non-negative
                    // costs; open records only improve.
                    if !rec.open || rec.cost_so_far <= candidate {
                        continue;
                    }
                } else {
                    rec.generation = cur_gen;
                }
                rec.cost_so_far = candidate;
                rec.estimated_total = candidate;
                rec.via = Some(conn);
                rec.open = true;

                seq += 1;
                open.push(QueueEntry {
                    idx: ni,
                    key: candidate,
                    seq,
                });
            }
        };

        if !found {
            log::debug!("dijkstra {start}->{goal}: no route, {settled} settled");
            return Err(SearchError::NoPath { start, goal });
        }

        let connections = self.reconstruct(graph.node_count(), start_idx, goal_idx);
        let cost = self.records[goal_idx].cost_so_far;
        log::debug!(
            "dijkstra {start}->{goal}: cost {cost} over {} connections, {settled} settled",
            connections.len()
        );
        Ok(Path::new(connections, cost))
    }

    /// Compute a multi-source Dijkstra cost map.
    ///
    /// Every source starts at cost 0. Expansion stops once the accumulated
    /// cost would exceed `max_cost` (pass [`UNREACHED`] for no cutoff).
    /// Returns the reached nodes in settlement order; query individual
    /// nodes afterwards with [`cost_at`](Self::cost_at). Sources not in the
    /// graph are ignored.
    pub fn cost_map(
        &mut self,
        graph: &LevelGraph,
        sources: &[NodeId],
        max_cost: f32,
    ) -> &[NodeCost] {
        let cur_gen = self.begin(graph.node_count());
        for v in self.cost_map.iter_mut() {
            *v = UNREACHED;
        }
        self.cost_results.clear();

        let mut open: BinaryHeap<QueueEntry> = BinaryHeap::new();
        let mut seq: u64 = 0;

        for &src in sources {
            if !graph.contains(src) {
                continue;
            }
            let si = src.index();
            let rec = &mut self.records[si];
            rec.cost_so_far = 0.0;
            rec.estimated_total = 0.0;
            rec.via = None;
            rec.generation = cur_gen;
            rec.open = true;
            self.cost_map[si] = 0.0;
            open.push(QueueEntry {
                idx: si,
                key: 0.0,
                seq,
            });
            seq += 1;
        }

        while let Some(current) = open.pop() {
            let ci = current.idx;
            if self.records[ci].generation != cur_gen || !self.records[ci].open {
                continue;
            }
            self.records[ci].open = false;
            let current_cost = self.records[ci].cost_so_far;
            let current_id = NodeId(ci as u32);
            self.cost_results.push(NodeCost {
                node: current_id,
                cost: current_cost,
            });

            for &conn in graph.connections(current_id) {
                let candidate = current_cost + conn.cost;
                if candidate > max_cost {
                    continue;
                }
                let ni = conn.to.index();

                let rec = &mut self.records[ni];
                if rec.generation == cur_gen {
                    if !rec.open || rec.cost_so_far <= candidate {
                        continue;
                    }
                } else {
                    rec.generation = cur_gen;
                    rec.via = None;
                }
                rec.cost_so_far = candidate;
                rec.estimated_total = candidate;
                rec.open = true;
                self.cost_map[ni] = candidate;

                seq += 1;
                open.push(QueueEntry {
                    idx: ni,
                    key: candidate,
                    seq,
                });
            }
        }

        &self.cost_results
    }

    /// Cost recorded for `node` by the last [`cost_map`](Self::cost_map)
    /// call. Returns [`UNREACHED`] for nodes outside the map or not reached
    /// within the cutoff.
    pub fn cost_at(&self, node: NodeId) -> f32 {
        self.cost_map.get(node.index()).copied().unwrap_or(UNREACHED)
    }
}
