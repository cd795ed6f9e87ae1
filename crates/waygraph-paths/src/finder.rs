use std::fmt;

use waygraph_core::{Connection, LevelGraph, NodeId};

use crate::traits::Heuristic;

/// Sentinel cost meaning "not reached" in cost maps.
pub const UNREACHED: f32 = f32::INFINITY;

/// A node with the cost to reach it, returned from cost-map queries.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeCost {
    pub node: NodeId,
    pub cost: f32,
}

// ---------------------------------------------------------------------------
// Internal record keeping for Dijkstra / A* searches
// ---------------------------------------------------------------------------

/// Per-node bookkeeping for one search. A record is *open* while the node
/// awaits settlement and *closed* once it has been expanded; A* may flip a
/// closed record back to open when a cheaper route to it turns up.
#[derive(Clone)]
pub(crate) struct SearchRecord {
    /// Accumulated cost from the start along the best known route.
    pub(crate) cost_so_far: f32,
    /// `cost_so_far` plus the heuristic estimate. Equal to `cost_so_far`
    /// under Dijkstra, where no estimate exists.
    pub(crate) estimated_total: f32,
    /// Connection used to reach this node; `None` on the start record.
    pub(crate) via: Option<Connection>,
    /// Stamp of the search this record belongs to.
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for SearchRecord {
    fn default() -> Self {
        Self {
            cost_so_far: 0.0,
            estimated_total: 0.0,
            via: None,
            generation: 0,
            open: false,
        }
    }
}

/// Heap entry ordered by `key`, reversed so `BinaryHeap` (a max-heap) pops
/// the smallest key first. Equal keys pop in insertion order (`seq`), which
/// makes repeated searches over identical input fully deterministic.
#[derive(Clone, Copy)]
pub(crate) struct QueueEntry {
    pub(crate) idx: usize,
    pub(crate) key: f32,
    pub(crate) seq: u64,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.idx == other.idx && self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .key
            .partial_cmp(&self.key)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchError
// ---------------------------------------------------------------------------

/// Failure modes of a route query.
///
/// Invalid endpoints are reported before the search starts; [`NoPath`]
/// (the open set drained without meeting the goal) is the expected,
/// recoverable outcome for a disconnected level.
///
/// [`NoPath`]: SearchError::NoPath
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The start node is not part of the graph.
    InvalidStart(NodeId),
    /// The goal node is not part of the graph.
    InvalidGoal(NodeId),
    /// Every node reachable from `start` was settled without meeting `goal`.
    NoPath { start: NodeId, goal: NodeId },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStart(id) => write!(f, "search: start node {id} is not in the graph"),
            Self::InvalidGoal(id) => write!(f, "search: goal node {id} is not in the graph"),
            Self::NoPath { start, goal } => {
                write!(f, "search: no route from {start} to {goal}")
            }
        }
    }
}

impl std::error::Error for SearchError {}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// An ordered route: the connections to traverse from start to goal.
///
/// The empty path (start equal to goal) is a valid result with cost zero;
/// an unreachable goal is reported as [`SearchError::NoPath`] instead.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    connections: Vec<Connection>,
    cost: f32,
}

impl Path {
    pub(crate) fn new(connections: Vec<Connection>, cost: f32) -> Self {
        Self { connections, cost }
    }

    /// The connections in travel order.
    #[inline]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Total traversal cost.
    #[inline]
    pub fn cost(&self) -> f32 {
        self.cost
    }

    /// Number of connections in the path.
    #[inline]
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Whether the path has no connections (start was the goal).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// The visited node sequence: the first connection's source followed by
    /// every destination. Empty for the trivial path.
    pub fn nodes(&self) -> Vec<NodeId> {
        let Some(first) = self.connections.first() else {
            return Vec::new();
        };
        let mut nodes = Vec::with_capacity(self.connections.len() + 1);
        nodes.push(first.from);
        nodes.extend(self.connections.iter().map(|c| c.to));
        nodes
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Connection;
    type IntoIter = std::slice::Iter<'a, Connection>;

    fn into_iter(self) -> Self::IntoIter {
        self.connections.iter()
    }
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Central coordinator for route queries over a level graph.
///
/// `PathFinder` owns the per-node search records and reuses them across
/// queries; a generation stamp invalidates stale records in O(1), so a
/// finder sized for its graph performs repeated queries without
/// allocating. No query state survives a call other than spare capacity,
/// making every call independent: use one finder per agent (or per thread)
/// and share the graph immutably.
pub struct PathFinder {
    pub(crate) records: Vec<SearchRecord>,
    pub(crate) generation: u32,
    pub(crate) cost_map: Vec<f32>,
    pub(crate) cost_results: Vec<NodeCost>,
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl PathFinder {
    /// Create an empty finder. Record tables grow on first use.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            generation: 0,
            cost_map: Vec::new(),
            cost_results: Vec::new(),
        }
    }

    /// Create a finder pre-sized for a graph of `nodes` nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            records: vec![SearchRecord::default(); nodes],
            generation: 0,
            cost_map: vec![UNREACHED; nodes],
            cost_results: Vec::new(),
        }
    }

    /// Grow the record tables to cover `len` nodes and start a new
    /// generation, logically invalidating every record from earlier calls.
    pub(crate) fn begin(&mut self, len: usize) -> u32 {
        if self.records.len() < len {
            self.records.resize(len, SearchRecord::default());
            self.cost_map.resize(len, UNREACHED);
        }
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Walk the record chain backwards from `goal` and return the
    /// connection sequence running start->goal.
    pub(crate) fn reconstruct(
        &self,
        node_count: usize,
        start: usize,
        goal: usize,
    ) -> Vec<Connection> {
        let mut connections = Vec::new();
        let mut current = goal;
        while current != start {
            let Some(conn) = self.records[current].via else {
                panic!("search record for node #{current} has no arriving connection");
            };
            connections.push(conn);
            current = conn.from.index();
            // Every back-pointer steps strictly toward the start, so the
            // chain can never be longer than the node count.
            assert!(
                connections.len() <= node_count,
                "back-pointer cycle while reconstructing a route"
            );
        }
        connections.reverse();
        connections
    }
}

// ---------------------------------------------------------------------------
// One-shot conveniences
// ---------------------------------------------------------------------------

/// Run a single Dijkstra query with a transient [`PathFinder`].
///
/// See [`PathFinder::dijkstra`]. Prefer keeping a finder around when
/// querying repeatedly.
pub fn find_path_dijkstra(
    graph: &LevelGraph,
    start: NodeId,
    goal: NodeId,
) -> Result<Path, SearchError> {
    let mut finder = PathFinder::with_capacity(graph.node_count());
    finder.dijkstra(graph, start, goal)
}

/// Run a single A* query with a transient [`PathFinder`].
///
/// See [`PathFinder::astar`]. Prefer keeping a finder around when querying
/// repeatedly.
pub fn find_path_astar<H: Heuristic>(
    graph: &LevelGraph,
    start: NodeId,
    goal: NodeId,
    heuristic: &H,
) -> Result<Path, SearchError> {
    let mut finder = PathFinder::with_capacity(graph.node_count());
    finder.astar(graph, start, goal, heuristic)
}
