//! The level graph: nodes, weighted directed connections, and their owner.

use std::fmt;
use std::ops::Index;

use crate::geom::Location;

// ---------------------------------------------------------------------------
// NodeId
// ---------------------------------------------------------------------------

/// Identity of a node in a [`LevelGraph`].
///
/// Ids are dense and issued in insertion order, so they double as flat
/// indices into per-node side tables kept by search code.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    /// The id as a flat index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Node and Connection
// ---------------------------------------------------------------------------

/// A discrete location in the planning graph.
///
/// Immutable once created; owned by its [`LevelGraph`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub location: Location,
}

/// A directed edge with a non-negative traversal cost.
///
/// Multiple connections may exist between the same pair of nodes; each is a
/// distinct route with its own cost.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
    pub cost: f32,
}

// ---------------------------------------------------------------------------
// GraphError
// ---------------------------------------------------------------------------

/// Errors reported when building a [`LevelGraph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GraphError {
    /// An endpoint id was never issued by this graph.
    UnknownNode(NodeId),
    /// Connection costs must be non-negative.
    NegativeCost {
        from: NodeId,
        to: NodeId,
        cost: f32,
    },
    /// Connection costs must be finite.
    NonFiniteCost { from: NodeId, to: NodeId },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => write!(f, "graph: node {id} does not exist"),
            Self::NegativeCost { from, to, cost } => {
                write!(f, "graph: connection {from}->{to} has negative cost {cost}")
            }
            Self::NonFiniteCost { from, to } => {
                write!(f, "graph: connection {from}->{to} has non-finite cost")
            }
        }
    }
}

impl std::error::Error for GraphError {}

// ---------------------------------------------------------------------------
// LevelGraph
// ---------------------------------------------------------------------------

/// A game level discretized into nodes and weighted directed connections.
///
/// The graph owns its nodes and, for each node, the list of outgoing
/// connections. Construction validates endpoints and costs up front so that
/// search code can rely on every stored connection being well-formed.
/// Lookups never mutate the graph, so a built graph can be shared immutably
/// between any number of concurrent searches.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelGraph {
    nodes: Vec<Node>,
    outgoing: Vec<Vec<Connection>>,
}

impl LevelGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `nodes` nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            outgoing: Vec::with_capacity(nodes),
        }
    }

    /// Add a node at `location` and return its id.
    pub fn add_node(&mut self, location: Location) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { id, location });
        self.outgoing.push(Vec::new());
        id
    }

    /// Add a directed connection from `from` to `to` with the given cost.
    ///
    /// Rejects unknown endpoints and negative or non-finite costs; a
    /// negative cost would silently break the optimality guarantee of the
    /// search algorithms, so it is refused here at the boundary.
    pub fn connect(&mut self, from: NodeId, to: NodeId, cost: f32) -> Result<(), GraphError> {
        if !self.contains(from) {
            return Err(GraphError::UnknownNode(from));
        }
        if !self.contains(to) {
            return Err(GraphError::UnknownNode(to));
        }
        if !cost.is_finite() {
            return Err(GraphError::NonFiniteCost { from, to });
        }
        if cost < 0.0 {
            return Err(GraphError::NegativeCost { from, to, cost });
        }
        self.outgoing[from.index()].push(Connection { from, to, cost });
        Ok(())
    }

    /// Add the pair of directed connections `a`->`b` and `b`->`a`, both with
    /// the given cost. Convenience for level geometry walkable both ways.
    pub fn connect_symmetric(&mut self, a: NodeId, b: NodeId, cost: f32) -> Result<(), GraphError> {
        self.connect(a, b, cost)?;
        self.connect(b, a, cost)
    }

    /// Look up a node by id.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Whether `id` was issued by this graph.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Number of nodes in the graph.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over all nodes, in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Outgoing connections of `id`, in insertion order.
    ///
    /// Only connections whose source is `id` are returned. A node with no
    /// outgoing edges, or an id this graph never issued, yields an empty
    /// slice rather than an error.
    #[inline]
    pub fn connections(&self, id: NodeId) -> &[Connection] {
        self.outgoing.get(id.index()).map_or(&[], Vec::as_slice)
    }
}

impl Index<NodeId> for LevelGraph {
    type Output = Node;

    /// Direct node access. Panics on an id the graph never issued; use
    /// [`node`](LevelGraph::node) for fallible lookup.
    #[inline]
    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}
