//! **waygraph-core**: level-graph model types for agent route planning.
//!
//! This crate provides the foundational types used across the *waygraph*
//! ecosystem: world-space locations, graph nodes and weighted directed
//! connections, and the [`LevelGraph`] container that owns them. Search
//! algorithms live in the `waygraph-paths` crate.

pub mod geom;
pub mod graph;

pub use geom::Location;
pub use graph::{Connection, GraphError, LevelGraph, Node, NodeId};
