//! Route planning over level graphs.
//!
//! This crate provides the search side of *waygraph*: minimum-cost route
//! queries over a [`waygraph_core::LevelGraph`], using either uninformed or
//! heuristic-guided search:
//!
//! - **Dijkstra** single-pair search ([`PathFinder::dijkstra`])
//! - **A\*** single-pair search ([`PathFinder::astar`])
//! - **Dijkstra** multi-source cost maps ([`PathFinder::cost_map`])
//!
//! All queries run through [`PathFinder`], which owns and reuses its search
//! records so that repeated queries incur zero allocations after warm-up.
//! The free functions [`find_path_dijkstra`] and [`find_path_astar`] wrap a
//! transient finder for one-shot use.
//!
//! A successful query yields a [`Path`]: the ordered connections to traverse
//! from start to goal plus the total cost. A start equal to the goal is the
//! empty path with cost zero; an unreachable goal is
//! [`SearchError::NoPath`], never an empty path.
//!
//! # Heuristics
//!
//! A* takes any [`Heuristic`]. The estimate must be **admissible** (never
//! overestimate the true remaining cost) for the returned route to be
//! optimal; [`EuclideanDistance`] is admissible whenever connection costs
//! are at least the world distance they span.

mod astar;
mod dijkstra;
mod finder;
mod heuristics;
mod traits;

pub use finder::{
    NodeCost, Path, PathFinder, SearchError, UNREACHED, find_path_astar, find_path_dijkstra,
};
pub use heuristics::{EuclideanDistance, ZeroEstimate};
pub use traits::Heuristic;
