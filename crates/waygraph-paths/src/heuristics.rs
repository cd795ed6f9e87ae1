//! Stock heuristics.

use waygraph_core::Node;

use crate::traits::Heuristic;

/// Straight-line distance between node positions.
///
/// The natural estimate for level graphs whose connection costs are world
/// distances (or anything larger): no route can be shorter than the
/// straight line, so the estimate is admissible.
#[derive(Copy, Clone, Debug, Default)]
pub struct EuclideanDistance;

impl Heuristic for EuclideanDistance {
    #[inline]
    fn estimate(&self, from: &Node, goal: &Node) -> f32 {
        from.location.distance_to(goal.location)
    }
}

/// The zero estimate.
///
/// Trivially admissible for any graph; degrades A* into Dijkstra. Useful as
/// a baseline when node positions mean nothing for the cost metric.
#[derive(Copy, Clone, Debug, Default)]
pub struct ZeroEstimate;

impl Heuristic for ZeroEstimate {
    #[inline]
    fn estimate(&self, _from: &Node, _goal: &Node) -> f32 {
        0.0
    }
}
