use waygraph_core::Node;

/// Estimator of remaining cost from a node to a fixed goal.
///
/// A* uses the estimate to prioritize expansion toward the goal. For the
/// optimal-route guarantee the estimate must be **admissible**: it never
/// overestimates the true remaining cost. The engine trusts this; it cannot
/// verify it. Estimates must be non-negative and finite.
pub trait Heuristic {
    /// Estimated cost of travelling from `from` to `goal`.
    fn estimate(&self, from: &Node, goal: &Node) -> f32;
}
