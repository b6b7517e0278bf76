use crate::model::node::Node;
use serde::Serialize;
use std::collections::BTreeMap;

/// Relative tolerance when comparing weights for ties.
const TIE_EPSILON: f64 = 1e-9;

/// Probability of the evader sitting on each node. Nodes absent from the
/// table carry zero weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BeliefDistribution {
    weights: BTreeMap<Node, f64>,
}

impl BeliefDistribution {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn uniform(nodes: impl IntoIterator<Item = Node>) -> Self {
        let mut weights: BTreeMap<Node, f64> = nodes.into_iter().map(|node| (node, 1.0)).collect();
        let count = weights.len() as f64;
        for weight in weights.values_mut() {
            *weight /= count;
        }
        Self { weights }
    }

    pub fn point(node: Node) -> Self {
        Self {
            weights: BTreeMap::from([(node, 1.0)]),
        }
    }

    /// Builds a normalized distribution from raw non-negative weights.
    /// Returns an empty distribution when the weights sum to zero.
    pub fn from_weights(weights: BTreeMap<Node, f64>) -> Self {
        let mut weights: BTreeMap<Node, f64> =
            weights.into_iter().filter(|(_, w)| *w > 0.0).collect();
        let total: f64 = weights.values().sum();
        if total <= 0.0 {
            return Self::empty();
        }
        for weight in weights.values_mut() {
            *weight /= total;
        }
        Self { weights }
    }

    pub fn probability(&self, node: Node) -> f64 {
        self.weights.get(&node).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Node, f64)> + '_ {
        self.weights.iter().map(|(node, weight)| (*node, *weight))
    }

    /// Nodes with positive weight.
    pub fn support(&self) -> impl Iterator<Item = Node> + '_ {
        self.weights.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    pub fn max_weight(&self) -> f64 {
        self.weights.values().copied().fold(0.0, f64::max)
    }

    /// Every node tied for the largest weight, in node order.
    pub fn most_likely(&self) -> Vec<Node> {
        let max = self.max_weight();
        if max <= 0.0 {
            return Vec::new();
        }
        self.weights
            .iter()
            .filter(|(_, weight)| (max - **weight) <= max * TIE_EPSILON)
            .map(|(node, _)| *node)
            .collect()
    }
}
