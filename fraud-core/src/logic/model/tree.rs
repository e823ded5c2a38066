//! Decision Tree - CART with weighted Gini impurity
//!
//! Nodes are stored flat in pre-order, so every child index is greater
//! than its parent's. Leaves keep the weighted fraud share of the rows
//! that reached them.

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use super::classifier::CLASS_FRAUD;

/// Growth limits for a single tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    pub max_depth: usize,
    /// Candidate features drawn per split
    pub max_features: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        fraud_probability: f64,
        weight: f64,
    },
}

/// Borrowed training inputs shared by every node of one tree
pub struct TrainingView<'a> {
    pub x: ArrayView2<'a, f64>,
    pub y: &'a [u8],
    /// Per-row sample weight (bootstrap count × class weight)
    pub weights: &'a [f64],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

impl DecisionTree {
    /// Grow a tree over the rows in `rows`
    pub fn fit(
        view: &TrainingView<'_>,
        mut rows: Vec<usize>,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.grow(view, &mut rows, 0, params, rng);
        tree
    }

    /// Weighted fraud share of the leaf `x` falls into
    ///
    /// `x` must have at least as many values as the tree was trained on;
    /// callers check this through [`DecisionTree::validate`].
    pub fn fraud_probability(&self, x: &[f64]) -> f64 {
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { fraud_probability, .. } => return *fraud_probability,
                Node::Split { feature, threshold, left, right } => {
                    id = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], id: usize) -> usize {
            match &nodes[id] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        if self.nodes.is_empty() {
            0
        } else {
            walk(&self.nodes, 0)
        }
    }

    /// Structural check for trees read back from an artifact
    pub fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        for (id, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split { feature, threshold, left, right } => {
                    if *feature >= n_features {
                        return Err(format!("node {id}: feature {feature} out of range"));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {id}: non-finite threshold"));
                    }
                    // Pre-order layout rules out cycles
                    if *left <= id || *right <= id || *left >= self.nodes.len() || *right >= self.nodes.len() {
                        return Err(format!("node {id}: invalid child index"));
                    }
                }
                Node::Leaf { fraud_probability, .. } => {
                    if !(0.0..=1.0).contains(fraud_probability) {
                        return Err(format!("node {id}: probability out of range"));
                    }
                }
            }
        }

        Ok(())
    }

    fn grow(
        &mut self,
        view: &TrainingView<'_>,
        rows: &mut [usize],
        depth: usize,
        params: &TreeParams,
        rng: &mut StdRng,
    ) -> usize {
        let (safe_weight, fraud_weight) = class_totals(view, rows);
        let total = safe_weight + fraud_weight;

        let node_id = self.nodes.len();
        self.nodes.push(Node::Leaf {
            fraud_probability: if total > 0.0 { fraud_weight / total } else { 0.0 },
            weight: total,
        });

        let is_pure = safe_weight <= 0.0 || fraud_weight <= 0.0;
        if depth >= params.max_depth
            || is_pure
            || rows.len() < params.min_samples_split
            || rows.len() < 2 * params.min_samples_leaf
        {
            return node_id;
        }

        let Some(split) = best_split(view, rows, (safe_weight, fraud_weight), params, rng) else {
            return node_id;
        };

        let mid = partition(rows, |row| view.x[[row, split.feature]] <= split.threshold);
        if mid == 0 || mid == rows.len() {
            return node_id;
        }

        let (left_rows, right_rows) = rows.split_at_mut(mid);
        let left = self.grow(view, left_rows, depth + 1, params, rng);
        let right = self.grow(view, right_rows, depth + 1, params, rng);

        self.nodes[node_id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        node_id
    }
}

// ============================================================================
// SPLIT SEARCH
// ============================================================================

fn class_totals(view: &TrainingView<'_>, rows: &[usize]) -> (f64, f64) {
    rows.iter().fold((0.0, 0.0), |(safe, fraud), &row| {
        let w = view.weights[row];
        if view.y[row] == CLASS_FRAUD {
            (safe, fraud + w)
        } else {
            (safe + w, fraud)
        }
    })
}

fn gini(safe: f64, fraud: f64) -> f64 {
    let total = safe + fraud;
    if total <= 0.0 {
        return 0.0;
    }
    let p_safe = safe / total;
    let p_fraud = fraud / total;
    1.0 - p_safe * p_safe - p_fraud * p_fraud
}

fn best_split(
    view: &TrainingView<'_>,
    rows: &[usize],
    (total_safe, total_fraud): (f64, f64),
    params: &TreeParams,
    rng: &mut StdRng,
) -> Option<Split> {
    if rows.len() < 2 {
        return None;
    }

    let n_features = view.x.ncols();
    let draw = params.max_features.clamp(1, n_features);
    // Constant features do not count toward `draw`; keep drawing until
    // `draw` informative features were seen or all were tried
    let order = index::sample(rng, n_features, n_features);

    let mut best: Option<Split> = None;
    let mut column: Vec<(f64, usize)> = Vec::with_capacity(rows.len());
    let mut informative = 0;

    for feature in order.iter() {
        if informative >= draw {
            break;
        }

        column.clear();
        column.extend(rows.iter().map(|&row| (view.x[[row, feature]], row)));
        column.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

        if column[0].0 == column[column.len() - 1].0 {
            continue;
        }
        informative += 1;

        let mut left_safe = 0.0;
        let mut left_fraud = 0.0;

        for i in 0..column.len() - 1 {
            let (value, row) = column[i];
            let w = view.weights[row];
            if view.y[row] == CLASS_FRAUD {
                left_fraud += w;
            } else {
                left_safe += w;
            }

            let next = column[i + 1].0;
            if value == next {
                continue;
            }

            let left_count = i + 1;
            let right_count = column.len() - left_count;
            if left_count < params.min_samples_leaf || right_count < params.min_samples_leaf {
                continue;
            }

            let right_safe = total_safe - left_safe;
            let right_fraud = total_fraud - left_fraud;
            let left_weight = left_safe + left_fraud;
            let right_weight = right_safe + right_fraud;
            let impurity = (left_weight * gini(left_safe, left_fraud)
                + right_weight * gini(right_safe, right_fraud))
                / (left_weight + right_weight);

            if best.map_or(true, |b| impurity < b.impurity) {
                let mut threshold = value + (next - value) / 2.0;
                if threshold >= next {
                    threshold = value;
                }
                best = Some(Split { feature, threshold, impurity });
            }
        }
    }

    best
}

/// Move rows for which `goes_left` holds to the front; returns their count
fn partition(rows: &mut [usize], goes_left: impl Fn(usize) -> bool) -> usize {
    let mut mid = 0;
    for i in 0..rows.len() {
        if goes_left(rows[i]) {
            rows.swap(i, mid);
            mid += 1;
        }
    }
    mid
}
