//! Regression trees grown on gradient histograms.

use crate::binning::{BinnedMatrix, FeatureBins};
use classifier_api::BoosterParams;
use classifier_spi::{ClassifierError, Result};
use data_spi::FEATURE_COUNT;
use serde::{Deserialize, Serialize};

/// A tree node. Children always have larger indices than their parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Rows with `x[feature] < threshold` go left, all others right.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf { value: f64 },
}

/// A regression tree stored as a flat node array rooted at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// A single-leaf tree.
    pub fn leaf(value: f64) -> Self {
        Self {
            nodes: vec![Node::Leaf { value }],
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Margin contribution for one row.
    pub fn predict(&self, row: &[f64; FEATURE_COUNT]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => idx = if row[feature] < threshold { left } else { right },
                Node::Leaf { value } => return value,
            }
        }
    }

    /// Check the structure of a decoded tree so that `predict` cannot index
    /// out of bounds or loop.
    pub fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(ClassifierError::Corrupt("tree has no nodes".to_string()));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(ClassifierError::Corrupt(format!(
                            "node {idx} splits on unknown feature {feature}"
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(ClassifierError::Corrupt(format!(
                            "node {idx} has an undefined threshold"
                        )));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(ClassifierError::Corrupt(format!(
                                "node {idx} points to invalid child {child}"
                            )));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(ClassifierError::Corrupt(format!(
                            "leaf {idx} has a non-finite value"
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Best split found for a node.
#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    bin: usize,
    gain: f64,
}

/// Grows one tree from per-row gradients and hessians.
pub(crate) struct TreeGrower<'a> {
    pub bins: &'a FeatureBins,
    pub matrix: &'a BinnedMatrix,
    pub grad: &'a [f64],
    pub hess: &'a [f64],
    pub features: &'a [usize],
    pub params: &'a BoosterParams,
}

impl TreeGrower<'_> {
    /// Grow a tree over the given rows.
    pub fn grow(&self, rows: &[usize]) -> Tree {
        let mut nodes = Vec::new();
        self.grow_node(&mut nodes, rows, 0);
        Tree { nodes }
    }

    fn grow_node(&self, nodes: &mut Vec<Node>, rows: &[usize], depth: usize) -> usize {
        let (g, h) = rows
            .iter()
            .fold((0.0, 0.0), |(g, h), &r| (g + self.grad[r], h + self.hess[r]));

        let idx = nodes.len();
        nodes.push(Node::Leaf {
            value: self.leaf_weight(g, h),
        });

        if depth >= self.params.max_depth || rows.len() < 2 {
            return idx;
        }

        if let Some(split) = self.best_split(rows, g, h) {
            let column = self.matrix.column(split.feature);
            let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
                .iter()
                .partition(|&&r| (column[r] as usize) < split.bin);

            let left = self.grow_node(nodes, &left_rows, depth + 1);
            let right = self.grow_node(nodes, &right_rows, depth + 1);
            nodes[idx] = Node::Split {
                feature: split.feature,
                threshold: self.bins.threshold(split.feature, split.bin),
                left,
                right,
            };
        }
        idx
    }

    fn leaf_weight(&self, g: f64, h: f64) -> f64 {
        -g / (h + self.params.reg_lambda) * self.params.learning_rate
    }

    fn score(&self, g: f64, h: f64) -> f64 {
        g * g / (h + self.params.reg_lambda)
    }

    /// Scan the histogram of every sampled feature for the highest positive gain.
    ///
    /// Ties keep the first candidate in feature order, then bin order.
    fn best_split(&self, rows: &[usize], g: f64, h: f64) -> Option<SplitCandidate> {
        let parent = self.score(g, h);
        let mut best: Option<SplitCandidate> = None;

        for &feature in self.features {
            let n_bins = self.bins.n_bins(feature);
            if n_bins < 2 {
                continue;
            }

            let column = self.matrix.column(feature);
            let mut hist = vec![(0.0f64, 0.0f64, 0usize); n_bins];
            for &r in rows {
                let slot = &mut hist[column[r] as usize];
                slot.0 += self.grad[r];
                slot.1 += self.hess[r];
                slot.2 += 1;
            }

            let (mut gl, mut hl, mut nl) = (0.0, 0.0, 0usize);
            for (k, &(bg, bh, bn)) in hist.iter().enumerate().take(n_bins - 1) {
                gl += bg;
                hl += bh;
                nl += bn;
                let (gr, hr, nr) = (g - gl, h - hl, rows.len() - nl);
                if nl == 0 || nr == 0 {
                    continue;
                }
                if hl < self.params.min_child_weight || hr < self.params.min_child_weight {
                    continue;
                }
                let gain =
                    0.5 * (self.score(gl, hl) + self.score(gr, hr) - parent) - self.params.gamma;
                if gain > 0.0 && best.map_or(true, |b| gain > b.gain) {
                    best = Some(SplitCandidate {
                        feature,
                        bin: k + 1,
                        gain,
                    });
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_spi::FeatureVector;

    fn grower_fixture() -> (Vec<FeatureVector>, Vec<f64>, Vec<f64>) {
        // Feature 0 separates the gradients perfectly at 5.0
        let rows: Vec<FeatureVector> = (0..10)
            .map(|i| {
                let mut v = [0.0; FEATURE_COUNT];
                v[0] = i as f64;
                v[1] = (i % 3) as f64;
                FeatureVector::new(v)
            })
            .collect();
        let grad: Vec<f64> = (0..10).map(|i| if i < 5 { 0.5 } else { -0.5 }).collect();
        let hess = vec![0.25; 10];
        (rows, grad, hess)
    }

    #[test]
    fn test_grower_finds_separating_split() {
        let (rows, grad, hess) = grower_fixture();
        let bins = FeatureBins::fit(&rows, 256);
        let matrix = bins.transform(&rows);
        let params = BoosterParams::default()
            .with_max_depth(1)
            .with_learning_rate(1.0)
            .with_min_child_weight(0.0);
        let features: Vec<usize> = (0..FEATURE_COUNT).collect();
        let grower = TreeGrower {
            bins: &bins,
            matrix: &matrix,
            grad: &grad,
            hess: &hess,
            features: &features,
            params: &params,
        };

        let all: Vec<usize> = (0..10).collect();
        let tree = grower.grow(&all);
        match tree.nodes()[0] {
            Node::Split {
                feature, threshold, ..
            } => {
                assert_eq!(feature, 0);
                assert_eq!(threshold, 4.5);
            }
            Node::Leaf { .. } => panic!("expected a split at the root"),
        }
        assert_eq!(tree.n_leaves(), 2);

        // Left leaf: G = 2.5, H = 1.25 -> -2.5 / 2.25
        let mut low = [0.0; FEATURE_COUNT];
        low[0] = 1.0;
        assert!((tree.predict(&low) - (-2.5 / 2.25)).abs() < 1e-10);
        let mut high = [0.0; FEATURE_COUNT];
        high[0] = 8.0;
        assert!((tree.predict(&high) - (2.5 / 2.25)).abs() < 1e-10);
    }

    #[test]
    fn test_gamma_blocks_weak_splits() {
        let (rows, grad, hess) = grower_fixture();
        let bins = FeatureBins::fit(&rows, 256);
        let matrix = bins.transform(&rows);
        let params = BoosterParams::default().with_gamma(1_000.0);
        let features: Vec<usize> = (0..FEATURE_COUNT).collect();
        let grower = TreeGrower {
            bins: &bins,
            matrix: &matrix,
            grad: &grad,
            hess: &hess,
            features: &features,
            params: &params,
        };

        let all: Vec<usize> = (0..10).collect();
        assert_eq!(grower.grow(&all).nodes().len(), 1);
    }

    #[test]
    fn test_min_child_weight_blocks_small_children() {
        let (rows, grad, hess) = grower_fixture();
        let bins = FeatureBins::fit(&rows, 256);
        let matrix = bins.transform(&rows);
        // Total hessian is 2.5; no split can give both children 2.0
        let params = BoosterParams::default().with_min_child_weight(2.0);
        let features: Vec<usize> = (0..FEATURE_COUNT).collect();
        let grower = TreeGrower {
            bins: &bins,
            matrix: &matrix,
            grad: &grad,
            hess: &hess,
            features: &features,
            params: &params,
        };

        let all: Vec<usize> = (0..10).collect();
        assert_eq!(grower.grow(&all).n_leaves(), 1);
    }

    #[test]
    fn test_validate_rejects_cycles() {
        let tree = Tree {
            nodes: vec![
                Node::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 1,
                },
                Node::Leaf { value: 0.1 },
            ],
        };
        assert!(tree.validate().is_err());
        assert!(Tree::leaf(0.2).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_feature() {
        let tree = Tree {
            nodes: vec![
                Node::Split {
                    feature: FEATURE_COUNT,
                    threshold: 1.0,
                    left: 1,
                    right: 2,
                },
                Node::Leaf { value: 0.1 },
                Node::Leaf { value: -0.1 },
            ],
        };
        assert!(matches!(tree.validate(), Err(ClassifierError::Corrupt(_))));
    }

    #[test]
    fn test_node_json_shape() {
        let json = serde_json::to_value(Node::Leaf { value: 0.5 }).unwrap();
        assert_eq!(json["kind"], "leaf");
        assert_eq!(json["value"], 0.5);
    }
}
