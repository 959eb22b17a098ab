//! Random forest implementation of [`ChurnModel`].
//!
//! Trees are stored as flat node arrays, the same shape a fitted
//! scikit-learn tree exports to. Each split sends a row left when its
//! feature value is less than or equal to the threshold.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::errors::AdapterError;
use crate::models::{FeatureRow, FEATURE_COUNT};
use crate::ChurnModel;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        label: i64,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    /// Walks from the root to a leaf. Children always point forward, which
    /// `validate` guarantees, so the walk terminates.
    fn classify(&self, values: &[f64; FEATURE_COUNT]) -> i64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { label } => return *label,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if values[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    fn validate(&self, tree_index: usize) -> Result<(), AdapterError> {
        if self.nodes.is_empty() {
            return Err(AdapterError::InvalidArtifact(format!(
                "tree {tree_index} has no nodes"
            )));
        }

        for (node_index, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= FEATURE_COUNT {
                    return Err(AdapterError::InvalidArtifact(format!(
                        "tree {tree_index} node {node_index} splits on unknown feature {feature}"
                    )));
                }
                for child in [*left, *right] {
                    if child <= node_index || child >= self.nodes.len() {
                        return Err(AdapterError::InvalidArtifact(format!(
                            "tree {tree_index} node {node_index} has invalid child {child}"
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Majority vote over an ensemble of decision trees.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<Tree>,
}

impl RandomForest {
    pub fn new(trees: Vec<Tree>) -> Result<Self, AdapterError> {
        if trees.is_empty() {
            return Err(AdapterError::InvalidArtifact(
                "random forest has no trees".to_string(),
            ));
        }
        for (tree_index, tree) in trees.iter().enumerate() {
            tree.validate(tree_index)?;
        }
        Ok(Self { trees })
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    fn vote(&self, row: &FeatureRow) -> i64 {
        let values = row.values();
        let mut votes: BTreeMap<i64, usize> = BTreeMap::new();
        for tree in &self.trees {
            *votes.entry(tree.classify(&values)).or_default() += 1;
        }

        // Ties go to the smallest label: BTreeMap iterates in ascending order
        // and only a strictly larger count replaces the current winner.
        let mut winner = (0, 0);
        for (label, count) in votes {
            if count > winner.1 {
                winner = (label, count);
            }
        }
        winner.0
    }
}

impl ChurnModel for RandomForest {
    fn predict(&self, rows: &[FeatureRow]) -> Vec<i64> {
        rows.iter().map(|row| self.vote(row)).collect()
    }

    fn kind(&self) -> &'static str {
        "random_forest"
    }
}
