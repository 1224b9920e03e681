use serde::{Deserialize, Serialize};

use super::{check_input, check_output, Regressor};
use crate::error::{PredictorError, Result};
use crate::types::FeatureVector;

/// A node of a flattened regression tree. Node 0 is the root; a split sends
/// `x[feature] <= threshold` to `left` and everything else to `right`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// Walk `nodes` from the root. A well-formed tree reaches a leaf in fewer
/// steps than it has nodes; anything longer is a cycle.
fn evaluate(nodes: &[TreeNode], x: &[f64]) -> std::result::Result<f64, String> {
    let mut index = 0usize;
    for _ in 0..nodes.len() {
        match nodes.get(index) {
            Some(TreeNode::Leaf { value }) => return Ok(*value),
            Some(TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            }) => {
                let value = x.get(*feature).ok_or_else(|| {
                    format!(
                        "node {} splits on feature {} but the row only has {} features",
                        index,
                        feature,
                        x.len()
                    )
                })?;
                index = if *value <= *threshold { *left } else { *right };
            }
            None => return Err(format!("tree references missing node {}", index)),
        }
    }
    Err("tree does not terminate in a leaf".to_string())
}

fn validate_nodes(nodes: &[TreeNode], n_features: usize) -> std::result::Result<(), String> {
    if nodes.is_empty() {
        return Err("tree has no nodes".to_string());
    }
    for (i, node) in nodes.iter().enumerate() {
        if let TreeNode::Split {
            feature,
            left,
            right,
            threshold,
        } = node
        {
            if *feature >= n_features {
                return Err(format!(
                    "node {} splits on feature {} of {}",
                    i, feature, n_features
                ));
            }
            if *left >= nodes.len() || *right >= nodes.len() {
                return Err(format!("node {} has a child outside the tree", i));
            }
            if threshold.is_nan() {
                return Err(format!("node {} has a NaN threshold", i));
            }
        }
    }
    Ok(())
}

fn tree_failure(message: String, features: &FeatureVector, width: usize) -> PredictorError {
    PredictorError::prediction_failure(message, features.len(), Some(width))
}

/// A single regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names_in: Option<Vec<String>>,
    pub n_features: usize,
    pub nodes: Vec<TreeNode>,
}

impl TreeModel {
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        validate_nodes(&self.nodes, self.n_features)
    }
}

impl Regressor for TreeModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let x = check_input(features, self.n_features, self.feature_names_in.as_deref())?;
        let prediction = evaluate(&self.nodes, &x)
            .map_err(|e| tree_failure(e, features, self.n_features))?;
        check_output(prediction, features, self.n_features)
    }

    fn expected_feature_names(&self) -> Option<&[String]> {
        self.feature_names_in.as_deref()
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.n_features)
    }
}

/// Bagged trees; the prediction is the mean of every tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names_in: Option<Vec<String>>,
    pub n_features: usize,
    pub trees: Vec<Vec<TreeNode>>,
}

impl ForestModel {
    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, nodes) in self.trees.iter().enumerate() {
            validate_nodes(nodes, self.n_features).map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }
}

impl Regressor for ForestModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        let x = check_input(features, self.n_features, self.feature_names_in.as_deref())?;
        if self.trees.is_empty() {
            return Err(tree_failure(
                "forest has no trees".to_string(),
                features,
                self.n_features,
            ));
        }

        let mut total = 0.0;
        for (i, nodes) in self.trees.iter().enumerate() {
            total += evaluate(nodes, &x)
                .map_err(|e| tree_failure(format!("tree {}: {}", i, e), features, self.n_features))?;
        }
        check_output(total / self.trees.len() as f64, features, self.n_features)
    }

    fn expected_feature_names(&self) -> Option<&[String]> {
        self.feature_names_in.as_deref()
    }

    fn n_features(&self) -> Option<usize> {
        Some(self.n_features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Split on the year, then on the KEN indicator.
    fn nodes() -> Vec<TreeNode> {
        vec![
            TreeNode::Split { feature: 0, threshold: 2000.0, left: 1, right: 2 },
            TreeNode::Leaf { value: 30_000_000.0 },
            TreeNode::Split { feature: 1, threshold: 0.5, left: 3, right: 4 },
            TreeNode::Leaf { value: 10_000_000.0 },
            TreeNode::Leaf { value: 50_000_000.0 },
        ]
    }

    fn row(year: f64, ken: f64) -> FeatureVector {
        let mut v = FeatureVector::new();
        v.push("date", year);
        v.push("countryiso3code_KEN", ken);
        v
    }

    #[test]
    fn tree_follows_thresholds() {
        let tree = TreeModel { feature_names_in: None, n_features: 2, nodes: nodes() };
        assert_eq!(tree.predict(&row(1990.0, 1.0)).unwrap(), 30_000_000.0);
        assert_eq!(tree.predict(&row(2000.0, 1.0)).unwrap(), 30_000_000.0);
        assert_eq!(tree.predict(&row(2020.0, 0.0)).unwrap(), 10_000_000.0);
        assert_eq!(tree.predict(&row(2020.0, 1.0)).unwrap(), 50_000_000.0);
    }

    #[test]
    fn forest_averages_its_trees() {
        let forest = ForestModel {
            feature_names_in: None,
            n_features: 2,
            trees: vec![nodes(), vec![TreeNode::Leaf { value: 0.0 }]],
        };
        assert_eq!(forest.predict(&row(2020.0, 1.0)).unwrap(), 25_000_000.0);
    }

    #[test]
    fn cycles_are_reported_not_looped() {
        let looped = vec![TreeNode::Split { feature: 0, threshold: 0.0, left: 0, right: 0 }];
        assert!(evaluate(&looped, &[1.0]).unwrap_err().contains("terminate"));
    }

    #[test]
    fn validation_catches_bad_references() {
        let bad_feature = TreeModel {
            feature_names_in: None,
            n_features: 1,
            nodes: nodes(),
        };
        assert!(bad_feature.validate().unwrap_err().contains("feature 1"));

        let bad_child = TreeModel {
            feature_names_in: None,
            n_features: 2,
            nodes: vec![TreeNode::Split { feature: 0, threshold: 1.0, left: 1, right: 9 }],
        };
        assert!(bad_child.validate().is_err());
    }

    #[test]
    fn untagged_nodes_deserialize() {
        let parsed: Vec<TreeNode> = serde_json::from_str(
            r#"[{"feature": 0, "threshold": 2000.0, "left": 1, "right": 2}, {"value": 1.0}, {"value": 2.0}]"#,
        )
        .unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[2], TreeNode::Leaf { value: 2.0 });
    }
}
