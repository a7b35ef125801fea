//! Decision trees for forest and boosting artifacts
//!
//! Trees arrive as flat node lists referencing features by name. They are
//! compiled once at load time: names become column indices and every link
//! must point forward to an existing node, so evaluation always terminates
//! and never indexes out of bounds.

use serde::Deserialize;

/// A node as written in the artifact
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    /// Go to `left` when the feature value is `<= threshold`, else `right`
    Split {
        feature: String,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A tree as written in the artifact; node 0 is the root
#[derive(Debug, Clone, Deserialize)]
pub struct TreeSpec {
    pub nodes: Vec<NodeSpec>,
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

/// A validated tree over a fixed feature list
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    width: usize,
}

impl DecisionTree {
    /// Resolves feature names against `features` and checks every link
    pub fn compile(spec: &TreeSpec, features: &[String]) -> Result<Self, String> {
        if spec.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }

        let count = spec.nodes.len();
        let nodes = spec
            .nodes
            .iter()
            .enumerate()
            .map(|(position, node)| match node {
                NodeSpec::Leaf { value } if value.is_finite() => Ok(Node::Leaf(*value)),
                NodeSpec::Leaf { value } => Err(format!("node {position} has non-finite leaf {value}")),
                NodeSpec::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let index = features
                        .iter()
                        .position(|name| name == feature)
                        .ok_or_else(|| format!("node {position} splits on unknown feature '{feature}'"))?;
                    if !threshold.is_finite() {
                        return Err(format!("node {position} has non-finite threshold"));
                    }
                    for child in [*left, *right] {
                        if child <= position || child >= count {
                            return Err(format!("node {position} links to invalid node {child}"));
                        }
                    }
                    Ok(Node::Split {
                        feature: index,
                        threshold: *threshold,
                        left: *left,
                        right: *right,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            nodes,
            width: features.len(),
        })
    }

    /// Leaf values, in node order
    pub fn leaves(&self) -> impl Iterator<Item = f64> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            Node::Leaf(value) => Some(*value),
            Node::Split { .. } => None,
        })
    }

    /// Walks from the root to a leaf
    ///
    /// `values` must hold one value per compiled feature.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        debug_assert_eq!(values.len(), self.width);
        let mut position = 0;
        loop {
            match &self.nodes[position] {
                Node::Leaf(value) => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    position = if values[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}
