//! Tree normalizer.
//!
//! Classifies each category as *decomposed* (multiple named leaves, scored
//! per criterion and aggregated) or *single-column* (scored as one factor),
//! producing the canonical tree the layout planner and formula emitter
//! consume. Node identity is positional and scoped to the produced
//! [`NormalizedModel`]; UI-assigned ids are never interpreted.

use serde::{Deserialize, Serialize};

use crate::{WeightModel, WeightNode};

/// A scored column: either a real sub-criterion or the implicit 100% leaf
/// of a single-column category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedLeaf {
    /// Position under the parent category.
    pub index: usize,
    pub name: String,
    /// Share among siblings (0-100); always 100 for an implicit leaf.
    pub weight: u32,
    pub description: String,
}

/// A canonical category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCategory {
    /// Position in the model; the instance-scoped category identifier.
    pub index: usize,
    pub name: String,
    /// Share of the top-level total (0-100).
    pub weight: u32,
    /// Decomposed categories get per-leaf columns plus an aggregate score
    /// column; single-column categories get exactly one column.
    pub decomposed: bool,
    /// Never empty: a single-column category holds its one implicit leaf.
    pub leaves: Vec<NormalizedLeaf>,
}

/// The canonical tree derived from one [`WeightModel`] snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedModel {
    pub categories: Vec<NormalizedCategory>,
}

impl NormalizedModel {
    /// Total number of scored columns (leaves) across all categories.
    pub fn leaf_count(&self) -> usize {
        self.categories.iter().map(|c| c.leaves.len()).sum()
    }
}

/// A category is decomposed if it has more than one leaf, or exactly one
/// leaf whose name is non-empty and differs from the category's own name.
/// A category with zero leaves is single-column. This lets a category stand
/// alone as one scored factor without a trivial one-child subtree.
fn is_decomposed(node: &WeightNode) -> bool {
    match node.children.len() {
        0 => false,
        1 => {
            let leaf_name = node.children[0].name.trim();
            !leaf_name.is_empty() && leaf_name != node.name.trim()
        }
        _ => true,
    }
}

/// Produce the canonical tree for one model snapshot.
pub fn normalize(model: &WeightModel) -> NormalizedModel {
    let categories = model
        .categories
        .iter()
        .enumerate()
        .map(|(index, node)| {
            let decomposed = is_decomposed(node);
            let leaves = if decomposed {
                node.children
                    .iter()
                    .enumerate()
                    .map(|(leaf_index, leaf)| NormalizedLeaf {
                        index: leaf_index,
                        name: leaf.name.trim().to_string(),
                        weight: leaf.weight,
                        description: leaf.description.clone(),
                    })
                    .collect()
            } else {
                // The implicit leaf is the category itself, at full share.
                // A sole unnamed child still contributes its description.
                vec![NormalizedLeaf {
                    index: 0,
                    name: node.name.trim().to_string(),
                    weight: 100,
                    description: node
                        .children
                        .first()
                        .map(|leaf| leaf.description.clone())
                        .unwrap_or_default(),
                }]
            };
            NormalizedCategory {
                index,
                name: node.name.trim().to_string(),
                weight: node.weight,
                decomposed,
                leaves,
            }
        })
        .collect();
    NormalizedModel { categories }
}
