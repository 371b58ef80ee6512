//! Input snapshot types.
//!
//! The weight tree and option list are owned and mutated by an external
//! form; the compiler receives one immutable [`CompileRequest`] per
//! invocation and derives everything else fresh. Weight invariants
//! (sums of 100) are advisory: nothing here rejects an unbalanced model.

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;

/// Fewest options a model compares.
pub const MIN_OPTIONS: usize = 2;
/// Most options a model compares.
pub const MAX_OPTIONS: usize = 30;

/// A second-level scoring factor under a category.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafNode {
    /// Opaque UI-assigned identifier; carried through, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    /// Percentage share among siblings (0-100).
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub description: String,
}

/// A top-level grouping in the weight tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightNode {
    /// Opaque UI-assigned identifier; carried through, never interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    /// Percentage share of the top-level total (0-100).
    #[serde(default)]
    pub weight: u32,
    /// The form's "break down into sub-criteria" toggle. Advisory: the
    /// normalizer classifies from `children` (an untoggled category has no
    /// children and comes out single-column either way).
    #[serde(default)]
    pub subdivided: bool,
    #[serde(default)]
    pub children: Vec<LeafNode>,
}

/// An ordered weight tree: the categories of one decision model.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightModel {
    pub categories: Vec<WeightNode>,
}

/// A leaf's true contribution to the final score, for previews and tests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectiveWeight {
    pub category: String,
    pub criterion: String,
    /// Percentage (0-100), self-normalized against unbalanced sums.
    pub percent: f64,
}

/// Sibling-weight totals for one category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBalance {
    pub index: usize,
    pub name: String,
    /// Sum of sibling leaf weights; 100 exactly for a single-column
    /// category (its implicit leaf carries the full share).
    pub total: u32,
    pub balanced: bool,
}

/// The form's validation summary: where the model deviates from the
/// advisory "sums to 100" invariants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Sum of category weights.
    pub total: u32,
    /// True when the top level and every decomposed category sum to 100.
    pub balanced: bool,
    pub categories: Vec<CategoryBalance>,
}

impl WeightModel {
    pub fn new(categories: Vec<WeightNode>) -> Self {
        Self { categories }
    }

    /// Sum of top-level category weights.
    pub fn total_weight(&self) -> u32 {
        self.categories.iter().map(|c| c.weight).sum()
    }

    /// The effective weight of every leaf: category share × sibling share,
    /// self-normalizing when either level does not sum to 100. Zero
    /// denominators degrade to 0 rather than erroring, mirroring the
    /// divide guard in the emitted formulas.
    pub fn effective_weights(&self) -> Vec<EffectiveWeight> {
        let total = self.total_weight() as f64;
        let normalized = normalize(self);
        let mut out = Vec::new();
        for category in &normalized.categories {
            let sibling_sum: u32 = category.leaves.iter().map(|l| l.weight).sum();
            for leaf in &category.leaves {
                let percent = if total > 0.0 && sibling_sum > 0 {
                    (category.weight as f64 / total) * (leaf.weight as f64 / sibling_sum as f64)
                        * 100.0
                } else {
                    0.0
                };
                out.push(EffectiveWeight {
                    category: category.name.clone(),
                    criterion: leaf.name.clone(),
                    percent,
                });
            }
        }
        out
    }

    /// Summarize how far the model is from the advisory balance invariants.
    pub fn balance_report(&self) -> BalanceReport {
        let normalized = normalize(self);
        let categories: Vec<CategoryBalance> = normalized
            .categories
            .iter()
            .map(|category| {
                let total: u32 = category.leaves.iter().map(|l| l.weight).sum();
                CategoryBalance {
                    index: category.index,
                    name: category.name.clone(),
                    total,
                    balanced: total == 100,
                }
            })
            .collect();
        let total = self.total_weight();
        let balanced = total == 100 && categories.iter().all(|c| c.balanced);
        BalanceReport {
            total,
            balanced,
            categories,
        }
    }
}

/// One immutable compile invocation: everything the workbook compiler needs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompileRequest {
    /// Model title; drives the output filename and sheet headings.
    #[serde(default)]
    pub title: String,
    /// Free-text purpose of the model, shown on the overview sheet.
    #[serde(default)]
    pub description: String,
    pub model: WeightModel,
    /// How many options are being compared (clamped to 2-30, not rejected).
    pub option_count: usize,
    /// Optional display names; blanks default to `Option N`.
    #[serde(default)]
    pub option_names: Vec<String>,
}

impl CompileRequest {
    /// Option count clamped into the supported range.
    pub fn clamped_option_count(&self) -> usize {
        self.option_count.clamp(MIN_OPTIONS, MAX_OPTIONS)
    }

    /// Display name for option `index` (0-based): the trimmed supplied name,
    /// or `Option N` when blank or missing.
    pub fn option_name(&self, index: usize) -> String {
        match self.option_names.get(index).map(|n| n.trim()) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Option {}", index + 1),
        }
    }
}
