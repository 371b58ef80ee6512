//! Layout planner.
//!
//! Assigns deterministic row and column coordinates to a normalized weight
//! tree: row blocks on the weight-definition sheet and column spans on each
//! data sheet. Planning is two-pass (size every category, then assign
//! absolute offsets) so layout stays independently testable from formula
//! emission. Each sheet gets its own coordinate table; the input and scored
//! sheets deliberately differ (only the scored sheet carries total and rank
//! columns) and nothing may assume coordinates transfer between them.

use factor_model::{CellRef, NormalizedModel};

/// Weights sheet title row.
pub const WEIGHTS_TITLE_ROW: u32 = 0;
/// Weights sheet explanatory note row.
pub const WEIGHTS_NOTE_ROW: u32 = 1;
/// Weights sheet column-header row.
pub const WEIGHTS_HEADER_ROW: u32 = 3;
/// First category-block row on the weights sheet.
pub const WEIGHTS_FIRST_DATA_ROW: u32 = 4;

/// Weights sheet columns, in order.
pub const COL_CATEGORY: u16 = 0;
pub const COL_CATEGORY_WEIGHT: u16 = 1;
pub const COL_CRITERION: u16 = 2;
pub const COL_CRITERION_WEIGHT: u16 = 3;
pub const COL_EFFECTIVE: u16 = 4;
pub const COL_CHECK: u16 = 5;

/// Data sheet header band rows (fixed offsets shared by every data sheet).
pub const ROW_CATEGORY: u32 = 3;
pub const ROW_CATEGORY_WEIGHT: u32 = 4;
pub const ROW_CRITERION: u32 = 5;
pub const ROW_CRITERION_WEIGHT: u32 = 6;
pub const ROW_EFFECTIVE: u32 = 7;
pub const ROW_COLUMN_HEADER: u32 = 8;
/// First option row on a data sheet.
pub const FIRST_OPTION_ROW: u32 = 9;

/// The contiguous row block one category occupies on the weights sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CategoryRows {
    /// First leaf row (also the category name/weight anchor row).
    pub first_row: u32,
    /// Last leaf row, inclusive.
    pub last_row: u32,
}

impl CategoryRows {
    pub fn height(&self) -> u32 {
        self.last_row - self.first_row + 1
    }
}

/// Row coordinates for the weight-definition sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightsLayout {
    /// One block per category, in tree order.
    pub blocks: Vec<CategoryRows>,
    /// Row of the TOTAL CHECK aggregate (one gap row after the last block).
    pub total_row: u32,
}

impl WeightsLayout {
    /// Plan row blocks for the weights sheet. Zero categories yield zero
    /// blocks and a total row directly under the (empty) data region.
    pub fn plan(model: &NormalizedModel) -> Self {
        // Pass 1: block heights (one row per leaf; implicit leaves count).
        let heights: Vec<u32> = model
            .categories
            .iter()
            .map(|c| c.leaves.len() as u32)
            .collect();

        // Pass 2: absolute offsets.
        let mut blocks = Vec::with_capacity(heights.len());
        let mut cursor = WEIGHTS_FIRST_DATA_ROW;
        for height in heights {
            blocks.push(CategoryRows {
                first_row: cursor,
                last_row: cursor + height - 1,
            });
            cursor += height;
        }
        WeightsLayout {
            blocks,
            total_row: cursor + 1,
        }
    }

    /// Last row holding leaf data, if any category exists.
    pub fn last_data_row(&self) -> Option<u32> {
        self.blocks.last().map(|b| b.last_row)
    }

    /// The editable category-weight cell (column B anchor of the block).
    pub fn category_weight_cell(&self, category: usize) -> CellRef {
        CellRef::new(self.blocks[category].first_row, COL_CATEGORY_WEIGHT)
    }

    /// The editable criterion-weight cell for one leaf.
    pub fn leaf_weight_cell(&self, category: usize, leaf: usize) -> CellRef {
        CellRef::new(
            self.blocks[category].first_row + leaf as u32,
            COL_CRITERION_WEIGHT,
        )
    }

    /// The effective-weight formula cell for one leaf.
    pub fn effective_weight_cell(&self, category: usize, leaf: usize) -> CellRef {
        CellRef::new(self.blocks[category].first_row + leaf as u32, COL_EFFECTIVE)
    }

    /// The criterion-weight column range of one category's block.
    pub fn leaf_weight_range(&self, category: usize) -> (CellRef, CellRef) {
        let block = &self.blocks[category];
        (
            CellRef::new(block.first_row, COL_CRITERION_WEIGHT),
            CellRef::new(block.last_row, COL_CRITERION_WEIGHT),
        )
    }
}

/// The column span one category occupies on a data sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CategoryColumns {
    /// First leaf column.
    pub first_leaf_col: u16,
    pub leaf_count: u16,
    /// Trailing aggregate "category score" column (decomposed only).
    pub score_col: Option<u16>,
}

impl CategoryColumns {
    /// Column of leaf `index` within this category.
    pub fn leaf_col(&self, index: usize) -> u16 {
        self.first_leaf_col + index as u16
    }

    /// Last column of the span, aggregate included.
    pub fn last_col(&self) -> u16 {
        self.score_col
            .unwrap_or(self.first_leaf_col + self.leaf_count - 1)
    }

    /// The column holding this category's score: the aggregate column for a
    /// decomposed category, the single leaf column otherwise.
    pub fn category_score_col(&self) -> u16 {
        self.score_col.unwrap_or(self.first_leaf_col)
    }
}

/// Column coordinates for one data sheet (raw input or scored).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataLayout {
    /// Option-name column (always the first column).
    pub option_col: u16,
    /// Total-score column; scored sheet only.
    pub total_col: Option<u16>,
    /// Rank column; scored sheet only.
    pub rank_col: Option<u16>,
    /// First data (leaf) column.
    pub first_data_col: u16,
    /// One span per category, in tree order.
    pub categories: Vec<CategoryColumns>,
    /// Number of option rows.
    pub option_rows: u32,
}

impl DataLayout {
    /// Plan columns for a data sheet. `with_totals` adds the total and rank
    /// columns between the option column and the data block (scored sheet).
    pub fn plan(model: &NormalizedModel, option_count: usize, with_totals: bool) -> Self {
        let option_col = 0u16;
        let (total_col, rank_col, first_data_col) = if with_totals {
            (Some(1u16), Some(2u16), 3u16)
        } else {
            (None, None, 1u16)
        };

        // Pass 1: span widths (leaves plus one aggregate column when
        // decomposed).
        let widths: Vec<(u16, bool)> = model
            .categories
            .iter()
            .map(|c| (c.leaves.len() as u16, c.decomposed))
            .collect();

        // Pass 2: monotonic cursor assignment.
        let mut categories = Vec::with_capacity(widths.len());
        let mut cursor = first_data_col;
        for (leaf_count, decomposed) in widths {
            let first_leaf_col = cursor;
            cursor += leaf_count;
            let score_col = if decomposed {
                let col = cursor;
                cursor += 1;
                Some(col)
            } else {
                None
            };
            categories.push(CategoryColumns {
                first_leaf_col,
                leaf_count,
                score_col,
            });
        }

        DataLayout {
            option_col,
            total_col,
            rank_col,
            first_data_col,
            categories,
            option_rows: option_count as u32,
        }
    }

    /// Row of option `index` (0-based).
    pub fn option_row(&self, index: usize) -> u32 {
        FIRST_OPTION_ROW + index as u32
    }

    /// Last option row, inclusive.
    pub fn last_option_row(&self) -> u32 {
        FIRST_OPTION_ROW + self.option_rows - 1
    }

    /// Last occupied column on the sheet.
    pub fn last_col(&self) -> u16 {
        self.categories
            .last()
            .map(|c| c.last_col())
            .unwrap_or(self.first_data_col.saturating_sub(1))
    }
}

/// One coordinate table per sheet, planned together from one snapshot.
/// Formula emission consumes these and never recomputes layout inline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutSet {
    pub weights: WeightsLayout,
    pub input: DataLayout,
    pub scores: DataLayout,
}

/// Plan every sheet's coordinates for one compile invocation.
pub fn plan_layouts(model: &NormalizedModel, option_count: usize) -> LayoutSet {
    LayoutSet {
        weights: WeightsLayout::plan(model),
        input: DataLayout::plan(model, option_count, false),
        scores: DataLayout::plan(model, option_count, true),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use factor_model::{normalize, LeafNode, WeightModel, WeightNode};

    fn model() -> NormalizedModel {
        // Cost {Rent, Food, Travel} decomposed; Risk single-column;
        // Quality {Build, Support} decomposed.
        let tree = WeightModel::new(vec![
            WeightNode {
                name: "Cost".into(),
                weight: 50,
                subdivided: true,
                children: vec![
                    LeafNode {
                        name: "Rent".into(),
                        weight: 30,
                        ..Default::default()
                    },
                    LeafNode {
                        name: "Food".into(),
                        weight: 30,
                        ..Default::default()
                    },
                    LeafNode {
                        name: "Travel".into(),
                        weight: 40,
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
            WeightNode {
                name: "Risk".into(),
                weight: 20,
                ..Default::default()
            },
            WeightNode {
                name: "Quality".into(),
                weight: 30,
                subdivided: true,
                children: vec![
                    LeafNode {
                        name: "Build".into(),
                        weight: 50,
                        ..Default::default()
                    },
                    LeafNode {
                        name: "Support".into(),
                        weight: 50,
                        ..Default::default()
                    },
                ],
                ..Default::default()
            },
        ]);
        normalize(&tree)
    }

    #[test]
    fn weights_blocks_are_contiguous() {
        let layout = WeightsLayout::plan(&model());
        assert_eq!(
            layout.blocks,
            vec![
                CategoryRows {
                    first_row: 4,
                    last_row: 6
                },
                CategoryRows {
                    first_row: 7,
                    last_row: 7
                },
                CategoryRows {
                    first_row: 8,
                    last_row: 9
                },
            ]
        );
        assert_eq!(layout.last_data_row(), Some(9));
        // One gap row after the last block.
        assert_eq!(layout.total_row, 11);
        assert_eq!(layout.category_weight_cell(0).to_a1(), "B5");
        assert_eq!(layout.leaf_weight_cell(0, 2).to_a1(), "D7");
        assert_eq!(layout.effective_weight_cell(2, 1).to_a1(), "E10");
    }

    #[test]
    fn data_columns_walk_tree_order_without_overlap() {
        let layout = DataLayout::plan(&model(), 8, false);
        assert_eq!(layout.first_data_col, 1);
        // Cost: leaves B,C,D + score E; Risk: F; Quality: G,H + score I.
        assert_eq!(layout.categories[0].first_leaf_col, 1);
        assert_eq!(layout.categories[0].score_col, Some(4));
        assert_eq!(layout.categories[1].first_leaf_col, 5);
        assert_eq!(layout.categories[1].score_col, None);
        assert_eq!(layout.categories[1].category_score_col(), 5);
        assert_eq!(layout.categories[2].first_leaf_col, 6);
        assert_eq!(layout.categories[2].score_col, Some(8));
        assert_eq!(layout.last_col(), 8);
    }

    #[test]
    fn scored_sheet_shifts_data_past_total_and_rank() {
        let input = DataLayout::plan(&model(), 8, false);
        let scores = DataLayout::plan(&model(), 8, true);
        assert_eq!(scores.total_col, Some(1));
        assert_eq!(scores.rank_col, Some(2));
        assert_eq!(scores.first_data_col, 3);
        // Same tree, different coordinates: the tables are not
        // interchangeable.
        assert_eq!(scores.categories[0].first_leaf_col, 3);
        assert_ne!(
            input.categories[0].first_leaf_col,
            scores.categories[0].first_leaf_col
        );
    }

    #[test]
    fn option_rows_follow_fixed_header_band() {
        let layout = DataLayout::plan(&model(), 8, true);
        assert_eq!(layout.option_row(0), 9);
        assert_eq!(layout.last_option_row(), 16);
    }

    #[test]
    fn zero_categories_plan_header_only() {
        let empty = normalize(&WeightModel::default());
        let layouts = plan_layouts(&empty, 4);
        assert!(layouts.weights.blocks.is_empty());
        assert_eq!(layouts.weights.last_data_row(), None);
        assert_eq!(layouts.weights.total_row, WEIGHTS_FIRST_DATA_ROW + 1);
        assert!(layouts.input.categories.is_empty());
        assert_eq!(layouts.scores.option_rows, 4);
    }
}
