//! Raw data-entry sheet. Every leaf cell is editable; decomposed categories
//! also carry a computed weighted-average column over the raw values.

use factor_model::{CellRef, CellStyle, CompileRequest, NormalizedModel, SheetGrid};

use crate::formula::{self, SheetRef};
use crate::layout::LayoutSet;
use crate::sheets::band::{self, DataFrame};
use crate::style;

pub fn build_input(
    model: &NormalizedModel,
    layouts: &LayoutSet,
    request: &CompileRequest,
) -> SheetGrid {
    let data = &layouts.input;
    let mut grid = band::build_frame(
        &DataFrame {
            sheet_name: super::SHEET_INPUT,
            tab_color: style::TAB_INPUT,
            title_suffix: "Data Input",
            note: "Enter raw values for each option (blue cells). Higher values should mean better.",
        },
        model,
        &layouts.weights,
        data,
        request,
    );
    let weights_sheet = SheetRef::new(super::SHEET_WEIGHTS);

    let edit_style = CellStyle::new()
        .size(10.0)
        .color(style::EDIT_FONT)
        .fill(style::EDIT_FILL)
        .num_format("0.00");
    let aggregate_style = CellStyle::new()
        .size(10.0)
        .bold()
        .fill(style::SCORE_FILL)
        .num_format("0.00");

    for i in 0..data.option_rows as usize {
        let row = data.option_row(i);
        for (category, span) in model.categories.iter().zip(&data.categories) {
            for leaf in 0..category.leaves.len() {
                grid.blank(row, span.leaf_col(leaf), edit_style.clone());
            }
            if let Some(score_col) = span.score_col {
                let leaf_cells: Vec<CellRef> = (0..category.leaves.len())
                    .map(|leaf| CellRef::new(row, span.leaf_col(leaf)))
                    .collect();
                grid.formula(
                    row,
                    score_col,
                    formula::category_score(
                        &leaf_cells,
                        weights_sheet,
                        layouts.weights.leaf_weight_range(category.index),
                    ),
                    aggregate_style.clone(),
                );
            }
        }
    }

    grid
}
