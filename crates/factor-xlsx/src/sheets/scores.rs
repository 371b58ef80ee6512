//! Scored sheet: standardized leaf scores, category aggregates, weighted
//! totals, and ranks. Everything here is a formula over the raw sheet and
//! the weights sheet; editing either recomputes this sheet live.

use factor_model::{CellRef, CellStyle, ColorScale, CompileRequest, NormalizedModel, SheetGrid};

use crate::formula::{self, SheetRef};
use crate::layout::LayoutSet;
use crate::sheets::band::{self, DataFrame};
use crate::style;

pub fn build_scores(
    model: &NormalizedModel,
    layouts: &LayoutSet,
    request: &CompileRequest,
) -> SheetGrid {
    let data = &layouts.scores;
    let mut grid = band::build_frame(
        &DataFrame {
            sheet_name: super::SHEET_SCORES,
            tab_color: style::TAB_SCORES,
            title_suffix: "Scores",
            note: "Standardized scores computed from the Input sheet. Do not edit.",
        },
        model,
        &layouts.weights,
        data,
        request,
    );
    let weights_sheet = SheetRef::new(super::SHEET_WEIGHTS);
    let input_sheet = SheetRef::new(super::SHEET_INPUT);
    let input = &layouts.input;

    let score_style = CellStyle::new().size(10.0).num_format("0.00");
    let aggregate_style = CellStyle::new()
        .size(10.0)
        .bold()
        .fill(style::SCORE_FILL)
        .num_format("0.00");
    let total_style = CellStyle::new()
        .size(10.0)
        .bold()
        .fill(style::TOTAL_SCORE_FILL)
        .num_format("0.00");
    let rank_style = CellStyle::new()
        .size(10.0)
        .bold()
        .fill(style::TOTAL_ROW_FILL)
        .num_format("0");

    let category_weight_cells: Vec<CellRef> = (0..model.categories.len())
        .map(|i| layouts.weights.category_weight_cell(i))
        .collect();

    for i in 0..data.option_rows as usize {
        let row = data.option_row(i);

        for (category, (span, input_span)) in model
            .categories
            .iter()
            .zip(data.categories.iter().zip(&input.categories))
        {
            for leaf in 0..category.leaves.len() {
                let raw_col = input_span.leaf_col(leaf);
                let raw = CellRef::new(input.option_row(i), raw_col);
                let column = (
                    CellRef::new(input.option_row(0), raw_col),
                    CellRef::new(input.last_option_row(), raw_col),
                );
                grid.formula(
                    row,
                    span.leaf_col(leaf),
                    formula::zscore(input_sheet, raw, column),
                    score_style.clone(),
                );
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

        if let Some(total_col) = data.total_col {
            let score_cells: Vec<CellRef> = data
                .categories
                .iter()
                .map(|span| CellRef::new(row, span.category_score_col()))
                .collect();
            match formula::total_score(&score_cells, weights_sheet, &category_weight_cells) {
                Some(total) => grid.formula(row, total_col, total, total_style.clone()),
                None => grid.number(row, total_col, 0.0, total_style.clone()),
            }
        }
        if let (Some(rank_col), Some(total_col)) = (data.rank_col, data.total_col) {
            let total = CellRef::new(row, total_col);
            let column = (
                CellRef::new(data.option_row(0), total_col),
                CellRef::new(data.last_option_row(), total_col),
            );
            grid.formula(row, rank_col, formula::rank(total, column), rank_style.clone());
        }
    }

    if data.option_rows > 0 {
        if let Some(total_col) = data.total_col {
            grid.color_scales.push(ColorScale {
                first_row: data.option_row(0),
                first_col: total_col,
                last_row: data.last_option_row(),
                last_col: total_col,
                min_color: style::SCALE_LOW,
                mid_color: style::SCALE_MID,
                max_color: style::SCALE_HIGH,
            });
        }
        if let Some(rank_col) = data.rank_col {
            // Rank 1 is best, so the scale runs green at the minimum.
            grid.color_scales.push(ColorScale {
                first_row: data.option_row(0),
                first_col: rank_col,
                last_row: data.last_option_row(),
                last_col: rank_col,
                min_color: style::SCALE_HIGH,
                mid_color: style::SCALE_MID,
                max_color: style::SCALE_LOW,
            });
        }
    }

    grid
}
