//! Weight-definition sheet: the sole editable source of every weight value.

use factor_model::{CellStyle, CellValue, HAlign, NormalizedModel, SheetGrid};

use crate::formula;
use crate::layout::{
    WeightsLayout, COL_CATEGORY, COL_CATEGORY_WEIGHT, COL_CHECK, COL_CRITERION,
    COL_CRITERION_WEIGHT, COL_EFFECTIVE, WEIGHTS_HEADER_ROW, WEIGHTS_NOTE_ROW, WEIGHTS_TITLE_ROW,
};
use crate::style;

const COLUMN_WIDTHS: [f64; 6] = [22.0, 16.0, 26.0, 16.0, 18.0, 30.0];
const HEADERS: [&str; 6] = [
    "Category",
    "Category Weight",
    "Criterion",
    "Criterion Weight",
    "Effective Weight",
    "Check",
];

pub fn build_weights(model: &NormalizedModel, layout: &WeightsLayout) -> SheetGrid {
    let mut grid = SheetGrid::new(super::SHEET_WEIGHTS);
    grid.tab_color = Some(style::TAB_WEIGHTS);

    grid.merge(WEIGHTS_TITLE_ROW, 0, WEIGHTS_TITLE_ROW, COL_CHECK);
    grid.text(WEIGHTS_TITLE_ROW, 0, "Weight Structure", style::title());
    grid.text(
        WEIGHTS_NOTE_ROW,
        0,
        "Edit weights here (blue cells). All other sheets reference this tab.",
        style::note(),
    );

    for (col, header) in HEADERS.iter().enumerate() {
        grid.text(
            WEIGHTS_HEADER_ROW,
            col as u16,
            header,
            style::header(style::TAB_WEIGHTS),
        );
    }
    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        grid.set_col_width(col as u16, *width);
    }

    for (category, block) in model.categories.iter().zip(&layout.blocks) {
        let category_name_style = CellStyle::new()
            .size(10.0)
            .bold()
            .color(style::INK)
            .fill(style::BLOCK_FILL)
            .align(HAlign::Left);
        grid.text(block.first_row, COL_CATEGORY, &category.name, category_name_style);
        grid.number(
            block.first_row,
            COL_CATEGORY_WEIGHT,
            category.weight as f64 / 100.0,
            CellStyle::new()
                .size(9.0)
                .bold()
                .color(style::EDIT_FONT)
                .fill(style::EDIT_FILL)
                .num_format("0%"),
        );

        if category.decomposed {
            for (i, leaf) in category.leaves.iter().enumerate() {
                let row = block.first_row + i as u32;
                if i > 0 {
                    grid.blank(row, COL_CATEGORY, CellStyle::new().fill(style::BLOCK_FILL));
                    grid.blank(row, COL_CATEGORY_WEIGHT, CellStyle::new().fill(style::BLOCK_FILL));
                }
                grid.text(
                    row,
                    COL_CRITERION,
                    &leaf.name,
                    CellStyle::new().size(10.0).color(style::SLATE).align(HAlign::Left),
                );
                grid.number(
                    row,
                    COL_CRITERION_WEIGHT,
                    leaf.weight as f64 / 100.0,
                    CellStyle::new()
                        .size(10.0)
                        .color(style::EDIT_FONT)
                        .fill(style::EDIT_FILL)
                        .num_format("0%"),
                );
            }
        } else {
            // One synthetic row; the implicit leaf always carries 100%.
            grid.text(
                block.first_row,
                COL_CRITERION,
                "(single criterion)",
                CellStyle::new()
                    .size(10.0)
                    .italic()
                    .color(style::SLATE_FAINT)
                    .align(HAlign::Left),
            );
            grid.number(
                block.first_row,
                COL_CRITERION_WEIGHT,
                1.0,
                CellStyle::new()
                    .size(10.0)
                    .color(style::SLATE_FAINT)
                    .num_format("0%"),
            );
        }

        if block.height() > 1 {
            grid.merge(block.first_row, COL_CATEGORY, block.last_row, COL_CATEGORY);
            grid.merge(
                block.first_row,
                COL_CATEGORY_WEIGHT,
                block.last_row,
                COL_CATEGORY_WEIGHT,
            );
        }
    }

    // Effective-weight formulas and per-category checks.
    for (index, block) in layout.blocks.iter().enumerate() {
        let category_weight = layout.category_weight_cell(index);
        let siblings = layout.leaf_weight_range(index);
        for row in block.first_row..=block.last_row {
            let leaf = (row - block.first_row) as usize;
            grid.formula(
                row,
                COL_EFFECTIVE,
                formula::effective_weight(
                    category_weight,
                    layout.leaf_weight_cell(index, leaf),
                    siblings,
                ),
                CellStyle::new().size(10.0).bold().num_format("0.0%"),
            );
        }
        grid.formula(
            block.first_row,
            COL_CHECK,
            formula::sibling_check(siblings),
            CellStyle::new()
                .size(9.0)
                .bold()
                .color(style::CHECK_FONT)
                .fill(style::CHECK_FILL),
        );
        for row in block.first_row + 1..=block.last_row {
            grid.blank(row, COL_CHECK, CellStyle::new().fill(style::CHECK_FILL));
        }
    }

    // TOTAL CHECK aggregate row.
    let total_row = layout.total_row;
    let weight_cells: Vec<_> = (0..layout.blocks.len())
        .map(|i| layout.category_weight_cell(i))
        .collect();
    let total_fill = CellStyle::new().fill(style::TOTAL_ROW_FILL);
    grid.text(
        total_row,
        COL_CATEGORY,
        "TOTAL CHECK",
        CellStyle::new()
            .size(10.0)
            .bold()
            .color(style::INK)
            .fill(style::TOTAL_ROW_FILL)
            .align(HAlign::Left),
    );
    let total_number_style = CellStyle::new()
        .size(10.0)
        .bold()
        .fill(style::TOTAL_ROW_FILL)
        .num_format("0%");
    match formula::category_weight_sum(&weight_cells) {
        Some(sum) => grid.set(
            total_row,
            COL_CATEGORY_WEIGHT,
            CellValue::Formula(sum),
            total_number_style.clone(),
        ),
        None => grid.number(total_row, COL_CATEGORY_WEIGHT, 0.0, total_number_style.clone()),
    }
    grid.blank(total_row, COL_CRITERION, total_fill.clone());
    grid.blank(total_row, COL_CRITERION_WEIGHT, total_fill);
    let effective_total_style = CellStyle::new()
        .size(10.0)
        .bold()
        .fill(style::TOTAL_ROW_FILL)
        .num_format("0.0%");
    match layout.last_data_row() {
        Some(last) => {
            let first = factor_model::CellRef::new(crate::layout::WEIGHTS_FIRST_DATA_ROW, COL_EFFECTIVE);
            let last = factor_model::CellRef::new(last, COL_EFFECTIVE);
            grid.formula(
                total_row,
                COL_EFFECTIVE,
                format!("SUM({})", formula::local_range(first, last)),
                effective_total_style,
            );
        }
        None => grid.number(total_row, COL_EFFECTIVE, 0.0, effective_total_style),
    }
    let check_style = CellStyle::new()
        .size(9.0)
        .bold()
        .color(style::CHECK_FONT)
        .fill(style::CHECK_FILL);
    match formula::total_check(&weight_cells) {
        Some(check) => grid.formula(total_row, COL_CHECK, check, check_style),
        None => grid.text(total_row, COL_CHECK, "Empty", check_style),
    }

    grid
}
