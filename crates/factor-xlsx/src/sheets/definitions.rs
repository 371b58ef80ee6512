//! Definitions sheet: one row per criterion with its category and free-text
//! description. Static reference material, no formulas.

use factor_model::{CellStyle, HAlign, NormalizedModel, SheetGrid};

use crate::style;

const HEADER_ROW: u32 = 3;
const FIRST_DATA_ROW: u32 = 4;

const COL_CATEGORY: u16 = 0;
const COL_CRITERION: u16 = 1;
const COL_DESCRIPTION: u16 = 2;

pub fn build_definitions(model: &NormalizedModel) -> SheetGrid {
    let mut grid = SheetGrid::new(super::SHEET_DEFINITIONS);

    grid.merge(0, COL_CATEGORY, 0, COL_DESCRIPTION);
    grid.text(0, COL_CATEGORY, "Criterion Definitions", style::title());
    grid.text(
        1,
        COL_CATEGORY,
        "What each criterion means and how to interpret raw values.",
        style::note(),
    );

    for (col, header) in [
        (COL_CATEGORY, "Category"),
        (COL_CRITERION, "Criterion"),
        (COL_DESCRIPTION, "Description"),
    ] {
        grid.text(HEADER_ROW, col, header, style::header(style::INK));
    }
    grid.set_col_width(COL_CATEGORY, 22.0);
    grid.set_col_width(COL_CRITERION, 26.0);
    grid.set_col_width(COL_DESCRIPTION, 60.0);

    let mut row = FIRST_DATA_ROW;
    for category in &model.categories {
        let accent = style::category_color(category.index);
        let block_height = category.leaves.len() as u32;
        grid.text(
            row,
            COL_CATEGORY,
            &category.name,
            CellStyle::new()
                .size(10.0)
                .bold()
                .color(accent)
                .align(HAlign::Left),
        );
        if block_height > 1 {
            grid.merge(row, COL_CATEGORY, row + block_height - 1, COL_CATEGORY);
        }
        for leaf in &category.leaves {
            grid.text(
                row,
                COL_CRITERION,
                &leaf.name,
                CellStyle::new().size(10.0).color(style::SLATE).align(HAlign::Left),
            );
            grid.text(
                row,
                COL_DESCRIPTION,
                &leaf.description,
                CellStyle::new()
                    .size(10.0)
                    .color(style::MUTED)
                    .align(HAlign::Left)
                    .wrap(),
            );
            row += 1;
        }
    }

    grid
}
