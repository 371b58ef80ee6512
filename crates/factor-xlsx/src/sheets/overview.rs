//! Overview sheet: title, description, usage notes, and a guide to the
//! other sheets. Static text only.

use factor_model::{CellStyle, CompileRequest, HAlign, NormalizedModel, SheetGrid};

use crate::sheets::band::display_title;
use crate::style;

const STEPS: [&str; 4] = [
    "1. Review the weight structure on the Weights sheet and adjust the blue cells.",
    "2. Enter raw values for every option on the Input sheet (blue cells).",
    "3. The Scores sheet standardizes each column and computes weighted totals.",
    "4. The Results sheet shows the live ranking; it reorders as inputs change.",
];

const SHEET_GUIDE: [(&str, &str); 5] = [
    (
        super::SHEET_WEIGHTS,
        "Category and criterion weights. The only place weights are edited.",
    ),
    (super::SHEET_INPUT, "Raw per-option values, one column per criterion."),
    (
        super::SHEET_SCORES,
        "Standardized scores, category aggregates, totals, and ranks.",
    ),
    (super::SHEET_RESULTS, "Options ordered by rank with their total scores."),
    (super::SHEET_DEFINITIONS, "What each criterion means."),
];

pub fn build_overview(model: &NormalizedModel, request: &CompileRequest) -> SheetGrid {
    let mut grid = SheetGrid::new(super::SHEET_OVERVIEW);
    grid.set_col_width(0, 18.0);
    grid.set_col_width(1, 70.0);

    grid.merge(0, 0, 0, 1);
    grid.text(0, 0, &display_title(request), style::title());
    let description = request.description.trim();
    if !description.is_empty() {
        grid.merge(1, 0, 1, 1);
        grid.text(1, 0, description, style::note());
    }

    let section = CellStyle::new()
        .size(11.0)
        .bold()
        .color(style::INK)
        .align(HAlign::Left);
    let body = CellStyle::new().size(10.0).color(style::SLATE).align(HAlign::Left);

    grid.text(3, 0, "How to use this workbook", section.clone());
    for (i, step) in STEPS.iter().enumerate() {
        let row = 4 + i as u32;
        grid.merge(row, 0, row, 1);
        grid.text(row, 0, step, body.clone());
    }

    grid.text(9, 0, "Sheets", section.clone());
    for (i, (name, purpose)) in SHEET_GUIDE.iter().enumerate() {
        let row = 10 + i as u32;
        grid.text(
            row,
            0,
            name,
            CellStyle::new().size(10.0).bold().color(style::INK).align(HAlign::Left),
        );
        grid.text(row, 1, purpose, body.clone());
    }

    grid.text(16, 0, "Model", section);
    let stats = [
        format!("{} categories", model.categories.len()),
        format!("{} criteria", model.leaf_count()),
        format!("{} options", request.clamped_option_count()),
    ];
    for (i, stat) in stats.iter().enumerate() {
        let row = 17 + i as u32;
        grid.text(row, 0, stat, body.clone());
    }

    grid
}
