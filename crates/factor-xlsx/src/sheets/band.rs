//! Shared frame of the two data sheets: title, header band (category /
//! weight / criterion / effective-weight rows), option names, widths, and
//! frozen panes. The input and scores builders add their data cells on top
//! of this frame using their own coordinate tables.

use factor_model::{CellStyle, Color, CompileRequest, HAlign, NormalizedModel, SheetGrid};

use crate::formula::SheetRef;
use crate::layout::{
    DataLayout, WeightsLayout, FIRST_OPTION_ROW, ROW_CATEGORY, ROW_CATEGORY_WEIGHT,
    ROW_COLUMN_HEADER, ROW_CRITERION, ROW_CRITERION_WEIGHT, ROW_EFFECTIVE,
};
use crate::style;

const OPTION_COL_WIDTH: f64 = 20.0;
const TOTAL_COL_WIDTH: f64 = 12.0;
const RANK_COL_WIDTH: f64 = 8.0;
const LEAF_COL_WIDTH: f64 = 16.0;
const SCORE_COL_WIDTH: f64 = 14.0;

/// Fallback workbook title when the model has none.
pub fn display_title(request: &CompileRequest) -> String {
    let title = request.title.trim();
    if title.is_empty() {
        "Weighted Factor Model".to_string()
    } else {
        title.to_string()
    }
}

pub struct DataFrame<'a> {
    pub sheet_name: &'a str,
    pub tab_color: Color,
    pub title_suffix: &'a str,
    pub note: &'a str,
}

/// Build the common frame of a data sheet.
pub fn build_frame(
    frame: &DataFrame<'_>,
    model: &NormalizedModel,
    weights: &WeightsLayout,
    data: &DataLayout,
    request: &CompileRequest,
) -> SheetGrid {
    let mut grid = SheetGrid::new(frame.sheet_name);
    grid.tab_color = Some(frame.tab_color);
    let weights_sheet = SheetRef::new(super::SHEET_WEIGHTS);

    grid.merge(0, 0, 0, 3);
    grid.text(
        0,
        0,
        &format!("{} - {}", display_title(request), frame.title_suffix),
        style::title(),
    );
    grid.text(1, 0, frame.note, style::note());

    // Header-band labels sit in the column just left of the data block;
    // any columns before it are filled plain.
    let label_col = data.first_data_col - 1;
    for row in ROW_CATEGORY..=ROW_EFFECTIVE {
        for col in 0..label_col {
            grid.blank(row, col, CellStyle::new().fill(style::BAND_FILL));
        }
    }
    let labels = [
        (ROW_CATEGORY, "Category", true),
        (ROW_CATEGORY_WEIGHT, "Category weight", false),
        (ROW_CRITERION, "Criterion", true),
        (ROW_CRITERION_WEIGHT, "Criterion weight", false),
        (ROW_EFFECTIVE, "Effective weight", false),
    ];
    for (row, label, bold) in labels {
        grid.text(row, label_col, label, style::band_label(bold));
    }

    grid.text(
        ROW_COLUMN_HEADER,
        data.option_col,
        "Option",
        style::header(style::INK).align(HAlign::Left),
    );
    grid.set_col_width(data.option_col, OPTION_COL_WIDTH);
    if let Some(total_col) = data.total_col {
        grid.text(ROW_COLUMN_HEADER, total_col, "Total Score", style::header(style::INK));
        grid.set_col_width(total_col, TOTAL_COL_WIDTH);
    }
    if let Some(rank_col) = data.rank_col {
        grid.text(ROW_COLUMN_HEADER, rank_col, "Rank", style::header(style::INK));
        grid.set_col_width(rank_col, RANK_COL_WIDTH);
    }

    for (category, span) in model.categories.iter().zip(&data.categories) {
        let accent = style::category_color(category.index);
        let span_end = span.last_col();

        grid.merge(ROW_CATEGORY, span.first_leaf_col, ROW_CATEGORY, span_end);
        grid.text(
            ROW_CATEGORY,
            span.first_leaf_col,
            &category.name,
            CellStyle::new().size(10.0).bold().color(style::WHITE).fill(accent),
        );

        grid.merge(ROW_CATEGORY_WEIGHT, span.first_leaf_col, ROW_CATEGORY_WEIGHT, span_end);
        grid.formula(
            ROW_CATEGORY_WEIGHT,
            span.first_leaf_col,
            weights_sheet.cell(weights.category_weight_cell(category.index)),
            CellStyle::new()
                .size(8.0)
                .italic()
                .color(style::EDIT_FONT)
                .fill(style::BLOCK_FILL)
                .num_format("0%"),
        );

        if category.decomposed {
            for (i, leaf) in category.leaves.iter().enumerate() {
                let col = span.leaf_col(i);
                grid.text(
                    ROW_CRITERION,
                    col,
                    &leaf.name,
                    CellStyle::new().size(9.0).bold().color(style::SLATE).fill(style::BAND_FILL),
                );
                grid.formula(
                    ROW_CRITERION_WEIGHT,
                    col,
                    weights_sheet.cell(weights.leaf_weight_cell(category.index, i)),
                    CellStyle::new()
                        .size(9.0)
                        .color(style::EDIT_FONT)
                        .fill(style::BLOCK_FILL)
                        .num_format("0%"),
                );
                grid.formula(
                    ROW_EFFECTIVE,
                    col,
                    weights_sheet.cell(weights.effective_weight_cell(category.index, i)),
                    CellStyle::new().size(9.0).fill(style::BLOCK_FILL).num_format("0.0%"),
                );
                grid.blank(
                    ROW_COLUMN_HEADER,
                    col,
                    CellStyle::new().fill(style::TOTAL_ROW_FILL),
                );
                grid.set_col_width(col, LEAF_COL_WIDTH);
            }
            if let Some(score_col) = span.score_col {
                grid.text(
                    ROW_CRITERION,
                    score_col,
                    &format!("{} Score", category.name),
                    CellStyle::new()
                        .size(9.0)
                        .bold()
                        .color(accent)
                        .fill(style::SCORE_FILL)
                        .wrap(),
                );
                for row in [ROW_CRITERION_WEIGHT, ROW_EFFECTIVE, ROW_COLUMN_HEADER] {
                    grid.blank(row, score_col, CellStyle::new().fill(style::SCORE_FILL));
                }
                grid.set_col_width(score_col, SCORE_COL_WIDTH);
            }
        } else {
            let col = span.first_leaf_col;
            grid.text(
                ROW_CRITERION,
                col,
                &category.name,
                CellStyle::new().size(9.0).bold().color(style::SLATE).fill(style::BAND_FILL),
            );
            grid.blank(ROW_CRITERION_WEIGHT, col, CellStyle::new().fill(style::BLOCK_FILL));
            grid.formula(
                ROW_EFFECTIVE,
                col,
                weights_sheet.cell(weights.effective_weight_cell(category.index, 0)),
                CellStyle::new().size(9.0).fill(style::BLOCK_FILL).num_format("0.0%"),
            );
            grid.blank(
                ROW_COLUMN_HEADER,
                col,
                CellStyle::new().fill(style::TOTAL_ROW_FILL),
            );
            grid.set_col_width(col, LEAF_COL_WIDTH);
        }
    }

    // Option names.
    for i in 0..data.option_rows as usize {
        grid.text(
            data.option_row(i),
            data.option_col,
            &request.option_name(i),
            CellStyle::new().size(10.0).color(style::SLATE).align(HAlign::Left),
        );
    }

    grid.freeze(FIRST_OPTION_ROW, data.first_data_col);
    grid
}
