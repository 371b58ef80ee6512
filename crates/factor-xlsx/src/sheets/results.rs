//! Ranked-results sheet: a reverse lookup from rank to option over the
//! scored sheet, so the leaderboard reorders itself as inputs change.

use factor_model::{CellRef, CellStyle, ColorScale, CompileRequest, HAlign, SheetGrid};

use crate::formula::{self, SheetRef};
use crate::layout::LayoutSet;
use crate::sheets::band::display_title;
use crate::style;

pub const RESULTS_HEADER_ROW: u32 = 3;
pub const RESULTS_FIRST_DATA_ROW: u32 = 4;

const COL_RANK: u16 = 0;
const COL_OPTION: u16 = 1;
const COL_SCORE: u16 = 2;

pub fn build_results(layouts: &LayoutSet, request: &CompileRequest) -> SheetGrid {
    let mut grid = SheetGrid::new(super::SHEET_RESULTS);
    grid.tab_color = Some(style::TAB_RESULTS);
    let scores_sheet = SheetRef::new(super::SHEET_SCORES);
    let scores = &layouts.scores;

    grid.merge(0, COL_RANK, 0, COL_SCORE);
    grid.text(
        0,
        COL_RANK,
        &format!("{} - Results", display_title(request)),
        style::title(),
    );
    grid.text(
        1,
        COL_RANK,
        "Ranked standings. Recomputed live from the Scores sheet.",
        style::note(),
    );

    for (col, header) in [(COL_RANK, "Rank"), (COL_OPTION, "Option"), (COL_SCORE, "Total Score")] {
        grid.text(RESULTS_HEADER_ROW, col, header, style::header(style::TAB_RESULTS));
    }
    grid.set_col_width(COL_RANK, 8.0);
    grid.set_col_width(COL_OPTION, 26.0);
    grid.set_col_width(COL_SCORE, 14.0);

    let name_column = (
        CellRef::new(scores.option_row(0), scores.option_col),
        CellRef::new(scores.last_option_row(), scores.option_col),
    );
    let total_column = scores.total_col.map(|col| {
        (
            CellRef::new(scores.option_row(0), col),
            CellRef::new(scores.last_option_row(), col),
        )
    });
    let rank_column = scores.rank_col.map(|col| {
        (
            CellRef::new(scores.option_row(0), col),
            CellRef::new(scores.last_option_row(), col),
        )
    });

    for i in 0..scores.option_rows {
        let row = RESULTS_FIRST_DATA_ROW + i;
        let winner = i == 0;
        let rank_cell = CellRef::new(row, COL_RANK);

        let mut rank_style = CellStyle::new().size(10.0).num_format("0");
        let mut name_style = CellStyle::new().size(10.0).color(style::SLATE).align(HAlign::Left);
        let mut score_style = CellStyle::new().size(10.0).num_format("0.00");
        if winner {
            rank_style = rank_style.bold().fill(style::TOTAL_SCORE_FILL);
            name_style = name_style.bold().fill(style::TOTAL_SCORE_FILL);
            score_style = score_style.bold().fill(style::TOTAL_SCORE_FILL);
        }

        grid.number(row, COL_RANK, (i + 1) as f64, rank_style);
        match (rank_column, total_column) {
            (Some(ranks), Some(totals)) => {
                grid.formula(
                    row,
                    COL_OPTION,
                    formula::result_name_lookup(scores_sheet, rank_cell, name_column, ranks),
                    name_style,
                );
                grid.formula(
                    row,
                    COL_SCORE,
                    formula::result_score_lookup(scores_sheet, rank_cell, totals, ranks),
                    score_style,
                );
            }
            _ => {
                grid.text(row, COL_OPTION, "", name_style);
                grid.number(row, COL_SCORE, 0.0, score_style);
            }
        }
    }

    if scores.option_rows > 0 {
        grid.color_scales.push(ColorScale {
            first_row: RESULTS_FIRST_DATA_ROW,
            first_col: COL_SCORE,
            last_row: RESULTS_FIRST_DATA_ROW + scores.option_rows - 1,
            last_col: COL_SCORE,
            min_color: style::SCALE_LOW,
            mid_color: style::SCALE_MID,
            max_color: style::SCALE_HIGH,
        });
    }

    grid
}
