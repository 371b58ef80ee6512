//! Shared palette and format presets for the generated workbook.

use factor_model::{CellStyle, Color, HAlign};

/// Accent colors cycled per category on the data sheets.
pub const CATEGORY_COLORS: [Color; 6] = [
    Color(0x3B82F6),
    Color(0x8B5CF6),
    Color(0x10B981),
    Color(0xF59E0B),
    Color(0xEC4899),
    Color(0x6366F1),
];

/// Color of the `index`-th category's accent.
pub fn category_color(index: usize) -> Color {
    CATEGORY_COLORS[index % CATEGORY_COLORS.len()]
}

pub const INK: Color = Color(0x1A1A2E);
pub const MUTED: Color = Color(0x666666);
pub const SLATE: Color = Color(0x334155);
pub const SLATE_FAINT: Color = Color(0x94A3B8);
pub const LABEL: Color = Color(0x64748B);
pub const WHITE: Color = Color(0xFFFFFF);

/// Editable cells: blue text on a pale blue fill.
pub const EDIT_FONT: Color = Color(0x0000FF);
pub const EDIT_FILL: Color = Color(0xEFF6FF);

pub const BAND_FILL: Color = Color(0xF8FAFC);
pub const BLOCK_FILL: Color = Color(0xF1F5F9);
pub const CHECK_FILL: Color = Color(0xFEFCE8);
pub const CHECK_FONT: Color = Color(0x16A34A);
pub const TOTAL_ROW_FILL: Color = Color(0xE2E8F0);
pub const SCORE_FILL: Color = Color(0xF0FDF4);
pub const TOTAL_SCORE_FILL: Color = Color(0xDCFCE7);

/// Tab colors: Weights green, Input blue, Scores violet, Results amber.
pub const TAB_WEIGHTS: Color = Color(0x10B981);
pub const TAB_INPUT: Color = Color(0x3B82F6);
pub const TAB_SCORES: Color = Color(0x8B5CF6);
pub const TAB_RESULTS: Color = Color(0xF59E0B);

/// Color-scale anchors for total scores (red → yellow → green).
pub const SCALE_LOW: Color = Color(0xFECACA);
pub const SCALE_MID: Color = Color(0xFFFBEB);
pub const SCALE_HIGH: Color = Color(0xBBF7D0);

/// Sheet title: large, bold, left-aligned.
pub fn title() -> CellStyle {
    CellStyle::new().size(14.0).bold().color(INK).align(HAlign::Left)
}

/// Explanatory note under a title.
pub fn note() -> CellStyle {
    CellStyle::new().size(10.0).color(MUTED).align(HAlign::Left)
}

/// Column-header cell: white on the given fill.
pub fn header(fill: Color) -> CellStyle {
    CellStyle::new().size(9.0).bold().color(WHITE).fill(fill)
}

/// Right-aligned label in the data-sheet header band.
pub fn band_label(bold: bool) -> CellStyle {
    let style = CellStyle::new()
        .size(9.0)
        .color(LABEL)
        .fill(BAND_FILL)
        .align(HAlign::Right);
    if bold {
        style.bold()
    } else {
        style
    }
}
