//! Styled-grid output model.
//!
//! Sheet builders are pure functions from (tree, coordinates, options) to a
//! [`SheetGrid`]; the workbook assembler is the only component that touches
//! the binary serializer. Keeping the grid as plain data lets tests inspect
//! exact cell values and formula text without round-tripping a container
//! file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::CellRef;

/// An RGB color (`0xRRGGBB`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

/// Horizontal alignment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// The content of one cell.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellValue {
    /// A styled cell with no content (fills, band backgrounds, editable
    /// placeholders).
    #[default]
    Blank,
    Text(String),
    /// Stored as the fraction/score the display format expects (weights are
    /// fractions 0-1 with percent formats).
    Number(f64),
    /// Formula text without a leading `=`.
    Formula(String),
}

impl CellValue {
    /// Formula text, if this cell holds a formula.
    pub fn as_formula(&self) -> Option<&str> {
        match self {
            CellValue::Formula(f) => Some(f),
            _ => None,
        }
    }

    /// Text content, if this cell holds a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Visual formatting for one cell.
///
/// Every field is optional; the renderer maps the set fields onto the
/// serializer's format object. All cells get thin borders and vertical
/// centering from the renderer, matching the house style of the generated
/// workbooks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    /// Display format code (e.g. `0%`, `0.0%`, `0.00`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_format: Option<String>,
    #[serde(default)]
    pub align: HAlign,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub wrap: bool,
}

impl CellStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, pt: f64) -> Self {
        self.font_size = Some(pt);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.font_color = Some(color);
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn num_format(mut self, fmt: &str) -> Self {
        self.num_format = Some(fmt.to_string());
        self
    }

    pub fn align(mut self, align: HAlign) -> Self {
        self.align = align;
        self
    }

    pub fn wrap(mut self) -> Self {
        self.wrap = true;
        self
    }
}

/// One placed cell: content plus formatting.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    pub style: CellStyle,
}

/// A merged rectangle. Always spans at least two cells; the top-left cell
/// carries the merged content and style.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merge {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

/// A 3-color-scale conditional format over a cell range, anchored at the
/// range minimum, 50th percentile, and maximum.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScale {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
    pub min_color: Color,
    pub mid_color: Color,
    pub max_color: Color,
}

/// One fully described worksheet: sparse styled cells plus sheet-level
/// decoration (merges, widths, frozen panes, conditional color scales).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SheetGrid {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_color: Option<Color>,
    cells: BTreeMap<(u32, u16), Cell>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merges: Vec<Merge>,
    /// `(column, width)` pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub col_widths: Vec<(u16, f64)>,
    /// `(rows, cols)` frozen above/left of the scrollable region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub freeze_panes: Option<(u32, u16)>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub color_scales: Vec<ColorScale>,
}

impl SheetGrid {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tab_color: None,
            cells: BTreeMap::new(),
            merges: Vec::new(),
            col_widths: Vec::new(),
            freeze_panes: None,
            color_scales: Vec::new(),
        }
    }

    /// Place a cell, replacing any previous content at that coordinate.
    pub fn set(&mut self, row: u32, col: u16, value: CellValue, style: CellStyle) {
        self.cells.insert((row, col), Cell { value, style });
    }

    /// Shorthand for a text cell.
    pub fn text(&mut self, row: u32, col: u16, text: &str, style: CellStyle) {
        self.set(row, col, CellValue::Text(text.to_string()), style);
    }

    /// Shorthand for a numeric cell.
    pub fn number(&mut self, row: u32, col: u16, value: f64, style: CellStyle) {
        self.set(row, col, CellValue::Number(value), style);
    }

    /// Shorthand for a formula cell.
    pub fn formula(&mut self, row: u32, col: u16, formula: String, style: CellStyle) {
        self.set(row, col, CellValue::Formula(formula), style);
    }

    /// Shorthand for a styled blank cell.
    pub fn blank(&mut self, row: u32, col: u16, style: CellStyle) {
        self.set(row, col, CellValue::Blank, style);
    }

    /// Look up a placed cell.
    pub fn cell(&self, row: u32, col: u16) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Look up a placed cell by [`CellRef`].
    pub fn cell_at(&self, at: CellRef) -> Option<&Cell> {
        self.cell(at.row, at.col)
    }

    /// Iterate placed cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &Cell)> {
        self.cells.iter().map(|(&(r, c), cell)| (r, c, cell))
    }

    /// Record a merged rectangle. Degenerate (single-cell) requests are
    /// ignored so callers can merge unconditionally.
    pub fn merge(&mut self, first_row: u32, first_col: u16, last_row: u32, last_col: u16) {
        if first_row == last_row && first_col == last_col {
            return;
        }
        self.merges.push(Merge {
            first_row,
            first_col,
            last_row,
            last_col,
        });
    }

    pub fn set_col_width(&mut self, col: u16, width: f64) {
        self.col_widths.push((col, width));
    }

    pub fn freeze(&mut self, rows: u32, cols: u16) {
        self.freeze_panes = Some((rows, cols));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_cells_and_lookup() {
        let mut grid = SheetGrid::new("Sheet1");
        grid.text(0, 0, "hello", CellStyle::new().bold());
        grid.number(9, 3, 0.5, CellStyle::new().num_format("0%"));

        assert_eq!(grid.cell(0, 0).unwrap().value.as_text(), Some("hello"));
        assert!(grid.cell(1, 1).is_none());
        assert_eq!(grid.iter_cells().count(), 2);
    }

    #[test]
    fn degenerate_merges_are_dropped() {
        let mut grid = SheetGrid::new("Sheet1");
        grid.merge(0, 0, 0, 0);
        grid.merge(0, 0, 0, 3);
        assert_eq!(grid.merges.len(), 1);
    }
}
