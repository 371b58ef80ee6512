use core::fmt;

use serde::{Deserialize, Serialize};

/// Convert a 1-based column index to its spreadsheet column name
/// (`1` → `A`, `26` → `Z`, `27` → `AA`).
pub fn column_name(col: u32) -> String {
    debug_assert!(col >= 1, "column indices are 1-based");
    let mut n = col;
    let mut out = String::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        out.insert(0, (b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    out
}

/// Convert a spreadsheet column name back to its 1-based index
/// (`A` → `1`, `AA` → `27`). Case-insensitive.
pub fn column_index(name: &str) -> Result<u32, ColumnParseError> {
    if name.is_empty() {
        return Err(ColumnParseError::Empty);
    }
    let mut col: u32 = 0;
    for b in name.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(ColumnParseError::InvalidCharacter);
        }
        let v = (b.to_ascii_uppercase() - b'A') as u32 + 1;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(v))
            .ok_or(ColumnParseError::Overflow)?;
    }
    Ok(col)
}

/// Errors raised when parsing a column name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColumnParseError {
    Empty,
    InvalidCharacter,
    Overflow,
}

impl fmt::Display for ColumnParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ColumnParseError::Empty => "empty column name",
            ColumnParseError::InvalidCharacter => "non-alphabetic character in column name",
            ColumnParseError::Overflow => "column name out of range",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ColumnParseError {}

/// A reference to a single cell within a worksheet.
///
/// Rows and columns are **0-indexed** to match the writer API:
/// - `row = 0` is spreadsheet row `1`
/// - `col = 0` is spreadsheet column `A`
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    /// 0-indexed row.
    pub row: u32,
    /// 0-indexed column.
    pub col: u16,
}

impl CellRef {
    /// Construct a new [`CellRef`].
    #[inline]
    pub const fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Render as a relative A1 reference (e.g. `B5`).
    pub fn to_a1(self) -> String {
        format!("{}{}", column_name(self.col as u32 + 1), self.row + 1)
    }

    /// Render with an absolute row (e.g. `B$5`), as used by rank ranges.
    pub fn to_a1_abs_row(self) -> String {
        format!("{}${}", column_name(self.col as u32 + 1), self.row + 1)
    }

    /// Render fully absolute (e.g. `$B$5`), as used by cross-sheet lookups.
    pub fn to_a1_abs(self) -> String {
        format!("${}${}", column_name(self.col as u32 + 1), self.row + 1)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}
