//! `factor-model` defines the data structures of the weighted-factor-model
//! workbook compiler.
//!
//! The crate is intentionally self-contained so it can be reused by:
//! - the layout planner and formula emitter (`factor-xlsx`)
//! - UI/IPC boundaries via `serde` (JSON-safe schema)
//!
//! It covers both ends of the pipeline: the *input* snapshot (a weight tree
//! plus an option list, owned and mutated by an external form) and the
//! *output* grid model (styled sheets of values and formula text) that the
//! workbook assembler serializes.

mod address;
mod grid;
mod model;
mod normalize;
mod sheet_name;

pub use address::{column_index, column_name, CellRef, ColumnParseError};
pub use grid::{Cell, CellStyle, CellValue, Color, ColorScale, HAlign, Merge, SheetGrid};
pub use model::{
    BalanceReport, CategoryBalance, CompileRequest, EffectiveWeight, LeafNode, WeightModel,
    WeightNode, MAX_OPTIONS, MIN_OPTIONS,
};
pub use normalize::{normalize, NormalizedCategory, NormalizedLeaf, NormalizedModel};
pub use sheet_name::quote_sheet_name;

/// Absolute tolerance for "weights sum to 100%" checks, matching the
/// tolerance embedded in emitted check formulas.
pub const BALANCE_TOLERANCE: f64 = 0.001;
