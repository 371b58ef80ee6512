//! The six sheet builders.
//!
//! Each builder is a pure function from (normalized tree, layout set,
//! request) to a [`factor_model::SheetGrid`]. Builders never raise on an
//! empty or unbalanced model; degenerate formulas are emitted as guarded
//! constants instead.

mod band;
mod definitions;
mod input;
mod overview;
mod results;
mod scores;
mod weights;

pub use definitions::build_definitions;
pub use input::build_input;
pub use overview::build_overview;
pub use results::build_results;
pub use scores::build_scores;
pub use weights::build_weights;

/// Fixed sheet names, in workbook order.
pub const SHEET_OVERVIEW: &str = "Overview";
pub const SHEET_WEIGHTS: &str = "Weights";
pub const SHEET_INPUT: &str = "Input";
pub const SHEET_SCORES: &str = "Scores";
pub const SHEET_RESULTS: &str = "Results";
pub const SHEET_DEFINITIONS: &str = "Definitions";
