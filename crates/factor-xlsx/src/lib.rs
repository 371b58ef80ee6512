//! Compiles a weighted decision model into a self-contained spreadsheet
//! workbook. The output is six sheets wired together with live cross-sheet
//! formulas: edit a weight or a raw value in the saved file and the scores,
//! ranks, and results reorder themselves with no further involvement from
//! this crate.
//!
//! The pipeline is normalize → plan layout → emit formulas → build sheet
//! grids → serialize. Everything before the final step is pure data, so
//! tests pin exact cell coordinates and formula text.

pub mod formula;
pub mod layout;
pub mod sheets;
pub mod style;
mod workbook;

pub use workbook::{compile, export_to_vec, export_to_writer, output_file_name, ExportError};
