//! Workbook assembly.
//!
//! `compile` turns one request into the six sheet grids; the render step is
//! the only code that touches the binary serializer. Tests assert against
//! the grids, not the container bytes.

use std::io::{Seek, Write};

use rust_xlsxwriter::{
    ConditionalFormat3ColorScale, Format, FormatAlign, FormatBorder, Workbook, Worksheet,
    XlsxError,
};

use factor_model::{normalize, CellStyle, CellValue, Color, CompileRequest, HAlign, SheetGrid};

use crate::layout::plan_layouts;
use crate::sheets::{
    build_definitions, build_input, build_overview, build_results, build_scores, build_weights,
    SHEET_WEIGHTS,
};

/// Failures while serializing a compiled workbook.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("workbook serialization failed: {0}")]
    Xlsx(#[from] XlsxError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Compile one request into the six sheets, in workbook order.
pub fn compile(request: &CompileRequest) -> Vec<SheetGrid> {
    let model = normalize(&request.model);
    let layouts = plan_layouts(&model, request.clamped_option_count());
    vec![
        build_overview(&model, request),
        build_weights(&model, &layouts.weights),
        build_input(&model, &layouts, request),
        build_scores(&model, &layouts, request),
        build_results(&layouts, request),
        build_definitions(&model),
    ]
}

/// Download filename derived from the model title: ASCII letters, digits and
/// spaces survive, runs of whitespace become one hyphen.
pub fn output_file_name(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let slug = kept.split_whitespace().collect::<Vec<_>>().join("-");
    if slug.is_empty() {
        "weighted-factor-model.xlsx".to_string()
    } else {
        format!("{slug}.xlsx")
    }
}

/// Compile and serialize to an in-memory xlsx container.
pub fn export_to_vec(request: &CompileRequest) -> Result<Vec<u8>, ExportError> {
    let mut workbook = render(&compile(request))?;
    Ok(workbook.save_to_buffer()?)
}

/// Compile and serialize to a writer.
pub fn export_to_writer<W: Write + Seek + Send>(
    request: &CompileRequest,
    writer: W,
) -> Result<(), ExportError> {
    let mut workbook = render(&compile(request))?;
    workbook.save_to_writer(writer)?;
    Ok(())
}

fn render(sheets: &[SheetGrid]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    for grid in sheets {
        let worksheet = workbook.add_worksheet();
        render_sheet(worksheet, grid)?;
        if grid.name == SHEET_WEIGHTS {
            worksheet.set_active(true);
        }
    }
    Ok(workbook)
}

fn render_sheet(worksheet: &mut Worksheet, grid: &SheetGrid) -> Result<(), XlsxError> {
    worksheet.set_name(&grid.name)?;
    if let Some(color) = grid.tab_color {
        worksheet.set_tab_color(xlsx_color(color));
    }

    // Merges first; the serializer wants the anchor content written after
    // the range is declared, so the anchor cell is rewritten below.
    for merge in &grid.merges {
        let format = grid
            .cell(merge.first_row, merge.first_col)
            .map(|cell| format_for(&cell.style))
            .unwrap_or_default();
        worksheet.merge_range(
            merge.first_row,
            merge.first_col,
            merge.last_row,
            merge.last_col,
            "",
            &format,
        )?;
    }

    for (row, col, cell) in grid.iter_cells() {
        let format = format_for(&cell.style);
        match &cell.value {
            CellValue::Blank => {
                worksheet.write_blank(row, col, &format)?;
            }
            CellValue::Text(text) => {
                worksheet.write_string_with_format(row, col, text, &format)?;
            }
            CellValue::Number(value) => {
                worksheet.write_number_with_format(row, col, *value, &format)?;
            }
            CellValue::Formula(formula) => {
                worksheet.write_formula_with_format(row, col, formula.as_str(), &format)?;
            }
        }
    }

    for &(col, width) in &grid.col_widths {
        worksheet.set_column_width(col, width)?;
    }
    if let Some((rows, cols)) = grid.freeze_panes {
        worksheet.set_freeze_panes(rows, cols)?;
    }
    for scale in &grid.color_scales {
        // Anchors stay at the defaults (range minimum, 50th percentile,
        // range maximum); only the colors change.
        let format = ConditionalFormat3ColorScale::new()
            .set_minimum_color(xlsx_color(scale.min_color))
            .set_midpoint_color(xlsx_color(scale.mid_color))
            .set_maximum_color(xlsx_color(scale.max_color));
        worksheet.add_conditional_format(
            scale.first_row,
            scale.first_col,
            scale.last_row,
            scale.last_col,
            &format,
        )?;
    }
    Ok(())
}

fn xlsx_color(color: Color) -> rust_xlsxwriter::Color {
    rust_xlsxwriter::Color::RGB(color.0)
}

fn format_for(style: &CellStyle) -> Format {
    let mut format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_border_color(rust_xlsxwriter::Color::RGB(0xE2E8F0))
        .set_align(FormatAlign::VerticalCenter);
    if let Some(size) = style.font_size {
        format = format.set_font_size(size);
    }
    if style.bold {
        format = format.set_bold();
    }
    if style.italic {
        format = format.set_italic();
    }
    if let Some(color) = style.font_color {
        format = format.set_font_color(xlsx_color(color));
    }
    if let Some(fill) = style.fill {
        format = format.set_background_color(xlsx_color(fill));
    }
    if let Some(num_format) = &style.num_format {
        format = format.set_num_format(num_format);
    }
    format = match style.align {
        HAlign::Left => format.set_align(FormatAlign::Left),
        HAlign::Center => format.set_align(FormatAlign::Center),
        HAlign::Right => format.set_align(FormatAlign::Right),
    };
    if style.wrap {
        format = format.set_text_wrap();
    }
    format
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn file_name_keeps_alphanumerics_and_hyphenates_spaces() {
        assert_eq!(output_file_name("Career Options 2026"), "Career-Options-2026.xlsx");
        assert_eq!(output_file_name("  spaced   out  "), "spaced-out.xlsx");
        assert_eq!(output_file_name("Où habiter? (v2)"), "O-habiter-v2.xlsx");
    }

    #[test]
    fn file_name_falls_back_when_nothing_survives() {
        assert_eq!(output_file_name(""), "weighted-factor-model.xlsx");
        assert_eq!(output_file_name("???"), "weighted-factor-model.xlsx");
    }
}
