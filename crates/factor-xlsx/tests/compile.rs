//! End-to-end checks over the compiled sheet grids: exact coordinates and
//! formula text for a representative model, plus degenerate-model behavior.

use pretty_assertions::assert_eq;

use factor_model::{CellValue, CompileRequest, LeafNode, WeightModel, WeightNode};
use factor_xlsx::compile;

fn leaf(name: &str, weight: u32) -> LeafNode {
    LeafNode {
        name: name.to_string(),
        weight,
        ..Default::default()
    }
}

fn category(name: &str, weight: u32, children: Vec<LeafNode>) -> WeightNode {
    WeightNode {
        name: name.to_string(),
        weight,
        subdivided: !children.is_empty(),
        children,
        ..Default::default()
    }
}

/// Cost {Rent, Food, Travel} and Quality {Build, Support} decomposed,
/// Risk single-column, eight options.
fn request() -> CompileRequest {
    CompileRequest {
        title: "Relocation 2026".to_string(),
        description: "Where to move next year.".to_string(),
        model: WeightModel::new(vec![
            category(
                "Cost",
                50,
                vec![leaf("Rent", 30), leaf("Food", 30), leaf("Travel", 40)],
            ),
            category("Risk", 20, vec![]),
            category(
                "Quality",
                30,
                vec![leaf("Build", 50), leaf("Support", 50)],
            ),
        ]),
        option_count: 8,
        option_names: vec!["Lisbon".to_string(), "Berlin".to_string()],
    }
}

fn formula_at(sheets: &[factor_model::SheetGrid], sheet: &str, row: u32, col: u16) -> String {
    sheets
        .iter()
        .find(|g| g.name == sheet)
        .and_then(|g| g.cell(row, col))
        .and_then(|c| c.value.as_formula())
        .unwrap_or_else(|| panic!("no formula at {sheet}!({row},{col})"))
        .to_string()
}

#[test]
fn workbook_has_six_sheets_in_order() {
    let sheets = compile(&request());
    let names: Vec<&str> = sheets.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Overview", "Weights", "Input", "Scores", "Results", "Definitions"]
    );
}

#[test]
fn weights_sheet_emits_effective_weights_and_checks() {
    let sheets = compile(&request());
    // First Cost leaf: category share times sibling share.
    assert_eq!(
        formula_at(&sheets, "Weights", 4, 4),
        "IFERROR(B5*(D5/SUM(D5:D7)),0)"
    );
    // The implicit Risk leaf still gets the guard, over its one-row range.
    assert_eq!(
        formula_at(&sheets, "Weights", 7, 4),
        "IFERROR(B8*(D8/SUM(D8:D8)),0)"
    );
    assert_eq!(
        formula_at(&sheets, "Weights", 4, 5),
        "IF(SUM(D5:D7)=0,\"Empty\",IF(ABS(SUM(D5:D7)-1)<0.001,\"OK\",\
         \"Sum: \"&TEXT(SUM(D5:D7),\"0%\")))"
    );
    // TOTAL CHECK row sits one gap row under the last block.
    assert_eq!(formula_at(&sheets, "Weights", 11, 1), "B5+B8+B9");
    assert_eq!(
        formula_at(&sheets, "Weights", 11, 5),
        "IF(ABS(B5+B8+B9-1)<0.001,\"All weights balanced\",\
         \"Category weights sum to \"&TEXT(B5+B8+B9,\"0%\")&\" (need 100%)\")"
    );
}

#[test]
fn scores_sheet_standardizes_against_input_columns() {
    let sheets = compile(&request());
    // First Cost leaf on Scores is column D; its raw column on Input is B.
    assert_eq!(
        formula_at(&sheets, "Scores", 9, 3),
        "IFERROR((Input!B10-AVERAGE(Input!B10:B17))/STDEV(Input!B10:B17),0)"
    );
    // Cost aggregate weights the three leaf scores by the criterion cells.
    assert_eq!(
        formula_at(&sheets, "Scores", 9, 6),
        "IFERROR((D10*Weights!D5+E10*Weights!D6+F10*Weights!D7)/SUM(Weights!D5:D7),0)"
    );
    // Total weights the category score columns (aggregate for decomposed,
    // sole leaf for single-column Risk) by the raw category weights.
    assert_eq!(
        formula_at(&sheets, "Scores", 9, 1),
        "IFERROR((G10*Weights!B5+H10*Weights!B8+K10*Weights!B9)/\
         (Weights!B5+Weights!B8+Weights!B9),0)"
    );
    // Rank fills down with row-anchored bounds.
    assert_eq!(
        formula_at(&sheets, "Scores", 9, 2),
        "IFERROR(RANK(B10,B$10:B$17,0),0)"
    );
    assert_eq!(
        formula_at(&sheets, "Scores", 16, 2),
        "IFERROR(RANK(B17,B$10:B$17,0),0)"
    );
}

#[test]
fn results_sheet_looks_up_options_by_rank() {
    let sheets = compile(&request());
    assert_eq!(
        formula_at(&sheets, "Results", 4, 1),
        "IFERROR(INDEX(Scores!$A$10:$A$17,MATCH(A5,Scores!$C$10:$C$17,0)),\"\")"
    );
    assert_eq!(
        formula_at(&sheets, "Results", 4, 2),
        "IFERROR(INDEX(Scores!$B$10:$B$17,MATCH(A5,Scores!$C$10:$C$17,0)),0)"
    );
    // Rank numbers are literals 1..=N.
    let results = sheets.iter().find(|g| g.name == "Results").unwrap();
    assert_eq!(results.cell(4, 0).unwrap().value, CellValue::Number(1.0));
    assert_eq!(results.cell(11, 0).unwrap().value, CellValue::Number(8.0));
}

#[test]
fn input_sheet_has_editable_cells_and_raw_aggregates() {
    let sheets = compile(&request());
    let input = sheets.iter().find(|g| g.name == "Input").unwrap();
    // Leaf cells are styled blanks awaiting data entry.
    assert_eq!(input.cell(9, 1).unwrap().value, CellValue::Blank);
    // The aggregate column averages the raw values, not z-scores.
    assert_eq!(
        formula_at(&sheets, "Input", 9, 4),
        "IFERROR((B10*Weights!D5+C10*Weights!D6+D10*Weights!D7)/SUM(Weights!D5:D7),0)"
    );
    // Supplied names first, then generated ones.
    assert_eq!(input.cell(9, 0).unwrap().value.as_text(), Some("Lisbon"));
    assert_eq!(input.cell(11, 0).unwrap().value.as_text(), Some("Option 3"));
}

#[test]
fn every_division_is_guarded() {
    for grid in compile(&request()) {
        for (row, col, cell) in grid.iter_cells() {
            if let Some(formula) = cell.value.as_formula() {
                if formula.contains('/') {
                    assert!(
                        formula.starts_with("IFERROR("),
                        "unguarded division at {}!({row},{col}): {formula}",
                        grid.name
                    );
                }
            }
        }
    }
}

#[test]
fn json_request_compiles_like_the_built_one() {
    // The request arrives over an IPC boundary as JSON in practice.
    let json = r#"{
        "title": "Relocation 2026",
        "description": "Where to move next year.",
        "model": [
            {"name": "Cost", "weight": 50, "subdivided": true, "children": [
                {"name": "Rent", "weight": 30},
                {"name": "Food", "weight": 30},
                {"name": "Travel", "weight": 40}
            ]},
            {"name": "Risk", "weight": 20},
            {"name": "Quality", "weight": 30, "subdivided": true, "children": [
                {"name": "Build", "weight": 50},
                {"name": "Support", "weight": 50}
            ]}
        ],
        "option_count": 8,
        "option_names": ["Lisbon", "Berlin"]
    }"#;
    let parsed: CompileRequest = serde_json::from_str(json).unwrap();
    assert_eq!(compile(&parsed), compile(&request()));
}

#[test]
fn recompiling_the_same_request_is_deterministic() {
    let request = request();
    assert_eq!(compile(&request), compile(&request));
}

#[test]
fn option_count_is_clamped_not_rejected() {
    let mut request = request();
    request.option_count = 1;
    let sheets = compile(&request);
    let scores = sheets.iter().find(|g| g.name == "Scores").unwrap();
    assert!(scores.cell(10, 2).is_some(), "second option row missing");
    assert!(scores.cell(11, 2).is_none(), "clamp to two options failed");
}

#[test]
fn empty_model_degrades_to_constants() {
    let request = CompileRequest {
        title: String::new(),
        description: String::new(),
        model: WeightModel::default(),
        option_count: 4,
        option_names: Vec::new(),
    };
    let sheets = compile(&request);
    let weights = sheets.iter().find(|g| g.name == "Weights").unwrap();
    // total_row = first data row + 1 with zero blocks.
    assert_eq!(weights.cell(5, 1).unwrap().value, CellValue::Number(0.0));
    assert_eq!(weights.cell(5, 5).unwrap().value.as_text(), Some("Empty"));
    let scores = sheets.iter().find(|g| g.name == "Scores").unwrap();
    assert_eq!(scores.cell(9, 1).unwrap().value, CellValue::Number(0.0));
}
