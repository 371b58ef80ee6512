//! Formula emitter.
//!
//! Pure translation from coordinates to formula text. Every numeric formula
//! routes through one divide-guard combinator so a zero-weight or
//! zero-variance configuration degrades to 0 instead of propagating a
//! native formula error into dependent cells. Emitters only consume
//! coordinates handed to them; they never recompute layout.

use factor_model::{quote_sheet_name, CellRef};

/// Wrap a numeric expression in the uniform divide guard.
pub fn div_guard(expr: &str) -> String {
    format!("IFERROR({expr},0)")
}

/// The divide guard with a text fallback, for lookup cells whose value is a
/// display string rather than a score.
pub fn text_guard(expr: &str) -> String {
    format!("IFERROR({expr},\"\")")
}

/// Renders sheet-qualified references for cross-sheet formulas.
#[derive(Copy, Clone, Debug)]
pub struct SheetRef<'a> {
    name: &'a str,
}

impl<'a> SheetRef<'a> {
    pub fn new(name: &'a str) -> Self {
        Self { name }
    }

    /// `Weights!B5`
    pub fn cell(&self, at: CellRef) -> String {
        format!("{}!{}", quote_sheet_name(self.name), at.to_a1())
    }

    /// `Scores!$A$10`
    pub fn cell_abs(&self, at: CellRef) -> String {
        format!("{}!{}", quote_sheet_name(self.name), at.to_a1_abs())
    }

    /// `Input!B10:B17`
    pub fn range(&self, first: CellRef, last: CellRef) -> String {
        format!(
            "{}!{}:{}",
            quote_sheet_name(self.name),
            first.to_a1(),
            last.to_a1()
        )
    }

    /// `Scores!$A$10:$A$17`
    pub fn range_abs(&self, first: CellRef, last: CellRef) -> String {
        format!(
            "{}!{}:{}",
            quote_sheet_name(self.name),
            first.to_a1_abs(),
            last.to_a1_abs()
        )
    }
}

/// A same-sheet range like `D5:D9`.
pub fn local_range(first: CellRef, last: CellRef) -> String {
    format!("{}:{}", first.to_a1(), last.to_a1())
}

/// Effective weight of one leaf, all references local to the weights sheet:
/// category share × leaf share of the sibling sum.
///
/// `IFERROR(B5*(D7/SUM(D5:D9)),0)`
pub fn effective_weight(
    category_weight: CellRef,
    leaf_weight: CellRef,
    siblings: (CellRef, CellRef),
) -> String {
    let range = local_range(siblings.0, siblings.1);
    div_guard(&format!(
        "{}*({}/SUM({range}))",
        category_weight.to_a1(),
        leaf_weight.to_a1()
    ))
}

/// Textual balance check over one category's sibling weights: `Empty` when
/// the block sums to 0, `OK` within the 0.001 tolerance of 100%, otherwise
/// the actual percentage.
pub fn sibling_check(siblings: (CellRef, CellRef)) -> String {
    let range = local_range(siblings.0, siblings.1);
    format!(
        "IF(SUM({range})=0,\"Empty\",IF(ABS(SUM({range})-1)<0.001,\"OK\",\
         \"Sum: \"&TEXT(SUM({range}),\"0%\")))"
    )
}

/// Sum of the category-weight anchor cells (`B5+B10+...`); `None` when the
/// model has no categories (callers write a literal 0 instead).
pub fn category_weight_sum(cells: &[CellRef]) -> Option<String> {
    if cells.is_empty() {
        return None;
    }
    Some(
        cells
            .iter()
            .map(|c| c.to_a1())
            .collect::<Vec<_>>()
            .join("+"),
    )
}

/// Top-level balance check for the TOTAL CHECK row.
pub fn total_check(cells: &[CellRef]) -> Option<String> {
    let sum = category_weight_sum(cells)?;
    Some(format!(
        "IF(ABS({sum}-1)<0.001,\"All weights balanced\",\
         \"Category weights sum to \"&TEXT({sum},\"0%\")&\" (need 100%)\")"
    ))
}

/// Per-option normalized score for one leaf: the raw value standardized
/// against the raw column for that leaf across all options.
///
/// `IFERROR((Input!B10-AVERAGE(Input!B10:B17))/STDEV(Input!B10:B17),0)`
pub fn zscore(input: SheetRef<'_>, raw: CellRef, column: (CellRef, CellRef)) -> String {
    let range = input.range(column.0, column.1);
    div_guard(&format!(
        "({}-AVERAGE({range}))/STDEV({range})",
        input.cell(raw)
    ))
}

/// Category aggregate: weighted average of the category's leaf cells (local
/// to the emitting sheet) using the criterion-weight cells on the weights
/// sheet, self-normalized by the sibling weight sum.
///
/// `IFERROR((D10*Weights!D5+E10*Weights!D6)/SUM(Weights!D5:D6),0)`
pub fn category_score(
    leaf_cells: &[CellRef],
    weights: SheetRef<'_>,
    leaf_weight_range: (CellRef, CellRef),
) -> String {
    let parts: Vec<String> = leaf_cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let weight = CellRef::new(leaf_weight_range.0.row + i as u32, leaf_weight_range.0.col);
            format!("{}*{}", cell.to_a1(), weights.cell(weight))
        })
        .collect();
    let denom = weights.range(leaf_weight_range.0, leaf_weight_range.1);
    div_guard(&format!("({})/SUM({denom})", parts.join("+")))
}

/// Total score: weighted average of all category score cells (local) using
/// the raw category-weight cells, self-normalized against an unbalanced
/// top-level total. `None` when the model has no categories.
///
/// `IFERROR((F10*Weights!B5+G10*Weights!B7)/(Weights!B5+Weights!B7),0)`
pub fn total_score(
    score_cells: &[CellRef],
    weights: SheetRef<'_>,
    category_weight_cells: &[CellRef],
) -> Option<String> {
    if score_cells.is_empty() {
        return None;
    }
    debug_assert_eq!(score_cells.len(), category_weight_cells.len());
    let parts: Vec<String> = score_cells
        .iter()
        .zip(category_weight_cells)
        .map(|(cell, weight)| format!("{}*{}", cell.to_a1(), weights.cell(*weight)))
        .collect();
    let denom: Vec<String> = category_weight_cells
        .iter()
        .map(|weight| weights.cell(*weight))
        .collect();
    Some(div_guard(&format!(
        "({})/({})",
        parts.join("+"),
        denom.join("+")
    )))
}

/// Descending competition rank of one total-score cell within its own
/// column (rows anchored so the formula fills down unchanged).
///
/// `IFERROR(RANK(B10,B$10:B$17,0),0)`
pub fn rank(total: CellRef, column: (CellRef, CellRef)) -> String {
    div_guard(&format!(
        "RANK({},{}:{},0)",
        total.to_a1(),
        column.0.to_a1_abs_row(),
        column.1.to_a1_abs_row()
    ))
}

/// Results-sheet reverse lookup: the option name whose scored-sheet rank
/// equals the value of `rank_cell` (local). Blank when no option holds that
/// rank (skipped ranks after a tie).
///
/// `IFERROR(INDEX(Scores!$A$10:$A$17,MATCH(A5,Scores!$C$10:$C$17,0)),"")`
pub fn result_name_lookup(
    scores: SheetRef<'_>,
    rank_cell: CellRef,
    name_column: (CellRef, CellRef),
    rank_column: (CellRef, CellRef),
) -> String {
    text_guard(&format!(
        "INDEX({},MATCH({},{},0))",
        scores.range_abs(name_column.0, name_column.1),
        rank_cell.to_a1(),
        scores.range_abs(rank_column.0, rank_column.1)
    ))
}

/// Results-sheet reverse lookup for the total score at one rank.
pub fn result_score_lookup(
    scores: SheetRef<'_>,
    rank_cell: CellRef,
    total_column: (CellRef, CellRef),
    rank_column: (CellRef, CellRef),
) -> String {
    div_guard(&format!(
        "INDEX({},MATCH({},{},0))",
        scores.range_abs(total_column.0, total_column.1),
        rank_cell.to_a1(),
        scores.range_abs(rank_column.0, rank_column.1)
    ))
}

/// Reference implementation of the rank convention the emitted `RANK`
/// formula uses: descending competition ranking. Ties share a rank and the
/// next distinct value skips by the tie count.
pub fn competition_ranks(totals: &[f64]) -> Vec<usize> {
    totals
        .iter()
        .map(|&x| 1 + totals.iter().filter(|&&y| y > x).count())
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn c(row: u32, col: u16) -> CellRef {
        CellRef::new(row, col)
    }

    #[test]
    fn effective_weight_matches_layout_contract() {
        let formula = effective_weight(c(4, 1), c(6, 3), (c(4, 3), c(8, 3)));
        assert_eq!(formula, "IFERROR(B5*(D7/SUM(D5:D9)),0)");
    }

    #[test]
    fn sibling_check_reports_empty_ok_or_sum() {
        let formula = sibling_check((c(4, 3), c(8, 3)));
        assert_eq!(
            formula,
            "IF(SUM(D5:D9)=0,\"Empty\",IF(ABS(SUM(D5:D9)-1)<0.001,\"OK\",\
             \"Sum: \"&TEXT(SUM(D5:D9),\"0%\")))"
        );
    }

    #[test]
    fn total_check_uses_the_balance_tolerance() {
        let formula = total_check(&[c(4, 1), c(9, 1)]).unwrap();
        assert_eq!(
            formula,
            "IF(ABS(B5+B10-1)<0.001,\"All weights balanced\",\
             \"Category weights sum to \"&TEXT(B5+B10,\"0%\")&\" (need 100%)\")"
        );
        assert_eq!(total_check(&[]), None);
    }

    #[test]
    fn zscore_population_is_one_leaf_column_across_all_options() {
        let input = SheetRef::new("Input");
        let formula = zscore(input, c(9, 1), (c(9, 1), c(16, 1)));
        assert_eq!(
            formula,
            "IFERROR((Input!B10-AVERAGE(Input!B10:B17))/STDEV(Input!B10:B17),0)"
        );
    }

    #[test]
    fn category_score_zips_leaf_cells_with_weight_rows() {
        let weights = SheetRef::new("Weights");
        let formula = category_score(&[c(9, 3), c(9, 4)], weights, (c(4, 3), c(5, 3)));
        assert_eq!(
            formula,
            "IFERROR((D10*Weights!D5+E10*Weights!D6)/SUM(Weights!D5:D6),0)"
        );
    }

    #[test]
    fn total_score_self_normalizes_by_raw_category_weights() {
        let weights = SheetRef::new("Weights");
        let formula = total_score(&[c(9, 5), c(9, 6)], weights, &[c(4, 1), c(6, 1)]).unwrap();
        assert_eq!(
            formula,
            "IFERROR((F10*Weights!B5+G10*Weights!B7)/(Weights!B5+Weights!B7),0)"
        );
        assert_eq!(total_score(&[], weights, &[]), None);
    }

    #[test]
    fn rank_anchors_rows_only() {
        let formula = rank(c(9, 1), (c(9, 1), c(16, 1)));
        assert_eq!(formula, "IFERROR(RANK(B10,B$10:B$17,0),0)");
    }

    #[test]
    fn result_lookups_reference_the_scored_sheet_rank_column() {
        let scores = SheetRef::new("Scores");
        let name = result_name_lookup(scores, c(4, 0), (c(9, 0), c(16, 0)), (c(9, 2), c(16, 2)));
        assert_eq!(
            name,
            "IFERROR(INDEX(Scores!$A$10:$A$17,MATCH(A5,Scores!$C$10:$C$17,0)),\"\")"
        );
        let score = result_score_lookup(scores, c(4, 0), (c(9, 1), c(16, 1)), (c(9, 2), c(16, 2)));
        assert_eq!(
            score,
            "IFERROR(INDEX(Scores!$B$10:$B$17,MATCH(A5,Scores!$C$10:$C$17,0)),0)"
        );
    }

    #[test]
    fn quoted_sheet_names_flow_through_references() {
        let sheet = SheetRef::new("Raw Data");
        assert_eq!(sheet.cell(c(0, 0)), "'Raw Data'!A1");
        assert_eq!(sheet.range_abs(c(0, 0), c(1, 0)), "'Raw Data'!$A$1:$A$2");
    }

    #[test]
    fn competition_ranks_share_and_skip() {
        assert_eq!(competition_ranks(&[2.0, 3.5, 3.5, 1.0]), vec![3, 1, 1, 4]);
        assert_eq!(competition_ranks(&[1.0, 1.0, 1.0]), vec![1, 1, 1]);
        assert_eq!(competition_ranks(&[]), Vec::<usize>::new());
    }
}
