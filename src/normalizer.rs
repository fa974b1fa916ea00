use crate::error::{NarrativeError, Result};
use crate::schema::{
    Cell, NormalizedTable, TableRow, ANCHOR_SEARCH_LIMIT, ASSETS_TOTAL_LABEL, EQUITY_TOTAL_LABEL,
    LIABILITIES_TOTAL_LABEL,
};
use log::{debug, info};

/// Trims a raw grid down to the balance-sheet block.
///
/// The block runs from the header row to the "total equity" anchor row (inclusive).
/// Year columns are kept while the header holds whole-number years, restricted to
/// `first_year..=last_year` when given. The grand-total asset and liability rows are dropped.
pub fn normalize(
    grid: &[Vec<Cell>],
    first_year: Option<i64>,
    last_year: Option<i64>,
) -> Result<NormalizedTable> {
    let anchor = find_anchor_row(grid)?;
    let header = &grid[0];

    let (first_col, cols) = select_year_columns(header, first_year, last_year);
    if first_col >= cols {
        return Err(NarrativeError::EmptyYearRange {
            first_year,
            last_year,
        });
    }

    let years: Vec<i64> = header[first_col..cols]
        .iter()
        .filter_map(Cell::as_year)
        .collect();

    debug!(
        "Anchor row at index {}, year columns {}..{} ({:?})",
        anchor, first_col, cols, years
    );

    let mut rows: Vec<TableRow> = grid[..=anchor]
        .iter()
        .map(|row| trim_row(row, first_col, cols))
        .collect();

    let before = rows.len();
    rows.retain(|row| !is_grand_total(row));
    if rows.len() != before {
        debug!("Removed {} grand total row(s)", before - rows.len());
    }

    info!(
        "Normalized balance sheet: {} rows, {} year(s)",
        rows.len(),
        years.len()
    );

    Ok(NormalizedTable { years, rows })
}

/// Index of the first row labelled with the equity marker among the leading rows.
pub fn find_anchor_row(grid: &[Vec<Cell>]) -> Result<usize> {
    grid.iter()
        .take(ANCHOR_SEARCH_LIMIT)
        .position(|row| {
            row.first()
                .and_then(Cell::label)
                .is_some_and(|label| label == EQUITY_TOTAL_LABEL)
        })
        .ok_or_else(|| NarrativeError::SchemaNotFound {
            marker: EQUITY_TOTAL_LABEL.to_string(),
            searched: grid.len().min(ANCHOR_SEARCH_LIMIT),
        })
}

/// Returns `(first_col, cols)`, the half-open column range of the selected years.
///
/// The scan starts at column 1 and stops at the first cell that is not a whole-number
/// year, or at the first year past `last_year`. Years before `first_year` push
/// `first_col` forward.
pub fn select_year_columns(
    header: &[Cell],
    first_year: Option<i64>,
    last_year: Option<i64>,
) -> (usize, usize) {
    let mut first_col = 1;
    let mut cols = 1;

    while let Some(year) = header.get(cols).and_then(Cell::as_year) {
        if last_year.is_some_and(|last| year > last) {
            break;
        }
        if first_year.is_some_and(|first| year < first) {
            first_col += 1;
        }
        cols += 1;
    }

    (first_col, cols)
}

fn trim_row(row: &[Cell], first_col: usize, cols: usize) -> TableRow {
    TableRow {
        label: row.first().cloned().unwrap_or(Cell::Empty),
        cells: (first_col..cols)
            .map(|col| row.get(col).cloned().unwrap_or(Cell::Empty))
            .collect(),
    }
}

fn is_grand_total(row: &TableRow) -> bool {
    matches!(
        row.label_text(),
        Some(LIABILITIES_TOTAL_LABEL) | Some(ASSETS_TOTAL_LABEL)
    )
}
