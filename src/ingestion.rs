use crate::error::{NarrativeError, Result};
use crate::schema::{Cell, RawGrid};
use calamine::{open_workbook_auto, Data, Range, Reader};
use log::{debug, info};
use std::path::Path;

/// Reads one worksheet into a grid anchored at cell A1.
///
/// Uses the named sheet when given, otherwise the first sheet of the workbook.
pub fn read_grid(path: impl AsRef<Path>, sheet_name: Option<&str>) -> Result<RawGrid> {
    let path = path.as_ref();
    info!("Reading spreadsheet: {}", path.display());

    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names();
    debug!("Workbook sheets: {:?}", sheet_names);

    let range = match sheet_name {
        Some(name) => {
            if !sheet_names.iter().any(|sheet| sheet == name) {
                return Err(NarrativeError::SheetNotFound(name.to_string()));
            }
            workbook.worksheet_range(name)?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or(NarrativeError::EmptyWorkbook)??,
    };

    let grid = grid_from_range(&range);
    debug!("Read {} row(s) from worksheet", grid.len());

    Ok(grid)
}

/// Converts a calamine range into rows of cells, restoring the empty rows and columns
/// that precede the used range so indices line up with the sheet.
pub fn grid_from_range(range: &Range<Data>) -> RawGrid {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };
    let start_row = start_row as usize;
    let start_col = start_col as usize;
    let width = start_col + range.width();

    let mut grid: RawGrid = vec![vec![Cell::Empty; width]; start_row];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col];
        cells.extend(row.iter().map(Cell::from));
        grid.push(cells);
    }

    grid
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Float(value) => Cell::Amount(*value),
            Data::Int(value) => Cell::Amount(*value as f64),
            Data::String(text) if text.is_empty() => Cell::Empty,
            Data::String(text) => Cell::Label(text.clone()),
            Data::Bool(value) => Cell::Label(value.to_string()),
            Data::DateTime(value) => Cell::Label(value.to_string()),
            Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Label(text.clone()),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}
