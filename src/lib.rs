//! # Balance Sheet Narrative
//!
//! Turns a balance sheet spreadsheet into a Hebrew narrative describing how each
//! section moved from year to year and which line item drove each change.
//!
//! ## Pipeline
//!
//! - **Ingestion**: a worksheet is read into a grid of [`Cell`]s anchored at A1
//! - **Normalization**: the grid is trimmed to the block ending at the "total equity"
//!   row, restricted to the selected years, with the grand totals removed
//! - **Narration**: the table is split into sections; each multi-line section gets a
//!   composition sentence and a trend paragraph, the equity row gets one sentence per year
//! - **Output**: the text is written to a right-to-left Word document
//!
//! ## Example
//!
//! ```rust,ignore
//! use balance_sheet_narrative::*;
//!
//! let grid = read_grid("balance_sheet.xlsx", None)?;
//! let text = narrate_balance_sheet(&grid, None, None)?;
//! write_docx(&text, Some("analysis"))?;
//! ```

pub mod config;
pub mod docx;
pub mod error;
pub mod ingestion;
pub mod logging;
pub mod narrative;
pub mod normalizer;
pub mod schema;
pub mod update;
pub mod utils;

pub use config::{AppConfig, ReportOptions};
pub use docx::write_docx;
pub use error::{NarrativeError, Result};
pub use ingestion::read_grid;
pub use narrative::generate;
pub use normalizer::normalize;
pub use schema::*;
pub use utils::*;

use log::{debug, info};
use std::path::PathBuf;

pub struct BalanceSheetNarrator;

impl BalanceSheetNarrator {
    /// Normalizes the grid and narrates the resulting table.
    pub fn process(
        grid: &[Vec<Cell>],
        first_year: Option<i64>,
        last_year: Option<i64>,
    ) -> Result<String> {
        let table = normalize(grid, first_year, last_year)?;
        debug!("Normalized table:\n{}", table.to_json()?);

        let text = generate(&table)?;
        debug!("Generated narrative of {} characters", text.chars().count());

        Ok(text)
    }

    /// Full run: read the worksheet, narrate it and save the document.
    pub fn run(options: &ReportOptions) -> Result<PathBuf> {
        info!("Analyzing input file: {}", options.input.display());
        info!("Output will be saved to: {}", options.output_path().display());

        let grid = read_grid(&options.input, options.sheet.as_deref())?;
        let text = Self::process(&grid, options.first_year, options.last_year)?;
        let path = write_docx(&text, options.output.as_deref())?;

        debug!("Analysis completed successfully.");
        Ok(path)
    }
}

pub fn narrate_balance_sheet(
    grid: &[Vec<Cell>],
    first_year: Option<i64>,
    last_year: Option<i64>,
) -> Result<String> {
    BalanceSheetNarrator::process(grid, first_year, last_year)
}

/// Profit and loss analysis. The worksheet is read so input problems are reported
/// as usual, but no profit and loss narrator exists yet.
pub fn run_profit_and_loss(options: &ReportOptions) -> Result<PathBuf> {
    info!("Analyzing input file: {}", options.input.display());

    let grid = read_grid(&options.input, options.sheet.as_deref())?;
    debug!("Read {} row(s) for profit and loss analysis", grid.len());

    Err(NarrativeError::UnsupportedStatement(
        "profit and loss analysis is not available".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: Option<&str>, amounts: &[Option<f64>]) -> Vec<Cell> {
        let mut cells = vec![label.map_or(Cell::Empty, Cell::from)];
        cells.extend(amounts.iter().map(|amount| Cell::from(*amount)));
        cells
    }

    #[test]
    fn test_end_to_end_two_years() {
        let grid = vec![
            row(None, &[Some(2022.0), Some(2023.0)]),
            row(Some("מזומנים"), &[Some(40.0), Some(90.0)]),
            row(Some("מלאי"), &[Some(60.0), Some(55.0)]),
            row(Some("סה\"כ נכסים שוטפים"), &[Some(100.0), Some(145.0)]),
            row(None, &[None, None]),
            row(Some(EQUITY_TOTAL_LABEL), &[Some(30.0), Some(35.0)]),
        ];

        let text = narrate_balance_sheet(&grid, None, None).unwrap();

        let growth = text
            .find("הנכסים שוטפים של החברה גדלו לסך של כ-\u{200E} 145\u{200E}")
            .unwrap();
        let equity = text
            .find("ההון העצמי של החברה הסתכם לסך של כ-\u{200E} \u{200E}35\u{200E}")
            .unwrap();
        assert!(growth < equity);
        assert!(text.contains("בסעיף מזומנים"));

        let sections: Vec<&str> = text.split("\n \n").collect();
        assert_eq!(sections.len(), 3);
        assert!(sections[0].contains("גדלו"));
        assert!(sections[1].contains("ההון העצמי"));
    }

    #[test]
    fn test_errors_propagate_unchanged() {
        let grid = vec![
            row(None, &[Some(2022.0), Some(2023.0)]),
            row(Some("מזומנים"), &[Some(1.0), Some(2.0)]),
        ];

        assert!(matches!(
            narrate_balance_sheet(&grid, None, None),
            Err(NarrativeError::SchemaNotFound { .. })
        ));
    }
}
