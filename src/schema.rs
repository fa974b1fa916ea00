use serde::Serialize;

/// Label of the row that closes the balance-sheet block ("total equity").
pub const EQUITY_TOTAL_LABEL: &str = "סה\"כ הון עצמי";

/// Grand total of liabilities. Redundant with the section totals, never narrated.
pub const LIABILITIES_TOTAL_LABEL: &str = "סה\"כ התחייבויות";

/// Grand total of assets. Redundant with the section totals, never narrated.
pub const ASSETS_TOTAL_LABEL: &str = "סה\"כ נכסים";

/// Prefix carried by every section totals row.
pub const TOTAL_PREFIX: &str = "סה\"כ";

/// Characters dropped from a totals label to get the section name: the prefix plus one separator.
pub const TOTAL_PREFIX_WIDTH: usize = 5;

/// Only this many leading rows are searched for the equity anchor.
pub const ANCHOR_SEARCH_LIMIT: usize = 50;

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Label(String),
    Amount(f64),
    Empty,
}

impl Cell {
    pub fn label(&self) -> Option<&str> {
        match self {
            Cell::Label(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn amount(&self) -> Option<f64> {
        match self {
            Cell::Amount(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Interprets the cell as a year header. Only non-zero whole numbers qualify.
    pub fn as_year(&self) -> Option<i64> {
        match self {
            Cell::Amount(value) if value.is_finite() && value.fract() == 0.0 && *value != 0.0 => {
                Some(*value as i64)
            }
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Label(text.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Amount(value)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::Empty, Cell::Amount)
    }
}

/// Rows of cells exactly as the spreadsheet reader produced them, anchored at A1.
pub type RawGrid = Vec<Vec<Cell>>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub label: Cell,
    /// One cell per selected year, in year order.
    pub cells: Vec<Cell>,
}

impl TableRow {
    pub fn label_text(&self) -> Option<&str> {
        self.label.label()
    }

    pub fn has_label(&self) -> bool {
        self.label_text().is_some_and(|text| !text.is_empty())
    }

    /// The year-1 amount decides section membership.
    pub fn opens_year(&self) -> bool {
        self.cells.first().is_some_and(|cell| !cell.is_empty())
    }

    pub fn is_total(&self) -> bool {
        self.label_text()
            .is_some_and(|text| text.starts_with(TOTAL_PREFIX))
    }
}

/// The balance-sheet block trimmed to its anchor rows and selected years.
///
/// `rows[0]` is the filtered header row; the last row is always the equity anchor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTable {
    pub years: Vec<i64>,
    pub rows: Vec<TableRow>,
}

impl NormalizedTable {
    /// Row count including the header row.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn year_count(&self) -> usize {
        self.years.len()
    }

    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first()
    }

    pub fn year_labels(&self) -> Vec<String> {
        self.years.iter().map(|year| year.to_string()).collect()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
