//! Section splitting and per-section narration of a normalized balance sheet.

pub mod equity;
pub mod phrases;
pub mod trend;

pub use equity::narrate_equity;
pub use trend::{Direction, LineItem, Movement, SectionTrend};

use crate::error::{NarrativeError, Result};
use crate::schema::{Cell, NormalizedTable, TableRow, EQUITY_TOTAL_LABEL};
use crate::utils::{round_amount, strip_total_prefix};
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// A lone equity row. Narrated per year, without attribution.
    Equity,
    /// Line items closed by a totals row.
    MultiLine,
}

/// A contiguous run of rows with a year-1 amount.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    /// The row right before the run: a heading, a blank separator, or the header row.
    pub lead: &'a TableRow,
    pub rows: &'a [TableRow],
    /// Table index of `rows[0]`.
    pub start: usize,
}

impl Section<'_> {
    pub fn kind(&self) -> SectionKind {
        match self.rows {
            [only] if !self.lead.has_label() || only.label_text() == Some(EQUITY_TOTAL_LABEL) => {
                SectionKind::Equity
            }
            _ => SectionKind::MultiLine,
        }
    }
}

/// Narrates every section of the table in order, each followed by a blank line.
pub fn generate(table: &NormalizedTable) -> Result<String> {
    let years = table.year_labels();
    let mut out = String::new();

    for section in split_sections(table) {
        let kind = section.kind();
        debug!(
            "Section at row {} ({} row(s)) classified as {:?}",
            section.start,
            section.rows.len(),
            kind
        );

        let text = match kind {
            SectionKind::Equity => {
                let amounts = row_amounts(&section.rows[0], section.start)?;
                narrate_equity(&amounts, &years)
            }
            SectionKind::MultiLine => narrate_multi_line(&section, &years)?,
        };

        out.push_str(&text);
        out.push_str(phrases::SECTION_SEPARATOR);
    }

    Ok(out)
}

/// Splits the rows after the header into runs with a non-empty year-1 amount.
pub fn split_sections(table: &NormalizedTable) -> Vec<Section<'_>> {
    let rows = &table.rows;
    let mut sections = Vec::new();
    let mut i = 1;

    while i < rows.len() {
        while i < rows.len() && !rows[i].opens_year() {
            i += 1;
        }
        let mut j = i;
        while j < rows.len() && rows[j].opens_year() {
            j += 1;
        }
        if j > i {
            sections.push(Section {
                lead: &rows[i - 1],
                rows: &rows[i..j],
                start: i,
            });
        }
        i = j + 1;
    }

    sections
}

/// Drops trailing rows that still carry the "total" prefix so a subtotal is never
/// blamed for its own change.
pub fn strip_trailing_totals(rows: &[TableRow]) -> &[TableRow] {
    let keep = rows
        .iter()
        .rposition(|row| !row.is_total())
        .map_or(0, |last| last + 1);
    &rows[..keep]
}

/// Rounded amounts of a narrated row. A blank cell reads as zero.
pub fn row_amounts(row: &TableRow, index: usize) -> Result<Vec<i64>> {
    row.cells
        .iter()
        .map(|cell| match cell {
            Cell::Amount(value) => Ok(round_amount(*value)),
            Cell::Empty => Ok(0),
            Cell::Label(text) => Err(NarrativeError::MalformedSection {
                row: index,
                details: format!(
                    "non-numeric amount '{}' in row '{}'",
                    text,
                    row.label_text().unwrap_or_default()
                ),
            }),
        })
        .collect()
}

fn narrate_multi_line(section: &Section<'_>, years: &[String]) -> Result<String> {
    let malformed = |row: usize, details: &str| NarrativeError::MalformedSection {
        row,
        details: details.to_string(),
    };

    let Some((total, items)) = section.rows.split_last() else {
        return Err(malformed(section.start, "empty section"));
    };
    let total_index = section.start + items.len();

    if items.is_empty() {
        return Err(malformed(
            total_index,
            "totals row has no line items above it",
        ));
    }

    let total_label = total
        .label_text()
        .filter(|label| !label.is_empty())
        .ok_or_else(|| malformed(total_index, "totals row has no label"))?;
    if !total.is_total() {
        warn!(
            "Row {} closes a section but is not labelled as a total: '{}'",
            total_index, total_label
        );
    }
    let name = strip_total_prefix(total_label);

    let item_labels = items
        .iter()
        .enumerate()
        .map(|(offset, item)| {
            item.label_text()
                .filter(|label| !label.is_empty())
                .ok_or_else(|| malformed(section.start + offset, "line item has no label"))
        })
        .collect::<Result<Vec<&str>>>()?;

    let candidates = strip_trailing_totals(items)
        .iter()
        .enumerate()
        .map(|(offset, item)| {
            Ok(LineItem {
                label: item.label_text().unwrap_or_default(),
                amounts: row_amounts(item, section.start + offset)?,
            })
        })
        .collect::<Result<Vec<LineItem<'_>>>>()?;

    let trend = SectionTrend {
        name,
        years,
        totals: row_amounts(total, total_index)?,
        candidates,
        row: section.start,
    };

    let mut out = phrases::composition(name, &item_labels);
    let body = if years.len() == 3 {
        trend.narrate_three_years()?
    } else {
        trend.narrate_years()?
    };
    out.push_str(&body);

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_row(label: Option<&str>, amounts: &[Option<f64>]) -> TableRow {
        TableRow {
            label: label.map_or(Cell::Empty, Cell::from),
            cells: amounts.iter().map(|amount| Cell::from(*amount)).collect(),
        }
    }

    fn header(years: &[i64]) -> TableRow {
        TableRow {
            label: Cell::Empty,
            cells: years.iter().map(|year| Cell::Amount(*year as f64)).collect(),
        }
    }

    fn two_year_table() -> NormalizedTable {
        NormalizedTable {
            years: vec![2022, 2023],
            rows: vec![
                header(&[2022, 2023]),
                table_row(Some("נכסים שוטפים"), &[None, None]),
                table_row(Some("מזומנים"), &[Some(30.0), Some(70.0)]),
                table_row(Some("לקוחות"), &[Some(20.0), Some(10.0)]),
                table_row(Some("סה\"כ נכסים שוטפים"), &[Some(50.0), Some(80.0)]),
                table_row(None, &[None, None]),
                table_row(Some(EQUITY_TOTAL_LABEL), &[Some(12.0), Some(-3.0)]),
            ],
        }
    }

    #[test]
    fn test_split_sections_uses_lead_rows() {
        let table = two_year_table();
        let sections = split_sections(&table);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].start, 2);
        assert_eq!(sections[0].rows.len(), 3);
        assert_eq!(sections[0].lead.label_text(), Some("נכסים שוטפים"));
        assert_eq!(sections[0].kind(), SectionKind::MultiLine);

        assert_eq!(sections[1].start, 6);
        assert_eq!(sections[1].kind(), SectionKind::Equity);
    }

    #[test]
    fn test_header_lead_does_not_make_equity() {
        let mut table = two_year_table();
        table.rows.remove(1);
        let sections = split_sections(&table);

        assert_eq!(sections[0].start, 1);
        assert!(!sections[0].lead.has_label());
        assert_eq!(sections[0].kind(), SectionKind::MultiLine);
    }

    #[test]
    fn test_equity_row_under_labelled_heading() {
        let mut table = two_year_table();
        table.rows[5] = table_row(Some("הון עצמי"), &[None, None]);
        table.rows[6] = table_row(Some(EQUITY_TOTAL_LABEL), &[Some(0.0), Some(7.0)]);

        let sections = split_sections(&table);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].lead.label_text(), Some("הון עצמי"));
        assert_eq!(sections[1].kind(), SectionKind::Equity);

        let text = generate(&table).unwrap();
        assert!(text.contains("לא נרשם הון עצמי מהותי"));
        assert!(text.contains("ההון העצמי של החברה הסתכם לסך של כ-\u{200E} \u{200E}7\u{200E}"));
        assert!(!text.contains("הון עצמי של החברה מורכבים"));
    }

    #[test]
    fn test_generate_two_years() {
        let table = two_year_table();
        let text = generate(&table).unwrap();

        let sections: Vec<&str> = text.split(phrases::SECTION_SEPARATOR).collect();
        assert_eq!(sections.len(), 3);
        assert!(sections[2].is_empty());

        assert!(sections[0].starts_with("הנכסים שוטפים של החברה מורכבים ממזומנים,\u{200E} לקוחות."));
        assert!(sections[0].contains("גדלו"));
        assert!(sections[0].contains("בסעיף מזומנים"));
        assert!(!sections[0].contains("סה\"כ"));

        assert!(sections[1].contains("ההון העצמי של החברה הסתכם"));
        assert!(sections[1].contains("נרשם גרעון בהון העצמי"));
    }

    #[test]
    fn test_inner_totals_are_listed_but_trailing_ones_not_blamed() {
        let table = NormalizedTable {
            years: vec![2022, 2023],
            rows: vec![
                header(&[2022, 2023]),
                table_row(Some("רכוש קבוע"), &[Some(10.0), Some(12.0)]),
                table_row(Some("מוניטין"), &[Some(5.0), Some(6.0)]),
                table_row(Some("סה\"כ נכסים לא מוחשיים"), &[Some(5.0), Some(60.0)]),
                table_row(Some("סה\"כ נכסים לא שוטפים"), &[Some(15.0), Some(78.0)]),
                table_row(None, &[None, None]),
                table_row(Some(EQUITY_TOTAL_LABEL), &[Some(1.0), Some(1.0)]),
            ],
        };

        let text = generate(&table).unwrap();
        assert!(text.contains("סה\"כ נכסים לא מוחשיים"));
        assert!(text.contains("בסעיף רכוש קבוע"));
    }

    #[test]
    fn test_strip_trailing_totals() {
        let rows = vec![
            table_row(Some("א"), &[Some(1.0)]),
            table_row(Some("סה\"כ ב"), &[Some(1.0)]),
            table_row(Some("ג"), &[Some(1.0)]),
            table_row(Some("סה\"כ ד"), &[Some(1.0)]),
            table_row(Some("סה\"כ ה"), &[Some(1.0)]),
        ];
        assert_eq!(strip_trailing_totals(&rows).len(), 3);
        assert!(strip_trailing_totals(&rows[3..]).is_empty());
    }

    #[test]
    fn test_totals_only_section_is_malformed() {
        let table = NormalizedTable {
            years: vec![2022, 2023],
            rows: vec![
                header(&[2022, 2023]),
                table_row(Some("נכסים"), &[None, None]),
                table_row(Some("סה\"כ נכסים שוטפים"), &[Some(1.0), Some(2.0)]),
                table_row(None, &[None, None]),
                table_row(Some(EQUITY_TOTAL_LABEL), &[Some(1.0), Some(1.0)]),
            ],
        };

        assert!(matches!(
            generate(&table),
            Err(NarrativeError::MalformedSection { row: 2, .. })
        ));
    }

    #[test]
    fn test_only_total_rows_leave_nothing_to_blame() {
        let table = NormalizedTable {
            years: vec![2022, 2023],
            rows: vec![
                header(&[2022, 2023]),
                table_row(Some("סה\"כ א"), &[Some(1.0), Some(2.0)]),
                table_row(Some("סה\"כ ב"), &[Some(1.0), Some(2.0)]),
                table_row(None, &[None, None]),
                table_row(Some(EQUITY_TOTAL_LABEL), &[Some(1.0), Some(1.0)]),
            ],
        };

        assert!(matches!(
            generate(&table),
            Err(NarrativeError::MalformedSection { .. })
        ));
    }

    #[test]
    fn test_label_in_amount_column_is_malformed() {
        let mut table = two_year_table();
        table.rows[3].cells[1] = Cell::from("n/a");

        match generate(&table) {
            Err(NarrativeError::MalformedSection { row, details }) => {
                assert_eq!(row, 3);
                assert!(details.contains("n/a"));
            }
            other => panic!("expected MalformedSection, got {:?}", other),
        }
    }

    #[test]
    fn test_rounded_values_are_rendered() {
        let mut table = two_year_table();
        table.rows[4].cells = vec![Cell::Amount(50.5), Cell::Amount(80.5)];

        let text = generate(&table).unwrap();
        assert!(text.contains("\u{200E} 50\u{200E}"));
        assert!(text.contains("\u{200E} 80\u{200E}"));
    }
}
