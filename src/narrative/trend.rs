use super::phrases;
use crate::error::{NarrativeError, Result};
use crate::utils::first_max_by_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Growth,
    Decline,
}

impl Direction {
    /// Only a strictly larger total counts as growth; an unchanged total is a decline.
    pub fn between(previous: i64, current: i64) -> Self {
        if current > previous {
            Direction::Growth
        } else {
            Direction::Decline
        }
    }

    /// Signed contribution of a line item in this direction.
    pub fn contribution(self, previous: i64, current: i64) -> i64 {
        match self {
            Direction::Growth => current - previous,
            Direction::Decline => previous - current,
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            Direction::Growth => "גדלו",
            Direction::Decline => "קטנו",
        }
    }

    pub fn definite_noun(self) -> &'static str {
        match self {
            Direction::Growth => "הגידול",
            Direction::Decline => "הקיטון",
        }
    }

    pub fn noun(self) -> &'static str {
        match self {
            Direction::Growth => "גידול",
            Direction::Decline => "קיטון",
        }
    }
}

/// A line item that can be blamed for a change, with rounded amounts per year.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    pub label: &'a str,
    pub amounts: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movement<'a> {
    pub direction: Direction,
    pub driver: &'a str,
}

/// Everything needed to narrate one multi-line section.
#[derive(Debug)]
pub struct SectionTrend<'a> {
    pub name: &'a str,
    pub years: &'a [String],
    pub totals: Vec<i64>,
    pub candidates: Vec<LineItem<'a>>,
    /// Table row of the section's first line item, for error reporting.
    pub row: usize,
}

impl<'a> SectionTrend<'a> {
    /// Classifies the change from year `k - 1` to year `k` and finds the line item
    /// that moved most in that direction. The first item reaching the maximum wins.
    pub fn movement(&self, k: usize) -> Result<Movement<'a>> {
        let before = k.checked_sub(1).and_then(|prev| Some((prev, *self.totals.get(prev)?)));
        let (prev, previous, current) = match (before, self.totals.get(k)) {
            (Some((prev, previous)), Some(current)) => (prev, previous, *current),
            _ => return Err(self.malformed(format!("no totals for year index {}", k))),
        };
        let direction = Direction::between(previous, current);

        let driver = first_max_by_key(self.candidates.iter(), |item| {
            direction.contribution(item_amount(item, prev), item_amount(item, k))
        })
        .ok_or_else(|| self.malformed("no line items to attribute the change to".to_string()))?;

        Ok(Movement {
            direction,
            driver: driver.label,
        })
    }

    /// Opening total followed by one sentence per following year.
    pub fn narrate_years(&self) -> Result<String> {
        let first_total = self
            .totals
            .first()
            .copied()
            .ok_or_else(|| self.malformed("section has no year columns".to_string()))?;

        let mut out = phrases::opening_total(self.year(0), self.name, first_total);
        for k in 1..self.totals.len() {
            let movement = self.movement(k)?;
            out.push_str(&phrases::yearly_change(
                self.year(k),
                self.name,
                self.totals[k],
                &movement,
            ));
        }
        out.push('\n');

        Ok(out)
    }

    /// Single paragraph covering year 1 to 2 and year 2 to 3.
    pub fn narrate_three_years(&self) -> Result<String> {
        let totals: [i64; 3] = self
            .totals
            .as_slice()
            .try_into()
            .map_err(|_| self.malformed(format!("expected 3 years, found {}", self.totals.len())))?;

        let first = self.movement(1)?;
        let second = self.movement(2)?;

        Ok(phrases::three_year_change(
            self.name,
            [self.year(0), self.year(1), self.year(2)],
            totals,
            &first,
            &second,
        ))
    }

    fn year(&self, k: usize) -> &str {
        self.years.get(k).map(String::as_str).unwrap_or_default()
    }

    fn malformed(&self, details: String) -> NarrativeError {
        NarrativeError::MalformedSection {
            row: self.row,
            details,
        }
    }
}

fn item_amount(item: &LineItem<'_>, k: usize) -> i64 {
    item.amounts.get(k).copied().unwrap_or(0)
}
