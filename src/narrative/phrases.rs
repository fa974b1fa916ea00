//! Hebrew sentence templates.
//!
//! Every number and year is bracketed by left-to-right marks so mixed digits and
//! Hebrew text render in the right order inside a right-to-left paragraph.

use super::trend::Movement;

/// LEFT-TO-RIGHT MARK.
pub const LRM: char = '\u{200E}';

/// Separator appended after every section paragraph.
pub const SECTION_SEPARATOR: &str = "\n \n";

/// "The ⟨name⟩ of the company consist of ⟨item⟩, ⟨item⟩."
pub fn composition(name: &str, items: &[&str]) -> String {
    let separator = format!(",{LRM} ");
    format!(
        "ה{name} של החברה מורכבים מ{}.{LRM}\n",
        items.join(&separator)
    )
}

/// "In ⟨year⟩ the ⟨name⟩ of the company totaled approximately ⟨total⟩ thousand NIS."
pub fn opening_total(year: &str, name: &str, total: i64) -> String {
    format!("בשנת {year} ה{name} של החברה הסתכמו לסך של כ-{LRM} {total}{LRM} אלפי ש\"ח.{LRM} ")
}

/// One year-over-year step of the general narrator.
pub fn yearly_change(year: &str, name: &str, total: i64, movement: &Movement<'_>) -> String {
    let direction = movement.direction;
    format!(
        "בשנת {year} ה{name} של החברה {} לסך של כ-{LRM} {total}{LRM} אלפי ש\"ח.{LRM} {} נרשם עקב {} בסעיף {}.{LRM} ",
        direction.verb(),
        direction.definite_noun(),
        direction.noun(),
        movement.driver,
    )
}

/// Combined paragraph for a three-year table: year 1 to 2, then year 2 to 3.
pub fn three_year_change(
    name: &str,
    years: [&str; 3],
    totals: [i64; 3],
    first: &Movement<'_>,
    second: &Movement<'_>,
) -> String {
    let [first_year, second_year, third_year] = years;
    let [first_total, second_total, third_total] = totals;

    format!(
        "בשנת {second_year} ה{name} של החברה {} לסך של כ-{LRM} {second_total}{LRM} אלפי ש\"ח בהשוואה לסך של כ-{LRM} {first_total}{LRM} ש\"ח בשנת{LRM} {LRM}{first_year}{LRM}.{LRM} {} התרחש בעיקר עקב {} בסעיף {}.{LRM} בשנת {third_year} ה{name} של החברה {} לסך של כ-{LRM} {third_total}{LRM} אלפי ש\"ח.{LRM} {} התרחש בעיקר עקב {} בסעיף {}.{LRM}\n",
        first.direction.verb(),
        first.direction.noun(),
        first.direction.definite_noun(),
        first.driver,
        second.direction.verb(),
        second.direction.definite_noun(),
        second.direction.noun(),
        second.driver,
    )
}

pub fn equity_total(year: &str, total: i64) -> String {
    format!(
        "בשנת {LRM}{year}{LRM} {LRM}ההון העצמי של החברה הסתכם לסך של כ-{LRM} {LRM}{total}{LRM} אלפי ש\"ח.{LRM} "
    )
}

pub fn equity_deficit(year: &str, deficit: i64) -> String {
    format!(
        "בשנת {LRM}{year}{LRM} נרשם גרעון בהון העצמי בסך של כ-{LRM} {LRM}{deficit}{LRM} אלפי ש\"ח.{LRM} "
    )
}

pub fn equity_none(year: &str) -> String {
    format!("בשנת {LRM}{year}{LRM} לא נרשם הון עצמי מהותי.{LRM} ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composition_brackets_items() {
        let sentence = composition("נכסים השוטפים", &["מזומנים", "לקוחות"]);
        assert_eq!(
            sentence,
            "הנכסים השוטפים של החברה מורכבים ממזומנים,\u{200E} לקוחות.\u{200E}\n"
        );
    }

    #[test]
    fn test_equity_templates() {
        assert!(equity_total("2023", 50).contains("\u{200E}50\u{200E}"));
        assert!(equity_deficit("2023", 20).contains("גרעון"));
        assert_eq!(
            equity_none("2023"),
            "בשנת \u{200E}2023\u{200E} לא נרשם הון עצמי מהותי.\u{200E} "
        );
    }
}
