use super::phrases;
use std::cmp::Ordering;

/// One sentence per year: equity total, equity deficit, or no material equity.
pub fn narrate_equity(amounts: &[i64], years: &[String]) -> String {
    amounts
        .iter()
        .zip(years)
        .map(|(amount, year)| match amount.cmp(&0) {
            Ordering::Greater => phrases::equity_total(year, *amount),
            Ordering::Less => phrases::equity_deficit(year, -amount),
            Ordering::Equal => phrases::equity_none(year),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surplus_deficit_and_none_in_year_order() {
        let years: Vec<String> = ["2021", "2022", "2023"].iter().map(|y| y.to_string()).collect();
        let text = narrate_equity(&[50, -20, 0], &years);

        let surplus = text.find("ההון העצמי של החברה הסתכם").unwrap();
        let deficit = text.find("נרשם גרעון בהון העצמי").unwrap();
        let none = text.find("לא נרשם הון עצמי מהותי").unwrap();
        assert!(surplus < deficit && deficit < none);

        assert!(text.contains("\u{200E}50\u{200E}"));
        assert!(text.contains("\u{200E}20\u{200E}"));
        assert!(!text.contains("-20"));
    }
}
