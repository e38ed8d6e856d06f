//! Formatting helpers for presenting analysis results.

use super::protocol::YearCount;
use crate::t;

/// Counts arrive as JSON numbers; integral values print without a fraction.
pub fn format_count(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// "2020 рік:"
pub fn year_label(year: i64) -> String {
    crate::i18n::init();
    t!("result-year-label", year = year.to_string())
}

/// "3 книг(и)"
pub fn year_count(count: f64) -> String {
    crate::i18n::init();
    t!("result-year-count", count = format_count(count))
}

/// Full list entry as plain text: "2020 рік: 3 книг(и)".
pub fn year_entry(entry: &YearCount) -> String {
    format!("{} {}", year_label(entry.year), year_count(entry.count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_drop_integral_fractions() {
        assert_eq!(format_count(3.0), "3");
        assert_eq!(format_count(2.5), "2.5");
        assert_eq!(format_count(0.0), "0");
    }

    #[test]
    fn year_entries_read_like_the_results_list() {
        let entry = YearCount {
            year: 2020,
            count: 3.0,
        };
        assert_eq!(year_entry(&entry), "2020 рік: 3 книг(и)");
    }
}
