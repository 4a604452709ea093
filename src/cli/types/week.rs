//! Ranking week identity and the week / duration specifiers accepted on the command line.

use crate::error::{RankingError, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static YEAR_WEEK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})[-_ ]?KW\s*(\d{1,2})$").expect("valid regex"));
static WEEK_ONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:KW\s*)?(\d{1,2})$").expect("valid regex"));
static SPAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,3})\s*([WMY]?)$").expect("valid regex"));

/// One weekly ranking snapshot, identified by calendar year and ranking week ("KW").
///
/// Ordering is lexicographic on `(year, week)`, which is also chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RankingWeek {
    pub year: u16,
    pub week: u8,
}

impl RankingWeek {
    pub fn new(year: u16, week: u8) -> Self {
        Self { year, week }
    }

    /// Like [`RankingWeek::new`] but rejects week numbers outside 1-53.
    pub fn try_new(year: u16, week: u8) -> Result<Self> {
        if (1..=53).contains(&week) {
            Ok(Self { year, week })
        } else {
            Err(RankingError::InvalidWeek {
                input: format!("{year}-KW{week}"),
            })
        }
    }

    /// Display label, e.g. `KW 2 2026`.
    pub fn label(&self) -> String {
        format!("KW {} {}", self.week, self.year)
    }

    /// Compact axis label, e.g. `2/26`.
    pub fn short_label(&self) -> String {
        format!("{}/{:02}", self.week, self.year % 100)
    }

    /// Name of the published spreadsheet, e.g. `Ranking_2026_KW02.xlsx`.
    pub fn filename(&self) -> String {
        format!("Ranking_{}_KW{:02}.xlsx", self.year, self.week)
    }

    /// The ranking week `weeks` calendar weeks earlier, using ISO week numbering.
    pub fn minus_weeks(&self, weeks: u32) -> Self {
        let monday = NaiveDate::from_isoywd_opt(self.year as i32, self.week as u32, Weekday::Mon)
            .or_else(|| NaiveDate::from_isoywd_opt(self.year as i32, 52, Weekday::Mon));

        match monday {
            Some(date) => {
                let earlier = date - Duration::weeks(weeks as i64);
                let iso = earlier.iso_week();
                Self::new(iso.year().max(0) as u16, iso.week() as u8)
            }
            None => *self,
        }
    }
}

impl fmt::Display for RankingWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Parse a week specifier.
///
/// Accepted forms: `2026-KW02`, `2026_KW2`, `2026KW2`, `KW2`, `kw 2` and a bare `2`.
/// Forms without a year use `current_year`.
pub fn parse_week_spec(input: &str, current_year: u16) -> Result<RankingWeek> {
    let normalized = input.trim().to_uppercase();
    let invalid = || RankingError::InvalidWeek {
        input: input.to_string(),
    };

    if let Some(caps) = YEAR_WEEK_RE.captures(&normalized) {
        let year: u16 = caps[1].parse().map_err(|_| invalid())?;
        let week: u8 = caps[2].parse().map_err(|_| invalid())?;
        return RankingWeek::try_new(year, week).map_err(|_| invalid());
    }

    if let Some(caps) = WEEK_ONLY_RE.captures(&normalized) {
        let week: u8 = caps[1].parse().map_err(|_| invalid())?;
        return RankingWeek::try_new(current_year, week).map_err(|_| invalid());
    }

    Err(invalid())
}

impl FromStr for RankingWeek {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self> {
        let year = chrono::Local::now().year().clamp(0, u16::MAX as i32) as u16;
        parse_week_spec(s, year)
    }
}

/// A look-back window measured in ranking weeks (`--since 12w`, `6m`, `1y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSpan(pub u32);

impl WeekSpan {
    pub fn weeks(&self) -> u32 {
        self.0
    }

    /// First week still inside the window that ends at `latest`.
    pub fn cutoff_from(&self, latest: RankingWeek) -> RankingWeek {
        latest.minus_weeks(self.0)
    }
}

impl FromStr for WeekSpan {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || RankingError::InvalidDuration {
            input: s.to_string(),
        };
        let normalized = s.trim().to_uppercase();
        let caps = SPAN_RE.captures(&normalized).ok_or_else(invalid)?;
        let amount: u32 = caps[1].parse().map_err(|_| invalid())?;
        if amount == 0 {
            return Err(invalid());
        }

        let weeks = match &caps[2] {
            "" | "W" => amount,
            // 52 weeks spread over 12 months, rounded to the nearest week
            "M" => (amount * 52 + 6) / 12,
            "Y" => amount * 52,
            _ => return Err(invalid()),
        };
        Ok(Self(weeks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_chronological() {
        let mut weeks = vec![
            RankingWeek::new(2026, 1),
            RankingWeek::new(2025, 52),
            RankingWeek::new(2026, 10),
            RankingWeek::new(2025, 3),
        ];
        weeks.sort();
        assert_eq!(
            weeks,
            vec![
                RankingWeek::new(2025, 3),
                RankingWeek::new(2025, 52),
                RankingWeek::new(2026, 1),
                RankingWeek::new(2026, 10),
            ]
        );
    }

    #[test]
    fn test_labels() {
        let week = RankingWeek::new(2026, 2);
        assert_eq!(week.label(), "KW 2 2026");
        assert_eq!(week.short_label(), "2/26");
        assert_eq!(week.filename(), "Ranking_2026_KW02.xlsx");
        assert_eq!(week.to_string(), "KW 2 2026");
    }

    #[test]
    fn test_parse_week_spec_forms() {
        assert_eq!(
            parse_week_spec("2026-KW02", 2020).unwrap(),
            RankingWeek::new(2026, 2)
        );
        assert_eq!(
            parse_week_spec("2025_kw14", 2020).unwrap(),
            RankingWeek::new(2025, 14)
        );
        assert_eq!(
            parse_week_spec("2025KW7", 2020).unwrap(),
            RankingWeek::new(2025, 7)
        );
        assert_eq!(parse_week_spec("KW2", 2026).unwrap(), RankingWeek::new(2026, 2));
        assert_eq!(parse_week_spec("kw 9", 2026).unwrap(), RankingWeek::new(2026, 9));
        assert_eq!(parse_week_spec(" 12 ", 2026).unwrap(), RankingWeek::new(2026, 12));
    }

    #[test]
    fn test_parse_week_spec_rejects_garbage() {
        for input in ["", "KW", "KW0", "KW54", "2026-KW99", "week 3", "26-KW2", "abc"] {
            assert!(
                matches!(
                    parse_week_spec(input, 2026),
                    Err(RankingError::InvalidWeek { .. })
                ),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_minus_weeks_crosses_year_boundary() {
        let week = RankingWeek::new(2026, 3);
        assert_eq!(week.minus_weeks(0), week);
        assert_eq!(week.minus_weeks(2), RankingWeek::new(2026, 1));
        // 2025 has 52 ISO weeks
        assert_eq!(week.minus_weeks(3), RankingWeek::new(2025, 52));
        assert_eq!(week.minus_weeks(52), RankingWeek::new(2025, 3));
    }

    #[test]
    fn test_week_span_parsing() {
        assert_eq!("12w".parse::<WeekSpan>().unwrap(), WeekSpan(12));
        assert_eq!("8".parse::<WeekSpan>().unwrap(), WeekSpan(8));
        assert_eq!("6m".parse::<WeekSpan>().unwrap(), WeekSpan(26));
        assert_eq!("3M".parse::<WeekSpan>().unwrap(), WeekSpan(13));
        assert_eq!("1y".parse::<WeekSpan>().unwrap(), WeekSpan(52));

        for input in ["", "0w", "w", "3d", "1.5y", "-2w"] {
            assert!(
                matches!(
                    input.parse::<WeekSpan>(),
                    Err(RankingError::InvalidDuration { .. })
                ),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_week_span_cutoff() {
        let latest = RankingWeek::new(2026, 10);
        assert_eq!(WeekSpan(4).cutoff_from(latest), RankingWeek::new(2026, 6));
    }
}
