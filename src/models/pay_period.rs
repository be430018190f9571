//! Pay period model.
//!
//! A [`PayPeriod`] is a calendar month. Its textual form is `"M/YYYY"`
//! (no zero padding on the month), which is also how it serializes.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A monthly pay period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period: PayPeriod = "4/2024".parse().unwrap();
/// assert_eq!(period.month(), 4);
/// assert_eq!(period.year(), 2024);
/// assert_eq!(period.to_string(), "4/2024");
/// assert!(period.contains(NaiveDate::from_ymd_opt(2024, 4, 10).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayPeriod {
    // Field order matters for the derived ordering: year first.
    year: i32,
    month: u32,
}

impl PayPeriod {
    /// Creates a pay period, validating month (1-12) and year (1-9999).
    pub fn new(month: u32, year: i32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod {
                period: format!("{}/{}", month, year),
                message: "month must be between 1 and 12".to_string(),
            });
        }
        if !(1..=9999).contains(&year) {
            return Err(EngineError::InvalidPeriod {
                period: format!("{}/{}", month, year),
                message: "year must be between 1 and 9999".to_string(),
            });
        }
        Ok(Self { year, month })
    }

    /// The pay period containing today's date (UTC).
    pub fn current() -> Self {
        Self::containing(Utc::now().date_naive())
    }

    /// The pay period containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month, 1-based.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The four-digit year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Checks if a date falls within this calendar month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The period immediately before this one, or `None` before 1/0001.
    ///
    /// ```
    /// use payroll_engine::models::PayPeriod;
    ///
    /// let january: PayPeriod = "1/2025".parse().unwrap();
    /// assert_eq!(january.previous().unwrap().to_string(), "12/2024");
    /// ```
    pub fn previous(&self) -> Option<Self> {
        if self.month > 1 {
            Some(Self {
                year: self.year,
                month: self.month - 1,
            })
        } else if self.year > 1 {
            Some(Self {
                year: self.year - 1,
                month: 12,
            })
        } else {
            None
        }
    }

    /// The period text with the separator removed, as used in pay slip ids
    /// (`"4/2024"` becomes `"42024"`).
    pub fn compact(&self) -> String {
        format!("{}{}", self.month, self.year)
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

impl FromStr for PayPeriod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| EngineError::InvalidPeriod {
            period: s.to_string(),
            message: message.to_string(),
        };

        let (month, year) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| invalid("expected the form M/YYYY"))?;
        let month: u32 = month
            .trim()
            .parse()
            .map_err(|_| invalid("month is not a number"))?;
        let year: i32 = year
            .trim()
            .parse()
            .map_err(|_| invalid("year is not a number"))?;

        Self::new(month, year).map_err(|err| match err {
            EngineError::InvalidPeriod { message, .. } => invalid(&message),
            other => other,
        })
    }
}

impl TryFrom<String> for PayPeriod {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayPeriod> for String {
    fn from(period: PayPeriod) -> Self {
        period.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(s: &str) -> PayPeriod {
        s.parse().unwrap()
    }

    /// PP-001: parse single-digit month
    #[test]
    fn test_parse_single_digit_month() {
        let p = period("4/2024");
        assert_eq!(p.month(), 4);
        assert_eq!(p.year(), 2024);
    }

    /// PP-002: parse zero-padded and two-digit months
    #[test]
    fn test_parse_padded_and_two_digit_months() {
        assert_eq!(period("04/2024").month(), 4);
        assert_eq!(period("12/2024").month(), 12);
    }

    /// PP-003: month out of range is rejected
    #[test]
    fn test_month_out_of_range_rejected() {
        for text in ["0/2024", "13/2024"] {
            match text.parse::<PayPeriod>() {
                Err(EngineError::InvalidPeriod { period, message }) => {
                    assert_eq!(period, text);
                    assert!(message.contains("month"));
                }
                other => panic!("Expected InvalidPeriod, got {:?}", other),
            }
        }
    }

    /// PP-004: malformed text is rejected
    #[test]
    fn test_malformed_text_rejected() {
        for text in ["", "2024", "April/2024", "4-2024", "4/", "/2024", "4/0"] {
            assert!(text.parse::<PayPeriod>().is_err(), "accepted {:?}", text);
        }
    }

    #[test]
    fn test_display_drops_padding() {
        assert_eq!(period("09/2025").to_string(), "9/2025");
    }

    #[test]
    fn test_compact_removes_separator() {
        assert_eq!(period("4/2024").compact(), "42024");
        assert_eq!(period("12/2025").compact(), "122025");
    }

    #[test]
    fn test_contains_matches_month_and_year() {
        let p = period("12/2024");
        assert!(p.contains(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()));
        assert!(!p.contains(NaiveDate::from_ymd_opt(2025, 12, 25).unwrap()));
        assert!(!p.contains(NaiveDate::from_ymd_opt(2024, 11, 30).unwrap()));
    }

    #[test]
    fn test_previous_wraps_year() {
        assert_eq!(period("1/2025").previous(), Some(period("12/2024")));
        assert_eq!(period("7/2025").previous(), Some(period("6/2025")));
        assert_eq!(period("1/1").previous(), None);
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(period("12/2024") < period("1/2025"));
        assert!(period("3/2025") < period("10/2025"));
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&period("3/2025")).unwrap();
        assert_eq!(json, "\"3/2025\"");
        let back: PayPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(back, period("3/2025"));
    }

    #[test]
    fn test_deserialize_invalid_period_fails() {
        assert!(serde_json::from_str::<PayPeriod>("\"13/2025\"").is_err());
    }
}
