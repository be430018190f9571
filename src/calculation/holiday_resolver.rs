//! Holiday resolution for a pay period.
//!
//! A holiday applies to a pay period when it is active and its date falls
//! in the period's month and year. Entries are scanned in declaration order.

use crate::config::HolidayCalendar;
use crate::models::{HolidayEntry, PayPeriod, Religion};

/// Returns the first active holiday falling in `period`, if any.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::resolve_holiday;
/// use payroll_engine::config::ConfigLoader;
///
/// let config = ConfigLoader::builtin().unwrap();
/// let period = "12/2024".parse().unwrap();
///
/// let holiday = resolve_holiday(config.calendar(), &period).unwrap();
/// assert_eq!(holiday.id, "natal_2024");
/// ```
pub fn resolve_holiday<'a>(
    calendar: &'a HolidayCalendar,
    period: &PayPeriod,
) -> Option<&'a HolidayEntry> {
    resolve_all_holidays(calendar, period).into_iter().next()
}

/// Returns every active holiday falling in `period`, in declaration order.
pub fn resolve_all_holidays<'a>(
    calendar: &'a HolidayCalendar,
    period: &PayPeriod,
) -> Vec<&'a HolidayEntry> {
    calendar
        .holidays()
        .iter()
        .filter(|holiday| holiday.is_active && period.contains(holiday.date))
        .collect()
}

/// Returns the first active holiday in `period` that `religion` qualifies for.
///
/// When a month holds a single holiday this is [`resolve_holiday`] filtered
/// by eligibility. When a month holds several holidays for different
/// religions, each employee gets the one that matches their religion.
pub fn resolve_holiday_for_religion<'a>(
    calendar: &'a HolidayCalendar,
    period: &PayPeriod,
    religion: Religion,
) -> Option<&'a HolidayEntry> {
    resolve_all_holidays(calendar, period)
        .into_iter()
        .find(|holiday| holiday.is_eligible(religion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{EligibleReligions, HolidayType};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn builtin_calendar() -> HolidayCalendar {
        ConfigLoader::builtin().unwrap().calendar().clone()
    }

    fn period(s: &str) -> PayPeriod {
        s.parse().unwrap()
    }

    fn holiday(
        id: &str,
        date: (i32, u32, u32),
        holiday_type: HolidayType,
        religions: Vec<Religion>,
        is_active: bool,
    ) -> HolidayEntry {
        HolidayEntry {
            id: id.to_string(),
            name: id.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            holiday_type,
            description: String::new(),
            allowance_multiplier: Decimal::new(5, 1),
            is_active,
            eligible_religions: EligibleReligions::Only(religions),
        }
    }

    /// HR-001: Idul Fitri 2024 resolves in April 2024
    #[test]
    fn test_hr_001_idul_fitri_april_2024() {
        let calendar = builtin_calendar();
        let resolved = resolve_holiday(&calendar, &period("4/2024")).unwrap();
        assert_eq!(resolved.id, "idul_fitri_2024");
        assert_eq!(resolved.holiday_type, HolidayType::IdulFitri);
    }

    /// HR-002: month without a holiday resolves to none
    #[test]
    fn test_hr_002_month_without_holiday() {
        let calendar = builtin_calendar();
        assert!(resolve_holiday(&calendar, &period("6/2024")).is_none());
        assert!(resolve_holiday(&calendar, &period("1/2025")).is_none());
    }

    /// HR-003: same month in a different year does not match
    #[test]
    fn test_hr_003_year_must_match() {
        let calendar = builtin_calendar();
        // Natal is only configured for 2024
        assert!(resolve_holiday(&calendar, &period("12/2025")).is_none());
        assert!(resolve_holiday(&calendar, &period("4/2025")).is_none());
        assert_eq!(
            resolve_holiday(&calendar, &period("3/2025")).unwrap().id,
            "idul_fitri_2025"
        );
    }

    /// HR-004: inactive holidays are skipped
    #[test]
    fn test_hr_004_inactive_holiday_skipped() {
        let calendar = HolidayCalendar::new(vec![holiday(
            "natal_2026",
            (2026, 12, 25),
            HolidayType::Natal,
            vec![Religion::Kristen],
            false,
        )])
        .unwrap();
        assert!(resolve_holiday(&calendar, &period("12/2026")).is_none());
    }

    /// HR-005: first declared holiday wins when a month has several
    #[test]
    fn test_hr_005_declaration_order_tie_break() {
        let calendar = HolidayCalendar::new(vec![
            holiday(
                "nyepi_2026",
                (2026, 3, 19),
                HolidayType::Nyepi,
                vec![Religion::Hindu],
                true,
            ),
            holiday(
                "idul_fitri_2026",
                (2026, 3, 20),
                HolidayType::IdulFitri,
                vec![Religion::Islam],
                true,
            ),
        ])
        .unwrap();

        let p = period("3/2026");
        assert_eq!(resolve_holiday(&calendar, &p).unwrap().id, "nyepi_2026");

        let all: Vec<&str> = resolve_all_holidays(&calendar, &p)
            .iter()
            .map(|h| h.id.as_str())
            .collect();
        assert_eq!(all, vec!["nyepi_2026", "idul_fitri_2026"]);
    }

    /// HR-006: per-religion resolution picks the matching holiday
    #[test]
    fn test_hr_006_resolve_for_religion() {
        let calendar = HolidayCalendar::new(vec![
            holiday(
                "nyepi_2026",
                (2026, 3, 19),
                HolidayType::Nyepi,
                vec![Religion::Hindu],
                true,
            ),
            holiday(
                "idul_fitri_2026",
                (2026, 3, 20),
                HolidayType::IdulFitri,
                vec![Religion::Islam],
                true,
            ),
        ])
        .unwrap();

        let p = period("3/2026");
        assert_eq!(
            resolve_holiday_for_religion(&calendar, &p, Religion::Islam)
                .unwrap()
                .id,
            "idul_fitri_2026"
        );
        assert_eq!(
            resolve_holiday_for_religion(&calendar, &p, Religion::Hindu)
                .unwrap()
                .id,
            "nyepi_2026"
        );
        assert!(resolve_holiday_for_religion(&calendar, &p, Religion::Kristen).is_none());
    }

    #[test]
    fn test_empty_calendar_resolves_nothing() {
        let calendar = HolidayCalendar::default();
        assert!(resolve_holiday(&calendar, &period("4/2024")).is_none());
    }
}
