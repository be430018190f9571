//! Holiday calendar models.
//!
//! This module contains [`HolidayEntry`], the configured fact that a
//! religious holiday or company anniversary falls on a given date, and
//! the [`HolidayType`] and [`EligibleReligions`] types it is built from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Religion;

/// Kind of holiday that triggers an allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayType {
    /// Idul Fitri (Eid al-Fitr).
    IdulFitri,
    /// Christmas.
    Natal,
    /// Nyepi, the Balinese Saka new year.
    Nyepi,
    /// Vesak.
    Waisak,
    /// Company anniversary bonus, paid to everyone.
    Anniversary,
}

impl HolidayType {
    /// Pay slip label for the allowance paid on this holiday.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::HolidayType;
    ///
    /// assert_eq!(HolidayType::Natal.allowance_label(), "Tunjangan Natal");
    /// assert_eq!(HolidayType::label_for(None), "Tunjangan Hari Raya");
    /// ```
    pub fn allowance_label(&self) -> &'static str {
        match self {
            HolidayType::IdulFitri => "Tunjangan Idul Fitri",
            HolidayType::Natal => "Tunjangan Natal",
            HolidayType::Nyepi => "Tunjangan Nyepi",
            HolidayType::Waisak => "Tunjangan Waisak",
            HolidayType::Anniversary => "Bonus Tahunan",
        }
    }

    /// Label for an optional holiday type, with the generic fallback.
    pub fn label_for(holiday_type: Option<HolidayType>) -> &'static str {
        holiday_type
            .map(|t| t.allowance_label())
            .unwrap_or("Tunjangan Hari Raya")
    }
}

/// Marker for the literal `all` in a holiday's eligible religions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllReligions {
    /// Every religion qualifies.
    All,
}

/// Religions that qualify for a holiday's allowance.
///
/// Serialized either as the string `"all"` or as a list of religion tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EligibleReligions {
    /// Every religion qualifies.
    All(AllReligions),
    /// Only the listed religions qualify.
    Only(Vec<Religion>),
}

impl EligibleReligions {
    /// Returns true if `religion` qualifies.
    pub fn contains(&self, religion: Religion) -> bool {
        match self {
            EligibleReligions::All(_) => true,
            EligibleReligions::Only(religions) => religions.contains(&religion),
        }
    }
}

/// A holiday that may trigger an allowance in the month it falls in.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AllReligions, EligibleReligions, HolidayEntry, HolidayType, Religion};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let holiday = HolidayEntry {
///     id: "natal_2024".to_string(),
///     name: "Natal 2024".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
///     holiday_type: HolidayType::Natal,
///     description: "Hari Raya Natal".to_string(),
///     allowance_multiplier: Decimal::new(5, 1),
///     is_active: true,
///     eligible_religions: EligibleReligions::Only(vec![Religion::Kristen, Religion::Katolik]),
/// };
/// assert!(holiday.is_eligible(Religion::Katolik));
/// assert!(!holiday.is_eligible(Religion::Islam));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayEntry {
    /// Unique identifier (e.g., "idul_fitri_2024").
    pub id: String,
    /// Display name.
    pub name: String,
    /// The calendar date of the holiday.
    pub date: NaiveDate,
    /// The kind of holiday.
    #[serde(rename = "type")]
    pub holiday_type: HolidayType,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Bonus as a fraction of base salary (1.0 = one month's salary).
    pub allowance_multiplier: Decimal,
    /// Inactive entries are ignored by the resolver.
    pub is_active: bool,
    /// Religions that qualify for the allowance.
    pub eligible_religions: EligibleReligions,
}

impl HolidayEntry {
    /// Returns true if an employee of `religion` qualifies for this holiday.
    pub fn is_eligible(&self, religion: Religion) -> bool {
        self.eligible_religions.contains(religion)
    }
}
