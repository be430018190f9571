//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{HolidayEntry, MAX_AMOUNT};

/// Largest accepted holiday allowance multiplier.
const MAX_ALLOWANCE_MULTIPLIER: i64 = 10;

/// Metadata about the company running payroll.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompanyMetadata {
    /// The company's trading name.
    pub name: String,
    /// A short tagline printed on pay slips.
    #[serde(default)]
    pub tagline: String,
    /// ISO 4217 currency code for all amounts.
    pub currency: String,
}

/// Tip pool settings.
///
/// The monthly pool is `base_amount × (1 + variation)` with the variation
/// drawn from `[-max_variation, +max_variation]`, split evenly across
/// `eligible_headcount` staff.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TipPoolSettings {
    /// Expected tips collected per month.
    pub base_amount: Decimal,
    /// Maximum swing of the pool as a fraction of `base_amount`.
    pub max_variation: Decimal,
    /// Number of staff sharing the pool.
    pub eligible_headcount: u32,
    /// Seed mixed into the per-period variation draw.
    pub seed: u64,
}

/// Payroll rate settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PayrollSettings {
    /// PPN rate applied to gross salary.
    pub ppn_rate: Decimal,
    /// Tip pool settings.
    pub tip_pool: TipPoolSettings,
}

impl PayrollSettings {
    /// Checks the settings are usable by the engine.
    pub fn validate(&self) -> EngineResult<()> {
        if self.ppn_rate < Decimal::ZERO || self.ppn_rate > Decimal::ONE {
            return Err(invalid("payroll.ppn_rate", "must be between 0 and 1"));
        }
        if self.tip_pool.base_amount < Decimal::ZERO {
            return Err(invalid("payroll.tip_pool.base_amount", "cannot be negative"));
        }
        if self.tip_pool.base_amount > Decimal::from(MAX_AMOUNT) {
            return Err(invalid(
                "payroll.tip_pool.base_amount",
                &format!("cannot exceed {}", MAX_AMOUNT),
            ));
        }
        if self.tip_pool.max_variation < Decimal::ZERO || self.tip_pool.max_variation > Decimal::ONE
        {
            return Err(invalid(
                "payroll.tip_pool.max_variation",
                "must be between 0 and 1",
            ));
        }
        if self.tip_pool.eligible_headcount == 0 {
            return Err(invalid(
                "payroll.tip_pool.eligible_headcount",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Company configuration file structure (`company.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyConfig {
    /// Company metadata.
    pub company: CompanyMetadata,
    /// Payroll settings.
    pub payroll: PayrollSettings,
}

/// Holiday configuration file structure (`holidays.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct HolidaysConfig {
    /// Holiday entries in declaration order.
    pub holidays: Vec<HolidayEntry>,
}

/// The holiday calendar: every configured holiday in declaration order.
///
/// Adding, editing or deactivating an entry is the supported way to change
/// holiday allowances; no code change is needed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HolidayCalendar {
    holidays: Vec<HolidayEntry>,
}

impl HolidayCalendar {
    /// Creates a calendar, rejecting duplicate ids and out-of-range multipliers.
    pub fn new(holidays: Vec<HolidayEntry>) -> EngineResult<Self> {
        let mut seen = HashSet::new();
        for holiday in &holidays {
            if !seen.insert(holiday.id.as_str()) {
                return Err(invalid(
                    &format!("holidays.{}", holiday.id),
                    "duplicate holiday id",
                ));
            }
            if holiday.allowance_multiplier < Decimal::ZERO {
                return Err(invalid(
                    &format!("holidays.{}.allowance_multiplier", holiday.id),
                    "cannot be negative",
                ));
            }
            if holiday.allowance_multiplier > Decimal::from(MAX_ALLOWANCE_MULTIPLIER) {
                return Err(invalid(
                    &format!("holidays.{}.allowance_multiplier", holiday.id),
                    &format!("cannot exceed {}", MAX_ALLOWANCE_MULTIPLIER),
                ));
            }
        }
        Ok(Self { holidays })
    }

    /// Returns the holidays in declaration order.
    pub fn holidays(&self) -> &[HolidayEntry] {
        &self.holidays
    }
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    metadata: CompanyMetadata,
    settings: PayrollSettings,
    calendar: HolidayCalendar,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        metadata: CompanyMetadata,
        settings: PayrollSettings,
        calendar: HolidayCalendar,
    ) -> EngineResult<Self> {
        settings.validate()?;
        Ok(Self {
            metadata,
            settings,
            calendar,
        })
    }

    /// Returns the company metadata.
    pub fn metadata(&self) -> &CompanyMetadata {
        &self.metadata
    }

    /// Returns the payroll settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Returns the holiday calendar.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }
}

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EligibleReligions, HolidayType, Religion};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn settings() -> PayrollSettings {
        PayrollSettings {
            ppn_rate: dec("0.11"),
            tip_pool: TipPoolSettings {
                base_amount: dec("15000000"),
                max_variation: dec("0.15"),
                eligible_headcount: 20,
                seed: 1,
            },
        }
    }

    fn holiday(id: &str, multiplier: &str) -> HolidayEntry {
        HolidayEntry {
            id: id.to_string(),
            name: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
            holiday_type: HolidayType::IdulFitri,
            description: String::new(),
            allowance_multiplier: dec(multiplier),
            is_active: true,
            eligible_religions: EligibleReligions::Only(vec![Religion::Islam]),
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(settings().validate().is_ok());
    }

    #[test]
    fn test_zero_headcount_rejected() {
        let mut s = settings();
        s.tip_pool.eligible_headcount = 0;
        match s.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "payroll.tip_pool.eligible_headcount");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_ppn_rate_above_one_rejected() {
        let mut s = settings();
        s.ppn_rate = dec("1.1");
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_variation_above_one_rejected() {
        let mut s = settings();
        s.tip_pool.max_variation = dec("1.5");
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_calendar_rejects_duplicate_ids() {
        let result = HolidayCalendar::new(vec![holiday("a", "1.0"), holiday("a", "0.5")]);
        match result {
            Err(EngineError::InvalidConfig { field, message }) => {
                assert_eq!(field, "holidays.a");
                assert_eq!(message, "duplicate holiday id");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_calendar_rejects_negative_multiplier() {
        let result = HolidayCalendar::new(vec![holiday("a", "-0.5")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_calendar_rejects_oversized_multiplier() {
        match HolidayCalendar::new(vec![holiday("a", "10.5")]) {
            Err(EngineError::InvalidConfig { field, message }) => {
                assert_eq!(field, "holidays.a.allowance_multiplier");
                assert_eq!(message, "cannot exceed 10");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
        assert!(HolidayCalendar::new(vec![holiday("a", "10")]).is_ok());
    }

    #[test]
    fn test_tip_pool_base_amount_above_maximum_rejected() {
        let mut s = settings();
        s.tip_pool.base_amount = Decimal::MAX;
        match s.validate() {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "payroll.tip_pool.base_amount");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_calendar_keeps_declaration_order() {
        let calendar =
            HolidayCalendar::new(vec![holiday("b", "1.0"), holiday("a", "0.5")]).unwrap();
        let ids: Vec<&str> = calendar.holidays().iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_payroll_config_validates_settings() {
        let mut s = settings();
        s.ppn_rate = dec("-0.01");
        let metadata = CompanyMetadata {
            name: "Enjoy Dive".to_string(),
            tagline: String::new(),
            currency: "IDR".to_string(),
        };
        assert!(PayrollConfig::new(metadata, s, HolidayCalendar::default()).is_err());
    }
}
