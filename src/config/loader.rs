//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{
    CompanyConfig, CompanyMetadata, HolidayCalendar, HolidaysConfig, PayrollConfig,
    PayrollSettings,
};

const BUILTIN_COMPANY: &str = include_str!("../../config/enjoy_dive/company.yaml");
const BUILTIN_HOLIDAYS: &str = include_str!("../../config/enjoy_dive/holidays.yaml");

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// ```text
/// config/enjoy_dive/
/// ├── company.yaml   # Company metadata, PPN rate and tip pool
/// └── holidays.yaml  # Holiday calendar
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/enjoy_dive").unwrap();
/// println!("Company: {}", loader.company().name);
/// println!("Holidays: {}", loader.calendar().holidays().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - The values fail validation (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let company_path = path.join("company.yaml");
        let company = Self::parse_yaml::<CompanyConfig>(
            &Self::read_file(&company_path)?,
            &company_path.display().to_string(),
        )?;

        let holidays_path = path.join("holidays.yaml");
        let holidays = Self::parse_yaml::<HolidaysConfig>(
            &Self::read_file(&holidays_path)?,
            &holidays_path.display().to_string(),
        )?;

        let loader = Self::assemble(company, holidays)?;
        tracing::debug!(
            path = %path.display(),
            holidays = loader.calendar().holidays().len(),
            "Loaded payroll configuration"
        );
        Ok(loader)
    }

    /// Loads the configuration compiled into the crate.
    ///
    /// This is the same content as `config/enjoy_dive`.
    pub fn builtin() -> EngineResult<Self> {
        let company = Self::parse_yaml::<CompanyConfig>(BUILTIN_COMPANY, "<builtin>/company.yaml")?;
        let holidays =
            Self::parse_yaml::<HolidaysConfig>(BUILTIN_HOLIDAYS, "<builtin>/holidays.yaml")?;
        Self::assemble(company, holidays)
    }

    fn assemble(company: CompanyConfig, holidays: HolidaysConfig) -> EngineResult<Self> {
        let calendar = HolidayCalendar::new(holidays.holidays)?;
        let config = PayrollConfig::new(company.company, company.payroll, calendar)?;
        Ok(Self { config })
    }

    fn read_file(path: &Path) -> EngineResult<String> {
        fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path.display().to_string(),
        })
    }

    fn parse_yaml<T: serde::de::DeserializeOwned>(content: &str, path: &str) -> EngineResult<T> {
        serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the full payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        self.config.metadata()
    }

    /// Returns the payroll settings.
    pub fn settings(&self) -> &PayrollSettings {
        self.config.settings()
    }

    /// Returns the holiday calendar.
    pub fn calendar(&self) -> &HolidayCalendar {
        self.config.calendar()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HolidayType, Religion};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config_path() -> &'static str {
        "./config/enjoy_dive"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.company().name, "Enjoy Dive");
        assert_eq!(loader.company().currency, "IDR");
    }

    #[test]
    fn test_payroll_settings_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let settings = loader.settings();
        assert_eq!(settings.ppn_rate, dec("0.11"));
        assert_eq!(settings.tip_pool.base_amount, dec("15000000"));
        assert_eq!(settings.tip_pool.max_variation, dec("0.15"));
        assert_eq!(settings.tip_pool.eligible_headcount, 20);
    }

    #[test]
    fn test_holiday_calendar_loaded_in_order() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let holidays = loader.calendar().holidays();
        assert_eq!(holidays.len(), 7);
        assert_eq!(holidays[0].id, "idul_fitri_2024");
        assert_eq!(holidays[0].holiday_type, HolidayType::IdulFitri);
        assert_eq!(holidays[0].allowance_multiplier, dec("1.0"));
        assert_eq!(holidays[6].id, "anniversary_2025");
        assert!(holidays[6].is_eligible(Religion::Other));
    }

    #[test]
    fn test_builtin_matches_directory() {
        let builtin = ConfigLoader::builtin().unwrap();
        let loaded = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(builtin.calendar().holidays(), loaded.calendar().holidays());
        assert_eq!(builtin.settings().ppn_rate, loaded.settings().ppn_rate);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("company.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_parse_error_reports_path() {
        let result = ConfigLoader::parse_yaml::<HolidaysConfig>("holidays: [", "bad.yaml");

        match result {
            Err(EngineError::ConfigParseError { path, .. }) => assert_eq!(path, "bad.yaml"),
            _ => panic!("Expected ConfigParseError"),
        }
    }
}
