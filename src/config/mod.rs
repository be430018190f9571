//! Configuration loading and management for the payroll engine.
//!
//! This module loads the company's payroll settings and holiday calendar
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/enjoy_dive").unwrap();
//! println!("PPN rate: {}", config.settings().ppn_rate);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CompanyConfig, CompanyMetadata, HolidayCalendar, HolidaysConfig, PayrollConfig,
    PayrollSettings, TipPoolSettings,
};
