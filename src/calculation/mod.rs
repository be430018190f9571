//! Calculation logic for the payroll engine.
//!
//! This module contains the holiday resolver, the holiday allowance
//! calculation, the tip pool distribution, and the pay slip calculation
//! that orchestrates them.

mod holiday_allowance;
mod holiday_resolver;
mod payroll;
mod tip_distribution;

pub use holiday_allowance::{HolidayAllowanceResult, calculate_holiday_allowance};
pub use holiday_resolver::{resolve_all_holidays, resolve_holiday, resolve_holiday_for_religion};
pub use payroll::{MAX_OVERTIME_HOURS, calculate_payroll};
pub use tip_distribution::{
    FixedTipDraw, SeededTipDraw, TipDistributionResult, TipPoolDraw, distribute_tips,
};
