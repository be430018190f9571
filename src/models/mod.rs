//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod holiday;
mod pay_period;
mod pay_slip;

pub use employee::{
    AllowanceBases, DeductionBases, Employee, EmployeeStatus, MAX_AMOUNT, Religion, TipRole,
};
pub use holiday::{AllReligions, EligibleReligions, HolidayEntry, HolidayType};
pub use pay_period::PayPeriod;
pub use pay_slip::{
    AllowanceBreakdown, AuditStep, AuditTrace, AuditWarning, DeductionBreakdown, PaySlip,
};

#[cfg(test)]
pub(crate) use employee::tests::create_test_employee;
