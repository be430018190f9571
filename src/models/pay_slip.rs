//! Pay slip models for the payroll engine.
//!
//! This module contains the [`PaySlip`] type and its associated structures
//! that capture all outputs from a payroll calculation: the allowance and
//! deduction breakdowns, the derived gross and net salary, and an audit
//! trace of every rule decision.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AllowanceBases, DeductionBases, Employee, HolidayType, PayPeriod};

/// Itemised allowances on a pay slip.
///
/// `total` is the sum of every other field; [`AllowanceBreakdown::new`]
/// keeps it that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceBreakdown {
    /// Transport allowance.
    pub transport: Decimal,
    /// Meal allowance.
    pub meal: Decimal,
    /// Fixed bonus.
    pub bonus: Decimal,
    /// Overtime pay (hours × rate).
    pub overtime: Decimal,
    /// Baseline tips plus any tip-pool share.
    pub tips: Decimal,
    /// Baseline holiday allowance plus any holiday bonus.
    pub holiday_allowance: Decimal,
    /// Sum of all allowances.
    pub total: Decimal,
}

impl AllowanceBreakdown {
    /// Builds the breakdown from stored bases and the computed components.
    pub fn new(
        bases: &AllowanceBases,
        overtime: Decimal,
        tips: Decimal,
        holiday_allowance: Decimal,
    ) -> Self {
        let total =
            bases.transport + bases.meal + bases.bonus + tips + holiday_allowance + overtime;
        Self {
            transport: bases.transport,
            meal: bases.meal,
            bonus: bases.bonus,
            overtime,
            tips,
            holiday_allowance,
            total,
        }
    }
}

/// Itemised deductions on a pay slip.
///
/// `total` is the sum of every other field; [`DeductionBreakdown::new`]
/// keeps it that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Income tax withholding.
    pub tax: Decimal,
    /// Insurance premium.
    pub insurance: Decimal,
    /// Other deductions.
    pub other: Decimal,
    /// Cooperative fund contribution.
    pub cooperative_fund: Decimal,
    /// Health insurance contribution.
    pub health_insurance: Decimal,
    /// Loan repayment.
    pub loan_deduction: Decimal,
    /// PPN levied on gross salary.
    pub ppn: Decimal,
    /// Sum of all deductions.
    pub total: Decimal,
}

impl DeductionBreakdown {
    /// Builds the breakdown from stored bases and the computed PPN.
    pub fn new(bases: &DeductionBases, ppn: Decimal) -> Self {
        let total = bases.tax
            + bases.insurance
            + bases.other
            + bases.cooperative_fund
            + bases.health_insurance
            + bases.loan_deduction
            + ppn;
        Self {
            tax: bases.tax,
            insurance: bases.insurance,
            other: bases.other,
            cooperative_fund: bases.cooperative_fund,
            health_insurance: bases.health_insurance,
            loan_deduction: bases.loan_deduction,
            ppn,
            total,
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate conditions that do not prevent calculation but that a
/// payroll officer may want to review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The audit trace for one pay slip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

/// The computed, itemised compensation record for one employee in one period.
///
/// A pay slip is derived entirely from its inputs and is never stored by
/// the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaySlip {
    /// Identifier of the form `PS-{employee_id}-{M}{YYYY}`.
    pub id: String,
    /// The employee this slip is for.
    pub employee_id: String,
    /// Snapshot of the employee record used for the calculation.
    pub employee: Employee,
    /// The pay period.
    pub period: PayPeriod,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Itemised allowances.
    pub allowances: AllowanceBreakdown,
    /// Itemised deductions.
    pub deductions: DeductionBreakdown,
    /// Base salary plus all allowances.
    pub gross_salary: Decimal,
    /// Gross salary minus all deductions.
    pub net_salary: Decimal,
    /// When the slip was generated.
    pub generated_at: DateTime<Utc>,
    /// Overtime hours the slip was computed with.
    pub overtime_hours: Decimal,
    /// The holiday whose bonus was applied, if any.
    pub holiday_type: Option<HolidayType>,
    /// Rule decisions made while computing the slip.
    pub audit_trace: AuditTrace,
}

impl PaySlip {
    /// Builds the pay slip identifier for an employee and period.
    ///
    /// The id uses the parsed period, not the text it came from, so a
    /// zero-padded month is dropped: `"04/2024"` and `"4/2024"` both give
    /// the same id.
    ///
    /// ```
    /// use payroll_engine::models::PaySlip;
    ///
    /// let period = "4/2024".parse().unwrap();
    /// assert_eq!(PaySlip::slip_id("EMP001", &period), "PS-EMP001-42024");
    ///
    /// let padded = "04/2024".parse().unwrap();
    /// assert_eq!(PaySlip::slip_id("EMP001", &padded), "PS-EMP001-42024");
    /// ```
    pub fn slip_id(employee_id: &str, period: &PayPeriod) -> String {
        format!("PS-{}-{}", employee_id, period.compact())
    }
}
