//! Period payroll summary.
//!
//! Runs the pay slip calculation for every active employee in a period and
//! aggregates the results. A failing employee is recorded and skipped; it
//! never aborts the batch.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculation::{TipPoolDraw, calculate_payroll};
use crate::config::PayrollConfig;
use crate::error::{EngineError, ErrorKind};
use crate::models::{Employee, PayPeriod, PaySlip};

/// One employee's input to a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollEntry {
    /// The employee record.
    pub employee: Employee,
    /// Overtime hours worked in the period.
    #[serde(default)]
    pub overtime_hours: Decimal,
}

impl PayrollEntry {
    /// Creates an entry with no overtime.
    pub fn new(employee: Employee) -> Self {
        Self {
            employee,
            overtime_hours: Decimal::ZERO,
        }
    }
}

/// An employee whose pay slip could not be calculated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollFailure {
    /// The employee that failed.
    pub employee_id: String,
    /// The error category.
    pub kind: ErrorKind,
    /// The error message.
    pub message: String,
}

impl PayrollFailure {
    /// Records a failure for `employee_id`.
    pub fn new(employee_id: impl Into<String>, error: &EngineError) -> Self {
        Self {
            employee_id: employee_id.into(),
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Net salary totals for one department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentTotal {
    /// Department name.
    pub department: String,
    /// Number of paid employees.
    pub employee_count: u32,
    /// Sum of net salaries.
    pub total_net_salary: Decimal,
    /// Average net salary, rounded to whole currency units.
    pub average_net_salary: Decimal,
}

/// Number of employees whose net salary falls in a band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBand {
    /// Band label (e.g., "5M - 10M").
    pub range: String,
    /// Employees in the band.
    pub count: u32,
    /// Share of paid employees, in percent with two decimals.
    pub percentage: Decimal,
}

// (label, inclusive lower bound, exclusive upper bound)
const SALARY_BANDS: [(&str, i64, Option<i64>); 5] = [
    ("< 5M", 0, Some(5_000_000)),
    ("5M - 10M", 5_000_000, Some(10_000_000)),
    ("10M - 15M", 10_000_000, Some(15_000_000)),
    ("15M - 25M", 15_000_000, Some(25_000_000)),
    ("> 25M", 25_000_000, None),
];

/// Aggregated payroll for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// The pay period.
    pub period: PayPeriod,
    /// Every employee submitted, including inactive and failed ones.
    pub total_employees: u32,
    /// Employees with active status.
    pub active_employees: u32,
    /// Sum of gross salaries over computed slips.
    pub total_gross_salary: Decimal,
    /// Sum of net salaries over computed slips.
    pub total_net_salary: Decimal,
    /// Totals per department, sorted by department name.
    pub department_breakdown: Vec<DepartmentTotal>,
    /// Net salary distribution over computed slips.
    pub salary_distribution: Vec<SalaryBand>,
    /// The computed pay slips.
    pub pay_slips: Vec<PaySlip>,
    /// Employees that could not be paid.
    pub failures: Vec<PayrollFailure>,
}

impl PeriodSummary {
    /// Records an employee that failed before reaching the calculation,
    /// such as a record rejected at data entry.
    pub fn record_failure(&mut self, employee_id: impl Into<String>, error: &EngineError) {
        self.total_employees += 1;
        self.failures.push(PayrollFailure::new(employee_id, error));
    }

    /// Number of employees with a computed pay slip.
    pub fn paid_employees(&self) -> u32 {
        self.pay_slips.len() as u32
    }
}

/// Calculates pay slips for every active employee and aggregates them.
///
/// Inactive employees are counted in `total_employees` but not paid.
pub fn summarize_period(
    entries: &[PayrollEntry],
    period: &PayPeriod,
    config: &PayrollConfig,
    tip_draw: &dyn TipPoolDraw,
) -> PeriodSummary {
    let mut pay_slips = Vec::new();
    let mut failures = Vec::new();
    let mut active_employees = 0;

    for entry in entries {
        if !entry.employee.is_active() {
            continue;
        }
        active_employees += 1;

        match calculate_payroll(
            &entry.employee,
            period,
            entry.overtime_hours,
            config,
            tip_draw,
        ) {
            Ok(slip) => pay_slips.push(slip),
            Err(err) => {
                warn!(
                    employee_id = %entry.employee.id,
                    period = %period,
                    error = %err,
                    "Skipping employee in period summary"
                );
                failures.push(PayrollFailure::new(entry.employee.id.clone(), &err));
            }
        }
    }

    let total_gross_salary: Decimal = pay_slips.iter().map(|s| s.gross_salary).sum();
    let total_net_salary: Decimal = pay_slips.iter().map(|s| s.net_salary).sum();

    info!(
        period = %period,
        employees = entries.len(),
        paid = pay_slips.len(),
        failed = failures.len(),
        total_net_salary = %total_net_salary,
        "Period summary completed"
    );

    PeriodSummary {
        period: *period,
        total_employees: entries.len() as u32,
        active_employees,
        total_gross_salary,
        total_net_salary,
        department_breakdown: department_breakdown(&pay_slips),
        salary_distribution: salary_distribution(&pay_slips),
        pay_slips,
        failures,
    }
}

fn department_breakdown(pay_slips: &[PaySlip]) -> Vec<DepartmentTotal> {
    let mut by_department: BTreeMap<&str, (u32, Decimal)> = BTreeMap::new();
    for slip in pay_slips {
        let totals = by_department
            .entry(slip.employee.department.as_str())
            .or_insert((0, Decimal::ZERO));
        totals.0 += 1;
        totals.1 += slip.net_salary;
    }

    by_department
        .into_iter()
        .map(|(department, (count, total))| DepartmentTotal {
            department: department.to_string(),
            employee_count: count,
            total_net_salary: total,
            average_net_salary: (total / Decimal::from(count))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        })
        .collect()
}

fn salary_distribution(pay_slips: &[PaySlip]) -> Vec<SalaryBand> {
    let paid = pay_slips.len();

    SALARY_BANDS
        .iter()
        .map(|(label, min, max)| {
            let min = Decimal::from(*min);
            let max = max.map(Decimal::from);
            let count = pay_slips
                .iter()
                .filter(|s| {
                    // Negative net salaries fall in the lowest band
                    (s.net_salary >= min || min.is_zero())
                        && max.is_none_or(|max| s.net_salary < max)
                })
                .count();
            let percentage = if paid == 0 {
                Decimal::ZERO
            } else {
                (Decimal::from(count as u64) * Decimal::ONE_HUNDRED / Decimal::from(paid as u64))
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            };
            SalaryBand {
                range: label.to_string(),
                count: count as u32,
                percentage,
            }
        })
        .collect()
}
