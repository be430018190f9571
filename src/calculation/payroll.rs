//! Pay slip calculation.
//!
//! This is the orchestrating calculation: overtime pay, holiday allowance
//! and tip share are combined with the stored allowances into gross salary;
//! PPN is levied on gross; stored deductions and PPN give net salary.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllowanceBreakdown, AuditStep, AuditTrace, AuditWarning, DeductionBreakdown, Employee,
    PayPeriod, PaySlip,
};

use super::holiday_allowance::calculate_holiday_allowance;
use super::tip_distribution::{TipPoolDraw, distribute_tips};

/// Most overtime hours accepted for one month (31 days × 24 hours).
pub const MAX_OVERTIME_HOURS: i64 = 744;

/// Calculates the pay slip for an employee in a pay period.
///
/// # Arguments
///
/// * `employee` - The employee record
/// * `period` - The pay period
/// * `overtime_hours` - Overtime hours worked in the period (non-negative)
/// * `config` - Payroll settings and holiday calendar
/// * `tip_draw` - Source of the monthly tip pool variation
///
/// # Errors
///
/// * `NegativeOvertime` if `overtime_hours` is below zero
/// * `ExcessiveOvertime` if `overtime_hours` exceeds [`MAX_OVERTIME_HOURS`]
/// * `InvalidEmployee` if any money field of the employee is negative or
///   above [`MAX_AMOUNT`](crate::models::MAX_AMOUNT)
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_payroll, FixedTipDraw};
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{
///     AllowanceBases, DeductionBases, Employee, EmployeeStatus, Religion,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let config = ConfigLoader::builtin().unwrap();
/// let employee = Employee {
///     id: "EMP001".to_string(),
///     name: "Ahmad".to_string(),
///     position: "Accountant".to_string(),
///     department: "Finance".to_string(),
///     email: String::new(),
///     phone: String::new(),
///     bank_account: String::new(),
///     join_date: NaiveDate::from_ymd_opt(2020, 1, 6).unwrap(),
///     status: EmployeeStatus::Active,
///     base_salary: Decimal::from(10_000_000),
///     overtime_rate: None,
///     allowances: AllowanceBases::default(),
///     deductions: DeductionBases::default(),
///     religion: Religion::Islam,
///     is_management: false,
///     tip_role: None,
/// };
///
/// let period = "4/2024".parse().unwrap();
/// let slip = calculate_payroll(
///     &employee,
///     &period,
///     Decimal::ZERO,
///     config.config(),
///     &FixedTipDraw(Decimal::ZERO),
/// )
/// .unwrap();
///
/// assert_eq!(slip.id, "PS-EMP001-42024");
/// assert_eq!(slip.gross_salary, Decimal::from(20_000_000));
/// assert_eq!(slip.deductions.ppn, Decimal::from(2_200_000));
/// ```
pub fn calculate_payroll(
    employee: &Employee,
    period: &PayPeriod,
    overtime_hours: Decimal,
    config: &PayrollConfig,
    tip_draw: &dyn TipPoolDraw,
) -> EngineResult<PaySlip> {
    if overtime_hours < Decimal::ZERO {
        return Err(EngineError::NegativeOvertime {
            hours: overtime_hours,
        });
    }
    if overtime_hours > Decimal::from(MAX_OVERTIME_HOURS) {
        return Err(EngineError::ExcessiveOvertime {
            hours: overtime_hours,
            max: Decimal::from(MAX_OVERTIME_HOURS),
        });
    }
    employee.validate()?;

    let settings = config.settings();
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    // Overtime
    let overtime_rate = employee.overtime_rate.unwrap_or(Decimal::ZERO);
    let overtime_pay = overtime_hours * overtime_rate;
    if overtime_hours > Decimal::ZERO && employee.overtime_rate.is_none() {
        warnings.push(AuditWarning {
            code: "NO_OVERTIME_RATE".to_string(),
            message: format!(
                "{} overtime hours recorded for {} without an overtime rate - paid as 0",
                overtime_hours.normalize(),
                employee.id
            ),
            severity: "medium".to_string(),
        });
    }
    steps.push(AuditStep {
        step_number,
        rule_id: "overtime_pay".to_string(),
        rule_name: "Overtime Pay".to_string(),
        input: serde_json::json!({
            "overtime_hours": overtime_hours.normalize().to_string(),
            "overtime_rate": employee.overtime_rate.map(|r| r.normalize().to_string())
        }),
        output: serde_json::json!({
            "overtime_pay": overtime_pay.normalize().to_string()
        }),
        reasoning: format!(
            "{} hours × {} = {}",
            overtime_hours.normalize(),
            overtime_rate.normalize(),
            overtime_pay.normalize()
        ),
    });
    step_number += 1;

    // Holiday allowance
    let holiday = calculate_holiday_allowance(employee, period, config.calendar(), step_number);
    steps.push(holiday.audit_step);
    warnings.extend(holiday.warning);
    step_number += 1;

    // Tips
    let tips = if employee.is_tip_eligible() {
        let distribution = distribute_tips(&settings.tip_pool, period, tip_draw, step_number);
        steps.push(distribution.audit_step);
        employee.allowances.tips + distribution.share
    } else {
        let reason = if employee.is_management {
            "management staff do not share in the tip pool"
        } else {
            "position has no tip-pool role"
        };
        steps.push(AuditStep {
            step_number,
            rule_id: "tip_pool_eligibility".to_string(),
            rule_name: "Tip Pool Eligibility".to_string(),
            input: serde_json::json!({
                "employee_id": employee.id,
                "is_management": employee.is_management,
                "tip_role": employee.tip_role
            }),
            output: serde_json::json!({
                "eligible": false,
                "tips": employee.allowances.tips.normalize().to_string()
            }),
            reasoning: format!(
                "Not eligible: {} - baseline tips {} paid",
                reason,
                employee.allowances.tips.normalize()
            ),
        });
        employee.allowances.tips
    };
    step_number += 1;

    let allowances =
        AllowanceBreakdown::new(&employee.allowances, overtime_pay, tips, holiday.amount);
    let gross_salary = employee.base_salary + allowances.total;

    // PPN on gross
    let ppn = gross_salary * settings.ppn_rate;
    steps.push(AuditStep {
        step_number,
        rule_id: "ppn".to_string(),
        rule_name: "PPN".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "ppn_rate": settings.ppn_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "ppn": ppn.normalize().to_string()
        }),
        reasoning: format!(
            "{} × {} = {}",
            gross_salary.normalize(),
            settings.ppn_rate.normalize(),
            ppn.normalize()
        ),
    });

    let deductions = DeductionBreakdown::new(&employee.deductions, ppn);
    let net_salary = gross_salary - deductions.total;

    debug!(
        employee_id = %employee.id,
        period = %period,
        gross_salary = %gross_salary,
        net_salary = %net_salary,
        "Pay slip calculated"
    );

    Ok(PaySlip {
        id: PaySlip::slip_id(&employee.id, period),
        employee_id: employee.id.clone(),
        employee: employee.clone(),
        period: *period,
        base_salary: employee.base_salary,
        allowances,
        deductions,
        gross_salary,
        net_salary,
        generated_at: Utc::now(),
        overtime_hours,
        holiday_type: holiday.holiday_type,
        audit_trace: AuditTrace { steps, warnings },
    })
}
