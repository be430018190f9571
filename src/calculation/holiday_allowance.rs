//! Holiday allowance (THR) calculation.
//!
//! Every employee is paid their stored baseline holiday allowance. When a
//! holiday the employee's religion qualifies for falls in the pay period,
//! a bonus of `base_salary × allowance_multiplier` is added on top.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::HolidayCalendar;
use crate::models::{AuditStep, AuditWarning, Employee, HolidayType, PayPeriod};

use super::holiday_resolver::{resolve_all_holidays, resolve_holiday_for_religion};

/// The result of a holiday allowance calculation.
#[derive(Debug, Clone)]
pub struct HolidayAllowanceResult {
    /// Baseline plus any holiday bonus.
    pub amount: Decimal,
    /// The bonus part alone (zero when no holiday applied).
    pub holiday_bonus: Decimal,
    /// The holiday whose bonus was applied.
    pub holiday_type: Option<HolidayType>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Set when a holiday fell in the period but the employee did not qualify.
    pub warning: Option<AuditWarning>,
}

/// Calculates the holiday allowance for an employee in a pay period.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_holiday_allowance;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::{
///     AllowanceBases, DeductionBases, Employee, EmployeeStatus, HolidayType, Religion,
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
/// let result = calculate_holiday_allowance(&employee, &period, config.calendar(), 1);
/// assert_eq!(result.amount, Decimal::from(10_000_000));
/// assert_eq!(result.holiday_type, Some(HolidayType::IdulFitri));
/// ```
pub fn calculate_holiday_allowance(
    employee: &Employee,
    period: &PayPeriod,
    calendar: &HolidayCalendar,
    step_number: u32,
) -> HolidayAllowanceResult {
    let baseline = employee.allowances.holiday_allowance;
    let in_period = resolve_all_holidays(calendar, period);
    let applicable = resolve_holiday_for_religion(calendar, period, employee.religion);

    let Some(holiday) = applicable else {
        let holiday_ids: Vec<&str> = in_period.iter().map(|h| h.id.as_str()).collect();
        let (reasoning, warning) = if in_period.is_empty() {
            (
                format!(
                    "No active holiday in {} - baseline holiday allowance {} paid",
                    period,
                    baseline.normalize()
                ),
                None,
            )
        } else {
            (
                format!(
                    "Holiday {} falls in {} but religion '{:?}' is not eligible - baseline {} paid",
                    holiday_ids.join(", "),
                    period,
                    employee.religion,
                    baseline.normalize()
                ),
                Some(AuditWarning {
                    code: "HOLIDAY_NOT_ELIGIBLE".to_string(),
                    message: format!(
                        "Employee {} does not qualify for holiday {} in {}",
                        employee.id,
                        holiday_ids.join(", "),
                        period
                    ),
                    severity: "low".to_string(),
                }),
            )
        };

        debug!(
            employee_id = %employee.id,
            period = %period,
            holidays_in_period = in_period.len(),
            "No holiday bonus applies"
        );

        return HolidayAllowanceResult {
            amount: baseline,
            holiday_bonus: Decimal::ZERO,
            holiday_type: None,
            audit_step: AuditStep {
                step_number,
                rule_id: "holiday_allowance".to_string(),
                rule_name: "Holiday Allowance".to_string(),
                input: serde_json::json!({
                    "employee_id": employee.id,
                    "period": period.to_string(),
                    "religion": employee.religion,
                    "holidays_in_period": holiday_ids,
                    "baseline": baseline.normalize().to_string()
                }),
                output: serde_json::json!({
                    "eligible": false,
                    "holiday_bonus": "0",
                    "amount": baseline.normalize().to_string()
                }),
                reasoning,
            },
            warning,
        };
    };

    let holiday_bonus = employee.base_salary * holiday.allowance_multiplier;
    let amount = baseline + holiday_bonus;

    debug!(
        employee_id = %employee.id,
        period = %period,
        holiday = %holiday.id,
        holiday_bonus = %holiday_bonus,
        "Holiday bonus applied"
    );

    HolidayAllowanceResult {
        amount,
        holiday_bonus,
        holiday_type: Some(holiday.holiday_type),
        audit_step: AuditStep {
            step_number,
            rule_id: "holiday_allowance".to_string(),
            rule_name: "Holiday Allowance".to_string(),
            input: serde_json::json!({
                "employee_id": employee.id,
                "period": period.to_string(),
                "religion": employee.religion,
                "holiday_id": holiday.id,
                "base_salary": employee.base_salary.normalize().to_string(),
                "allowance_multiplier": holiday.allowance_multiplier.normalize().to_string(),
                "baseline": baseline.normalize().to_string()
            }),
            output: serde_json::json!({
                "eligible": true,
                "holiday_type": holiday.holiday_type,
                "holiday_bonus": holiday_bonus.normalize().to_string(),
                "amount": amount.normalize().to_string()
            }),
            reasoning: format!(
                "{}: {} × {} = {} plus baseline {} = {}",
                holiday.name,
                employee.base_salary.normalize(),
                holiday.allowance_multiplier.normalize(),
                holiday_bonus.normalize(),
                baseline.normalize(),
                amount.normalize()
            ),
        },
        warning: None,
    }
}
