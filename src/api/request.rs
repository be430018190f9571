//! Request types for the payroll API.
//!
//! Employee records arrive from an external store, so the numeric fields
//! are optional on the wire. A record missing one of them is rejected when
//! it is converted into an [`Employee`], not while parsing JSON, so a batch
//! can report it alongside the employees that were paid.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AllowanceBases, DeductionBases, Employee, EmployeeStatus, PayPeriod, Religion, TipRole,
};
use crate::report::PayrollEntry;

/// Request body for `POST /payroll/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatePayrollRequest {
    /// The employee record.
    pub employee: EmployeeRequest,
    /// The pay period as "M/YYYY".
    pub period: String,
    /// Overtime hours worked; zero when absent.
    #[serde(default)]
    pub overtime_hours: Option<Decimal>,
}

impl CalculatePayrollRequest {
    /// Parses the pay period.
    pub fn pay_period(&self) -> EngineResult<PayPeriod> {
        self.period.parse()
    }
}

/// Request body for `POST /payroll/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSummaryRequest {
    /// The pay period as "M/YYYY".
    pub period: String,
    /// Employees to pay.
    pub employees: Vec<PayrollEntryRequest>,
}

/// One employee in a summary request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollEntryRequest {
    /// The employee record.
    pub employee: EmployeeRequest,
    /// Overtime hours worked; zero when absent.
    #[serde(default)]
    pub overtime_hours: Option<Decimal>,
}

impl TryFrom<PayrollEntryRequest> for PayrollEntry {
    type Error = EngineError;

    fn try_from(req: PayrollEntryRequest) -> EngineResult<Self> {
        Ok(PayrollEntry {
            employee: req.employee.try_into()?,
            overtime_hours: req.overtime_hours.unwrap_or_default(),
        })
    }
}

/// Employee record as submitted by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Position title.
    pub position: String,
    /// Department name.
    pub department: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// Bank account for salary transfer.
    #[serde(default)]
    pub bank_account: String,
    /// The date the employee joined.
    pub join_date: NaiveDate,
    /// Employment status; active when absent.
    #[serde(default)]
    pub status: Option<EmployeeStatus>,
    /// Monthly base salary. Required.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// Overtime pay per hour.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
    /// Stored allowance amounts. Required, with every field present.
    #[serde(default)]
    pub allowances: Option<AllowancesRequest>,
    /// Stored deduction amounts. Required, with every field present.
    #[serde(default)]
    pub deductions: Option<DeductionsRequest>,
    /// Religion. Required.
    #[serde(default)]
    pub religion: Option<Religion>,
    /// Whether the employee is management staff.
    #[serde(default)]
    pub is_management: bool,
    /// Tip-pool role; derived from the position title when absent.
    #[serde(default)]
    pub tip_role: Option<TipRole>,
}

/// Allowance amounts as submitted; each field is checked on conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowancesRequest {
    /// Transport allowance.
    pub transport: Option<Decimal>,
    /// Meal allowance.
    pub meal: Option<Decimal>,
    /// Fixed bonus.
    pub bonus: Option<Decimal>,
    /// Baseline tips.
    pub tips: Option<Decimal>,
    /// Baseline holiday allowance.
    pub holiday_allowance: Option<Decimal>,
}

/// Deduction amounts as submitted; each field is checked on conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionsRequest {
    /// Income tax withholding.
    pub tax: Option<Decimal>,
    /// Insurance premium.
    pub insurance: Option<Decimal>,
    /// Other deductions.
    pub other: Option<Decimal>,
    /// Cooperative fund contribution.
    pub cooperative_fund: Option<Decimal>,
    /// Health insurance contribution.
    pub health_insurance: Option<Decimal>,
    /// Loan repayment.
    pub loan_deduction: Option<Decimal>,
}

impl TryFrom<EmployeeRequest> for Employee {
    type Error = EngineError;

    fn try_from(req: EmployeeRequest) -> EngineResult<Self> {
        let missing = |field: &str| EngineError::MissingEmployeeField {
            employee_id: req.id.clone(),
            field: field.to_string(),
        };

        let base_salary = req.base_salary.ok_or_else(|| missing("base_salary"))?;
        let allowances = req.allowances.ok_or_else(|| missing("allowances"))?;
        let allowances = AllowanceBases {
            transport: allowances
                .transport
                .ok_or_else(|| missing("allowances.transport"))?,
            meal: allowances.meal.ok_or_else(|| missing("allowances.meal"))?,
            bonus: allowances.bonus.ok_or_else(|| missing("allowances.bonus"))?,
            tips: allowances.tips.ok_or_else(|| missing("allowances.tips"))?,
            holiday_allowance: allowances
                .holiday_allowance
                .ok_or_else(|| missing("allowances.holiday_allowance"))?,
        };
        let deductions = req.deductions.ok_or_else(|| missing("deductions"))?;
        let deductions = DeductionBases {
            tax: deductions.tax.ok_or_else(|| missing("deductions.tax"))?,
            insurance: deductions
                .insurance
                .ok_or_else(|| missing("deductions.insurance"))?,
            other: deductions.other.ok_or_else(|| missing("deductions.other"))?,
            cooperative_fund: deductions
                .cooperative_fund
                .ok_or_else(|| missing("deductions.cooperative_fund"))?,
            health_insurance: deductions
                .health_insurance
                .ok_or_else(|| missing("deductions.health_insurance"))?,
            loan_deduction: deductions
                .loan_deduction
                .ok_or_else(|| missing("deductions.loan_deduction"))?,
        };
        let religion = req.religion.ok_or_else(|| missing("religion"))?;
        let tip_role = req.tip_role.or_else(|| TipRole::from_position(&req.position));

        Ok(Employee {
            id: req.id,
            name: req.name,
            position: req.position,
            department: req.department,
            email: req.email,
            phone: req.phone,
            bank_account: req.bank_account,
            join_date: req.join_date,
            status: req.status.unwrap_or(EmployeeStatus::Active),
            base_salary,
            overtime_rate: req.overtime_rate,
            allowances,
            deductions,
            religion,
            is_management: req.is_management,
            tip_role,
        })
    }
}
