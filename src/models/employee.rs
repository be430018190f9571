//! Employee model and related types.
//!
//! This module defines the [`Employee`] record consumed by the payroll
//! engine, together with its compensation bases, religion and tip role.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest accepted money amount on an employee record, in rupiah.
///
/// Keeps every pay slip and period total well inside `Decimal` range.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Employment status of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed and paid.
    Active,
    /// No longer paid through payroll.
    Inactive,
}

/// Religion tag used to gate holiday allowances.
///
/// Both the Indonesian and the English spellings are accepted on input;
/// the Indonesian form is written back out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Religion {
    /// Islam.
    Islam,
    /// Protestant Christianity.
    #[serde(alias = "christian")]
    Kristen,
    /// Catholicism.
    #[serde(alias = "catholic")]
    Katolik,
    /// Hinduism.
    Hindu,
    /// Buddhism.
    #[serde(alias = "buddhist")]
    Budha,
    /// Any other religion or none.
    Other,
}

impl Religion {
    /// Every religion tag, in declaration order.
    pub const ALL: [Religion; 6] = [
        Religion::Islam,
        Religion::Kristen,
        Religion::Katolik,
        Religion::Hindu,
        Religion::Budha,
        Religion::Other,
    ];
}

/// Front-line positions that share in the company tip pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipRole {
    /// Dive master.
    DiveMaster,
    /// Senior dive master.
    SeniorDiveMaster,
    /// Driver.
    Driver,
    /// Senior driver.
    SeniorDriver,
    /// Diving instructor.
    DivingInstructor,
    /// Senior diving instructor.
    SeniorDivingInstructor,
}

impl TipRole {
    // Longest titles first so "senior dive master" is not read as "dive master".
    const POSITION_TITLES: [(&'static str, TipRole); 6] = [
        ("senior diving instructor", TipRole::SeniorDivingInstructor),
        ("senior dive master", TipRole::SeniorDiveMaster),
        ("diving instructor", TipRole::DivingInstructor),
        ("senior driver", TipRole::SeniorDriver),
        ("dive master", TipRole::DiveMaster),
        ("driver", TipRole::Driver),
    ];

    /// Derives a tip role from a free-text position title.
    ///
    /// Matching is a case-insensitive substring search. This exists for
    /// records entered before roles were explicit; the engine itself only
    /// looks at [`Employee::tip_role`].
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::TipRole;
    ///
    /// assert_eq!(TipRole::from_position("Senior Dive Master"), Some(TipRole::SeniorDiveMaster));
    /// assert_eq!(TipRole::from_position("Boat Driver"), Some(TipRole::Driver));
    /// assert_eq!(TipRole::from_position("Operations Manager"), None);
    /// ```
    pub fn from_position(position: &str) -> Option<TipRole> {
        let position = position.to_lowercase();
        Self::POSITION_TITLES
            .iter()
            .find(|(title, _)| position.contains(title))
            .map(|(_, role)| *role)
    }
}

/// Stored monthly allowance amounts.
///
/// Overtime is never stored; it is computed from hours and rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceBases {
    /// Transport allowance.
    pub transport: Decimal,
    /// Meal allowance.
    pub meal: Decimal,
    /// Fixed bonus.
    pub bonus: Decimal,
    /// Baseline tips paid regardless of the tip pool.
    pub tips: Decimal,
    /// Baseline holiday allowance paid every period.
    pub holiday_allowance: Decimal,
}

/// Stored monthly deduction amounts.
///
/// PPN is never stored; it is computed from gross salary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBases {
    /// Income tax withholding.
    pub tax: Decimal,
    /// Insurance premium.
    pub insurance: Decimal,
    /// Other deductions.
    pub other: Decimal,
    /// Cooperative fund contribution.
    pub cooperative_fund: Decimal,
    /// Health insurance (BPJS) contribution.
    pub health_insurance: Decimal,
    /// Loan repayment.
    pub loan_deduction: Decimal,
}

/// Represents an employee on the payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Position title as entered (e.g., "Senior Dive Master").
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
    /// Employment status.
    pub status: EmployeeStatus,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Overtime pay per hour, if the employee is paid overtime.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
    /// Stored allowance amounts.
    pub allowances: AllowanceBases,
    /// Stored deduction amounts.
    pub deductions: DeductionBases,
    /// Religion, used for holiday allowance eligibility.
    pub religion: Religion,
    /// Management staff never share in the tip pool.
    pub is_management: bool,
    /// Tip-pool role, if the position shares in tips.
    #[serde(default)]
    pub tip_role: Option<TipRole>,
}

impl Employee {
    /// Returns true if the employee is currently active.
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }

    /// Returns true if the employee receives a share of the tip pool.
    ///
    /// Management status short-circuits eligibility regardless of role.
    pub fn is_tip_eligible(&self) -> bool {
        !self.is_management && self.tip_role.is_some()
    }

    /// Checks that every money field is non-negative and at most
    /// [`MAX_AMOUNT`] rupiah.
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("base_salary", Some(self.base_salary)),
            ("overtime_rate", self.overtime_rate),
            ("allowances.transport", Some(self.allowances.transport)),
            ("allowances.meal", Some(self.allowances.meal)),
            ("allowances.bonus", Some(self.allowances.bonus)),
            ("allowances.tips", Some(self.allowances.tips)),
            (
                "allowances.holiday_allowance",
                Some(self.allowances.holiday_allowance),
            ),
            ("deductions.tax", Some(self.deductions.tax)),
            ("deductions.insurance", Some(self.deductions.insurance)),
            ("deductions.other", Some(self.deductions.other)),
            (
                "deductions.cooperative_fund",
                Some(self.deductions.cooperative_fund),
            ),
            (
                "deductions.health_insurance",
                Some(self.deductions.health_insurance),
            ),
            (
                "deductions.loan_deduction",
                Some(self.deductions.loan_deduction),
            ),
        ];

        for (field, value) in fields {
            if let Some(value) = value {
                if value.is_sign_negative() && !value.is_zero() {
                    return Err(EngineError::InvalidEmployee {
                        field: field.to_string(),
                        message: format!("cannot be negative (got {})", value),
                    });
                }
                if value > Decimal::from(MAX_AMOUNT) {
                    return Err(EngineError::InvalidEmployee {
                        field: field.to_string(),
                        message: format!(
                            "exceeds the maximum of {} (got {})",
                            MAX_AMOUNT, value
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}
