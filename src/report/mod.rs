//! Batch reports over many employees: the period summary and the monthly
//! trend.

mod summary;
mod trend;

pub use summary::{
    DepartmentTotal, PayrollEntry, PayrollFailure, PeriodSummary, SalaryBand, summarize_period,
};
pub use trend::{TrendPoint, monthly_trend};
