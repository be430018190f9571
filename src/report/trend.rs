//! Month-over-month payroll trend.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::calculation::TipPoolDraw;
use crate::config::PayrollConfig;
use crate::models::PayPeriod;

use super::summary::{PayrollEntry, summarize_period};

/// Payroll totals for one month of a trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// The pay period.
    pub period: PayPeriod,
    /// Sum of net salaries paid in the period.
    pub total_net_salary: Decimal,
    /// Employees paid in the period.
    pub employee_count: u32,
    /// Change from the previous point in percent, two decimals. `None` for
    /// the first point or when the previous total is zero.
    pub growth_percent: Option<Decimal>,
}

/// Builds a trend of `months` consecutive periods ending at `end_period`,
/// oldest first.
///
/// The same employee list is paid in every period, so differences between
/// points come from holidays and the monthly tip pool.
pub fn monthly_trend(
    entries: &[PayrollEntry],
    end_period: &PayPeriod,
    months: u32,
    config: &PayrollConfig,
    tip_draw: &dyn TipPoolDraw,
) -> Vec<TrendPoint> {
    let mut periods = Vec::with_capacity(months as usize);
    let mut current = Some(*end_period);
    while periods.len() < months as usize {
        let Some(period) = current else { break };
        periods.push(period);
        current = period.previous();
    }
    periods.reverse();

    let mut points: Vec<TrendPoint> = Vec::with_capacity(periods.len());
    for period in periods {
        let summary = summarize_period(entries, &period, config, tip_draw);
        let growth_percent = points
            .last()
            .and_then(|prev| growth(prev.total_net_salary, summary.total_net_salary));

        points.push(TrendPoint {
            period,
            total_net_salary: summary.total_net_salary,
            employee_count: summary.paid_employees(),
            growth_percent,
        });
    }
    points
}

fn growth(previous: Decimal, current: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    Some(
        ((current - previous) / previous * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
    )
}
