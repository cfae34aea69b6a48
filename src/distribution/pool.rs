//! Distributable pool for a fiscal year

use crate::ledger::{finite_non_negative, Expense, Revenue};
use serde::{Deserialize, Serialize};

/// Yearly totals feeding the distribution
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PoolTotals {
    /// ACI revenue for the year, the only revenue that is distributed
    pub total_aci_revenue: f64,
    /// All revenue for the year, informational
    pub total_revenue: f64,
    /// Expenses dated in the year
    pub total_expenses: f64,
    /// ACI revenue minus expenses
    pub net_amount: f64,
}

impl PoolTotals {
    /// Sum revenue and expenses dated in `year`
    ///
    /// Expenses are filtered to the same year as revenue, so an expense
    /// booked in another fiscal year never reduces this year's pool.
    pub fn compute(revenues: &[Revenue], expenses: &[Expense], year: i32) -> Self {
        let mut total_aci_revenue = 0.0;
        let mut total_revenue = 0.0;
        for revenue in revenues.iter().filter(|r| r.in_year(year)) {
            let amount = finite_non_negative(revenue.amount);
            total_revenue += amount;
            if revenue.is_aci() {
                total_aci_revenue += amount;
            }
        }

        let total_expenses: f64 = expenses
            .iter()
            .filter(|e| e.in_year(year))
            .map(|e| finite_non_negative(e.amount))
            .sum();

        Self {
            total_aci_revenue,
            total_revenue,
            total_expenses,
            net_amount: total_aci_revenue - total_expenses,
        }
    }

    /// Whether there is anything to distribute
    pub fn has_pool(&self) -> bool {
        self.net_amount > 0.0
    }
}
