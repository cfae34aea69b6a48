//! Fixed-share partition: split by participation weight and manager multiplier

use super::split::{equal_split, proportional_split};
use crate::ledger::{finite_non_negative, Associate};
use log::info;

/// Participation weight after the manager multiplier
pub fn effective_weight(associate: &Associate, manager_weight: f64) -> f64 {
    let multiplier = if associate.is_manager { manager_weight } else { 1.0 };
    finite_non_negative(associate.participation_weight) * multiplier
}

/// Base share of `total_fixed_share` for each associate, in input order
pub fn fixed_shares(associates: &[Associate], total_fixed_share: f64, manager_weight: f64) -> Vec<f64> {
    let weights: Vec<f64> = associates
        .iter()
        .map(|a| effective_weight(a, manager_weight))
        .collect();

    proportional_split(total_fixed_share, &weights).unwrap_or_else(|| {
        info!("No positive participation weight; splitting fixed share equally");
        equal_split(total_fixed_share, associates.len())
    })
}
