//! Distribution result and per-associate share rows

use super::attendance::AttendanceBreakdown;
use super::pool::PoolTotals;
use super::project::ContributionBreakdown;
use super::split::percentage_of;
use crate::ledger::{Associate, AssociateId, Meeting, Project};
use crate::settings::DistributionSettings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One associate's slice of the pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociateShare {
    pub associate_id: AssociateId,
    pub name: String,
    pub profession: String,
    pub is_manager: bool,
    /// From the fixed-share partition
    pub base_share: f64,
    /// From the attendance-share partition
    pub rcp_share: f64,
    /// From the project-share partition
    pub project_share: f64,
    pub total_share: f64,
    /// Share of everything distributed (0-100)
    pub percentage_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionResult {
    pub year: i32,
    pub total_aci_revenue: f64,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub net_amount: f64,
    /// Weights the run was computed with
    pub settings: DistributionSettings,
    /// Sorted by total share, largest first
    pub associate_shares: Vec<AssociateShare>,
    pub rcp_attendance: BTreeMap<AssociateId, AttendanceBreakdown>,
    pub project_contributions: BTreeMap<AssociateId, ContributionBreakdown>,
    pub meetings: Vec<Meeting>,
    /// Active projects considered by the project partition
    pub projects: Vec<Project>,
}

impl DistributionResult {
    /// Sum of every associate's total share
    pub fn total_distributed(&self) -> f64 {
        self.associate_shares.iter().map(|s| s.total_share).sum()
    }

    pub fn share_for(&self, associate_id: AssociateId) -> Option<&AssociateShare> {
        self.associate_shares
            .iter()
            .find(|s| s.associate_id == associate_id)
    }

    pub fn is_empty(&self) -> bool {
        self.associate_shares.is_empty()
    }
}

/// Per-associate component shares, each aligned with the associate slice
pub struct ComponentShares {
    pub base: Vec<f64>,
    pub rcp: Vec<f64>,
    pub project: Vec<f64>,
}

/// Merge component shares into sorted rows with percentages
///
/// Ties on total share keep the input order.
pub fn assemble_shares(associates: &[Associate], components: &ComponentShares) -> Vec<AssociateShare> {
    let mut shares: Vec<AssociateShare> = associates
        .iter()
        .enumerate()
        .map(|(idx, associate)| {
            let base_share = components.base.get(idx).copied().unwrap_or(0.0);
            let rcp_share = components.rcp.get(idx).copied().unwrap_or(0.0);
            let project_share = components.project.get(idx).copied().unwrap_or(0.0);
            AssociateShare {
                associate_id: associate.id,
                name: associate.name.clone(),
                profession: associate.profession.clone(),
                is_manager: associate.is_manager,
                base_share,
                rcp_share,
                project_share,
                total_share: base_share + rcp_share + project_share,
                percentage_share: 0.0,
            }
        })
        .collect();

    let distributed: f64 = shares.iter().map(|s| s.total_share).sum();
    for share in &mut shares {
        share.percentage_share = percentage_of(share.total_share, distributed);
    }

    // sort_by is stable
    shares.sort_by(|a, b| b.total_share.total_cmp(&a.total_share));
    shares
}

/// Result carrying only the totals, used when there is nothing to distribute
pub(crate) fn empty_result(
    year: i32,
    totals: PoolTotals,
    settings: DistributionSettings,
    meetings: Vec<Meeting>,
    projects: Vec<Project>,
) -> DistributionResult {
    DistributionResult {
        year,
        total_aci_revenue: totals.total_aci_revenue,
        total_revenue: totals.total_revenue,
        total_expenses: totals.total_expenses,
        net_amount: totals.net_amount,
        settings,
        associate_shares: Vec::new(),
        rcp_attendance: BTreeMap::new(),
        project_contributions: BTreeMap::new(),
        meetings,
        projects,
    }
}
