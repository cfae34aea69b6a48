//! Distribution engine: read a snapshot, then allocate the pool

use super::attendance::attendance_shares;
use super::error::DistributionError;
use super::fixed::fixed_shares;
use super::pool::PoolTotals;
use super::project::project_shares;
use super::result::{assemble_shares, empty_result, ComponentShares, DistributionResult};
use crate::ledger::{LedgerReader, LedgerResult, LedgerSnapshot};
use crate::settings::{DistributionSettings, SettingsProvider};
use chrono::{Datelike, Local};
use log::{debug, info};
use rayon::prelude::*;
use std::collections::HashSet;

/// Computes distributions from a ledger and a settings store
pub struct DistributionEngine<L, S> {
    ledger: L,
    settings: S,
}

impl<L: LedgerReader, S: SettingsProvider> DistributionEngine<L, S> {
    pub fn new(ledger: L, settings: S) -> Self {
        Self { ledger, settings }
    }

    /// Compute the distribution for the current calendar year
    pub fn compute_current_year(&self) -> Result<DistributionResult, DistributionError> {
        self.compute_distribution(Local::now().year())
    }

    /// Compute the distribution of `year`'s pool
    ///
    /// All reads happen first; any read failure aborts with an error and no
    /// partial result.
    pub fn compute_distribution(&self, year: i32) -> Result<DistributionResult, DistributionError> {
        let settings = DistributionSettings::resolve(&self.settings)?;
        let snapshot = self.read_snapshot()?;
        Ok(allocate(&snapshot, &settings, year))
    }

    /// Read every collection the allocation needs
    pub fn read_snapshot(&self) -> Result<LedgerSnapshot, DistributionError> {
        let projects = read("projects", self.ledger.list_active_projects())?;
        let active_ids: HashSet<_> = projects.iter().map(|p| p.id).collect();
        let assignments = read("assignments", self.ledger.list_all_assignments())?
            .into_iter()
            .filter(|a| active_ids.contains(&a.project_id))
            .collect();

        Ok(LedgerSnapshot {
            associates: read("associates", self.ledger.list_associates())?,
            revenues: read("revenues", self.ledger.list_revenues())?,
            expenses: read("expenses", self.ledger.list_expenses())?,
            meetings: read("meetings", self.ledger.list_meetings())?,
            attendances: read("attendances", self.ledger.list_all_attendances())?,
            projects,
            assignments,
        })
    }
}

impl<L, S> DistributionEngine<L, S>
where
    L: LedgerReader + Sync,
    S: SettingsProvider + Sync,
{
    /// Compute several years in parallel, results in the order requested
    pub fn compute_many(&self, years: &[i32]) -> Result<Vec<DistributionResult>, DistributionError> {
        years
            .par_iter()
            .map(|&year| self.compute_distribution(year))
            .collect()
    }
}

fn read<T>(collection: &'static str, result: LedgerResult<T>) -> Result<T, DistributionError> {
    result.map_err(|source| DistributionError::Ledger { collection, source })
}

/// Split `year`'s net pool among the snapshot's associates
///
/// Pure: the same snapshot and settings always give the same result.
pub fn allocate(
    snapshot: &LedgerSnapshot,
    settings: &DistributionSettings,
    year: i32,
) -> DistributionResult {
    let totals = PoolTotals::compute(&snapshot.revenues, &snapshot.expenses, year);
    let active_projects: Vec<_> = snapshot
        .projects
        .iter()
        .filter(|p| p.is_active())
        .cloned()
        .collect();

    debug!(
        "Year {}: ACI revenue {:.2}, total revenue {:.2}, expenses {:.2}, net {:.2}",
        year, totals.total_aci_revenue, totals.total_revenue, totals.total_expenses, totals.net_amount
    );

    let associates = &snapshot.associates;
    if !totals.has_pool() || associates.is_empty() {
        info!(
            "Nothing to distribute for {} (net {:.2}, {} associates)",
            year,
            totals.net_amount,
            associates.len()
        );
        return empty_result(year, totals, *settings, snapshot.meetings.clone(), active_projects);
    }

    let net = totals.net_amount;
    let total_fixed_share = net * settings.fixed_share_percentage;
    let total_rcp_share = net * settings.rcp_share_percentage;
    let total_project_share = net * settings.project_share_percentage;

    // The three partitions share no state
    let (base, (attendance, projects)) = rayon::join(
        || fixed_shares(associates, total_fixed_share, settings.manager_weight),
        || {
            rayon::join(
                || {
                    attendance_shares(
                        associates,
                        &snapshot.meetings,
                        &snapshot.attendances,
                        total_rcp_share,
                    )
                },
                || {
                    project_shares(
                        associates,
                        &active_projects,
                        &snapshot.assignments,
                        total_project_share,
                    )
                },
            )
        },
    );

    let associate_shares = assemble_shares(
        associates,
        &ComponentShares {
            base,
            rcp: attendance.shares,
            project: projects.shares,
        },
    );

    info!(
        "Distributed {:.2} of {:.2} across {} associates for {}",
        associate_shares.iter().map(|s| s.total_share).sum::<f64>(),
        net,
        associate_shares.len(),
        year
    );

    DistributionResult {
        year,
        total_aci_revenue: totals.total_aci_revenue,
        total_revenue: totals.total_revenue,
        total_expenses: totals.total_expenses,
        net_amount: net,
        settings: *settings,
        associate_shares,
        rcp_attendance: attendance.breakdown,
        project_contributions: projects.breakdown,
        meetings: snapshot.meetings.clone(),
        projects: active_projects,
    }
}
