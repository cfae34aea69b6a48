//! Project-share partition: split by weighted, normalized project contribution
//!
//! Contributions are entered on whatever scale the practice used for each
//! project. Before weighting, every project's contributions are rescaled so
//! they sum to 100:
//!
//! normalized = contribution / project_total × 100
//!
//! A project whose contributions already sum to exactly 100 is left as is,
//! and a project whose contributions sum to zero contributes nothing.

use super::attendance::associate_index;
use super::split::{equal_split, percentage_of, proportional_split};
use crate::ledger::{finite_non_negative, Associate, AssociateId, Assignment, Project, ProjectId};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Project involvement of one associate, for drill-down display
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionBreakdown {
    /// Number of distinct active projects the associate is assigned to
    pub project_count: usize,
    /// Share of all weighted contribution (0-100)
    pub percentage: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectPartition {
    /// Project share per associate, in input order
    pub shares: Vec<f64>,
    pub breakdown: BTreeMap<AssociateId, ContributionBreakdown>,
    pub total_contribution: f64,
}

/// Rescale one project's contributions onto a 0-100 scale
pub fn normalize_contributions(contributions: &[f64]) -> Vec<f64> {
    let project_total: f64 = contributions.iter().sum();
    if project_total == 100.0 {
        contributions.to_vec()
    } else if project_total > 0.0 {
        contributions
            .iter()
            .map(|c| c / project_total * 100.0)
            .collect()
    } else {
        vec![0.0; contributions.len()]
    }
}

/// Split `total_project_share` by weighted contribution to active projects
///
/// Falls back to an equal split when there is no active project, no
/// assignment to one, or the weighted contributions sum to zero.
pub fn project_shares(
    associates: &[Associate],
    projects: &[Project],
    assignments: &[Assignment],
    total_project_share: f64,
) -> ProjectPartition {
    let active: HashMap<ProjectId, f64> = projects
        .iter()
        .filter(|p| p.is_active())
        .map(|p| (p.id, p.effective_weight()))
        .collect();
    let index = associate_index(associates);

    // Group usable assignments by project, keeping the associate position
    let mut by_project: BTreeMap<ProjectId, Vec<(usize, f64)>> = BTreeMap::new();
    for assignment in assignments {
        if !active.contains_key(&assignment.project_id) {
            continue;
        }
        let Some(&idx) = index.get(&assignment.associate_id) else {
            debug!(
                "Assignment on project {} references unknown associate {}",
                assignment.project_id, assignment.associate_id
            );
            continue;
        };
        by_project
            .entry(assignment.project_id)
            .or_default()
            .push((idx, finite_non_negative(assignment.contribution)));
    }

    if active.is_empty() || by_project.is_empty() {
        info!("No assignments on active projects; splitting project share equally");
        return ProjectPartition {
            shares: equal_split(total_project_share, associates.len()),
            breakdown: associates
                .iter()
                .map(|a| (a.id, ContributionBreakdown::default()))
                .collect(),
            total_contribution: 0.0,
        };
    }

    let mut contribution = vec![0.0; associates.len()];
    let mut projects_of: Vec<HashSet<ProjectId>> = vec![HashSet::new(); associates.len()];
    for (project_id, entries) in &by_project {
        let weight = active[project_id];
        let raw: Vec<f64> = entries.iter().map(|(_, c)| *c).collect();
        let normalized = normalize_contributions(&raw);
        for ((idx, _), n) in entries.iter().zip(normalized) {
            contribution[*idx] += weight * n;
            projects_of[*idx].insert(*project_id);
        }
    }

    let total_contribution: f64 = contribution.iter().sum();
    let shares = proportional_split(total_project_share, &contribution).unwrap_or_else(|| {
        info!("Weighted project contribution is zero; splitting project share equally");
        equal_split(total_project_share, associates.len())
    });

    let mut breakdown = BTreeMap::new();
    for (idx, associate) in associates.iter().enumerate() {
        breakdown.entry(associate.id).or_insert(ContributionBreakdown {
            project_count: projects_of[idx].len(),
            percentage: percentage_of(contribution[idx], total_contribution),
        });
    }

    ProjectPartition {
        shares,
        breakdown,
        total_contribution,
    }
}
