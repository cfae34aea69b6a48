//! Attendance-share partition: split by verified meeting minutes

use super::split::{equal_split, percentage_of, proportional_split};
use crate::ledger::{Associate, AssociateId, Attendance, Meeting, MeetingId};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Minutes attended by one associate, for drill-down display
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceBreakdown {
    pub minutes: f64,
    /// Share of all attended minutes (0-100)
    pub percentage: f64,
}

#[derive(Debug, Clone, Default)]
pub struct AttendancePartition {
    /// Attendance share per associate, in input order
    pub shares: Vec<f64>,
    pub breakdown: BTreeMap<AssociateId, AttendanceBreakdown>,
    pub total_minutes: f64,
}

/// Split `total_rcp_share` by minutes of attended meetings
///
/// Attendance rows that are not marked attended, or that point at an
/// unknown meeting or associate, are ignored. When no minutes were recorded
/// at all the share is split equally.
pub fn attendance_shares(
    associates: &[Associate],
    meetings: &[Meeting],
    attendances: &[Attendance],
    total_rcp_share: f64,
) -> AttendancePartition {
    let meeting_minutes: HashMap<MeetingId, f64> = meetings
        .iter()
        .map(|m| (m.id, m.effective_minutes()))
        .collect();
    let index = associate_index(associates);

    let mut minutes = vec![0.0; associates.len()];
    for attendance in attendances.iter().filter(|a| a.attended) {
        let Some(&duration) = meeting_minutes.get(&attendance.meeting_id) else {
            debug!("Attendance references unknown meeting {}", attendance.meeting_id);
            continue;
        };
        let Some(&idx) = index.get(&attendance.associate_id) else {
            debug!("Attendance references unknown associate {}", attendance.associate_id);
            continue;
        };
        minutes[idx] += duration;
    }

    let total_minutes: f64 = minutes.iter().sum();
    let shares = proportional_split(total_rcp_share, &minutes).unwrap_or_else(|| {
        info!("No attended meeting minutes; splitting attendance share equally");
        equal_split(total_rcp_share, associates.len())
    });

    // First occurrence of an id holds the credit, as in associate_index
    let mut breakdown = BTreeMap::new();
    for (associate, &m) in associates.iter().zip(&minutes) {
        breakdown.entry(associate.id).or_insert(AttendanceBreakdown {
            minutes: m,
            percentage: percentage_of(m, total_minutes),
        });
    }

    AttendancePartition {
        shares,
        breakdown,
        total_minutes,
    }
}

/// Position of each associate id in the input slice (first occurrence wins)
pub(crate) fn associate_index(associates: &[Associate]) -> HashMap<AssociateId, usize> {
    let mut index = HashMap::with_capacity(associates.len());
    for (idx, associate) in associates.iter().enumerate() {
        index.entry(associate.id).or_insert(idx);
    }
    index
}
