//! Read-only access to the practice ledger

use super::data::{
    Associate, Assignment, Attendance, Expense, Meeting, MeetingId, Project, ProjectId, Revenue,
};
use thiserror::Error;

/// Errors raised while reading ledger collections
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row could not be turned into an entity
    #[error("invalid {collection} row {row}: {reason}")]
    InvalidRow {
        collection: &'static str,
        row: usize,
        reason: String,
    },

    /// Any other failure reported by a storage backend
    #[error("ledger backend failure: {0}")]
    Backend(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Source of the raw entity collections
///
/// Implementations return owned snapshots; the engine never writes back.
/// The per-id variants have default implementations that filter the full
/// collections, so a backend only needs to override them when it can do
/// better.
pub trait LedgerReader {
    fn list_associates(&self) -> LedgerResult<Vec<Associate>>;
    fn list_revenues(&self) -> LedgerResult<Vec<Revenue>>;
    fn list_expenses(&self) -> LedgerResult<Vec<Expense>>;
    fn list_meetings(&self) -> LedgerResult<Vec<Meeting>>;
    fn list_all_attendances(&self) -> LedgerResult<Vec<Attendance>>;
    fn list_projects(&self) -> LedgerResult<Vec<Project>>;
    fn list_all_assignments(&self) -> LedgerResult<Vec<Assignment>>;

    fn list_attendances(&self, meeting_id: MeetingId) -> LedgerResult<Vec<Attendance>> {
        Ok(self
            .list_all_attendances()?
            .into_iter()
            .filter(|a| a.meeting_id == meeting_id)
            .collect())
    }

    fn list_active_projects(&self) -> LedgerResult<Vec<Project>> {
        Ok(self
            .list_projects()?
            .into_iter()
            .filter(Project::is_active)
            .collect())
    }

    fn list_assignments(&self, project_id: ProjectId) -> LedgerResult<Vec<Assignment>> {
        Ok(self
            .list_all_assignments()?
            .into_iter()
            .filter(|a| a.project_id == project_id)
            .collect())
    }
}

impl<T: LedgerReader + ?Sized> LedgerReader for &T {
    fn list_associates(&self) -> LedgerResult<Vec<Associate>> {
        (**self).list_associates()
    }
    fn list_revenues(&self) -> LedgerResult<Vec<Revenue>> {
        (**self).list_revenues()
    }
    fn list_expenses(&self) -> LedgerResult<Vec<Expense>> {
        (**self).list_expenses()
    }
    fn list_meetings(&self) -> LedgerResult<Vec<Meeting>> {
        (**self).list_meetings()
    }
    fn list_all_attendances(&self) -> LedgerResult<Vec<Attendance>> {
        (**self).list_all_attendances()
    }
    fn list_projects(&self) -> LedgerResult<Vec<Project>> {
        (**self).list_projects()
    }
    fn list_all_assignments(&self) -> LedgerResult<Vec<Assignment>> {
        (**self).list_all_assignments()
    }
    fn list_attendances(&self, meeting_id: MeetingId) -> LedgerResult<Vec<Attendance>> {
        (**self).list_attendances(meeting_id)
    }
    fn list_active_projects(&self) -> LedgerResult<Vec<Project>> {
        (**self).list_active_projects()
    }
    fn list_assignments(&self, project_id: ProjectId) -> LedgerResult<Vec<Assignment>> {
        (**self).list_assignments(project_id)
    }
}

/// Point-in-time copy of every collection the engine consumes
///
/// `projects` only holds active projects and `assignments` only those
/// belonging to them.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub associates: Vec<Associate>,
    pub revenues: Vec<Revenue>,
    pub expenses: Vec<Expense>,
    pub meetings: Vec<Meeting>,
    pub attendances: Vec<Attendance>,
    pub projects: Vec<Project>,
    pub assignments: Vec<Assignment>,
}
