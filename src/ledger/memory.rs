//! In-memory ledger backed by plain vectors
//!
//! Used by the CSV loader and as a fixture store in tests.

use super::data::{Associate, Assignment, Attendance, Expense, Meeting, Project, Revenue};
use super::reader::{LedgerReader, LedgerResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryLedger {
    pub associates: Vec<Associate>,
    pub revenues: Vec<Revenue>,
    pub expenses: Vec<Expense>,
    pub meetings: Vec<Meeting>,
    pub attendances: Vec<Attendance>,
    pub projects: Vec<Project>,
    pub assignments: Vec<Assignment>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_associate(mut self, associate: Associate) -> Self {
        self.associates.push(associate);
        self
    }

    pub fn with_revenue(mut self, revenue: Revenue) -> Self {
        self.revenues.push(revenue);
        self
    }

    pub fn with_expense(mut self, expense: Expense) -> Self {
        self.expenses.push(expense);
        self
    }

    pub fn with_meeting(mut self, meeting: Meeting) -> Self {
        self.meetings.push(meeting);
        self
    }

    pub fn with_attendance(mut self, attendance: Attendance) -> Self {
        self.attendances.push(attendance);
        self
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    pub fn with_assignment(mut self, assignment: Assignment) -> Self {
        self.assignments.push(assignment);
        self
    }
}

impl LedgerReader for MemoryLedger {
    fn list_associates(&self) -> LedgerResult<Vec<Associate>> {
        Ok(self.associates.clone())
    }

    fn list_revenues(&self) -> LedgerResult<Vec<Revenue>> {
        Ok(self.revenues.clone())
    }

    fn list_expenses(&self) -> LedgerResult<Vec<Expense>> {
        Ok(self.expenses.clone())
    }

    fn list_meetings(&self) -> LedgerResult<Vec<Meeting>> {
        Ok(self.meetings.clone())
    }

    fn list_all_attendances(&self) -> LedgerResult<Vec<Attendance>> {
        Ok(self.attendances.clone())
    }

    fn list_projects(&self) -> LedgerResult<Vec<Project>> {
        Ok(self.projects.clone())
    }

    fn list_all_assignments(&self) -> LedgerResult<Vec<Assignment>> {
        Ok(self.assignments.clone())
    }
}
