//! Ledger entities and read access to them

mod data;
mod memory;
mod reader;
pub mod loader;

pub use data::{
    Associate, AssociateId, Assignment, Attendance, Expense, Meeting, MeetingId, Project,
    ProjectId, ProjectStatus, Revenue, ACI_CATEGORY, DEFAULT_MEETING_MINUTES,
    DEFAULT_PROJECT_WEIGHT,
};
pub(crate) use data::finite_non_negative;
pub use loader::{load_ledger, load_ledger_from_readers};
pub use memory::MemoryLedger;
pub use reader::{LedgerError, LedgerReader, LedgerResult, LedgerSnapshot};
