//! Load a ledger snapshot from CSV exports
//!
//! The practice database stores amounts, weights and contributions as text.
//! This module is the boundary where those strings become numbers:
//! - unparsable amounts, participation weights and contributions become 0
//! - an unparsable meeting duration is treated as unset (engine default applies)
//! - an unparsable project weight becomes 1.0
//! - unparsable dates, booleans and statuses reject the row
//!
//! Expected files in the snapshot directory:
//! `associates.csv`, `revenues.csv` (required) and `expenses.csv`,
//! `meetings.csv`, `attendances.csv`, `projects.csv`, `assignments.csv`
//! (optional, empty when absent).

use super::data::{
    Associate, Assignment, Attendance, Expense, Meeting, Project, ProjectStatus, Revenue,
    DEFAULT_PROJECT_WEIGHT,
};
use super::memory::MemoryLedger;
use super::reader::{LedgerError, LedgerResult};
use chrono::{DateTime, NaiveDate};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct AssociateRow {
    id: u32,
    name: String,
    #[serde(default)]
    profession: String,
    #[serde(default)]
    is_manager: String,
    #[serde(default)]
    participation_weight: String,
}

#[derive(Debug, Deserialize)]
struct RevenueRow {
    amount: String,
    date: String,
    #[serde(default)]
    category: String,
}

#[derive(Debug, Deserialize)]
struct ExpenseRow {
    amount: String,
    date: String,
    #[serde(default)]
    category: String,
}

#[derive(Debug, Deserialize)]
struct MeetingRow {
    id: u32,
    date: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    duration: String,
}

#[derive(Debug, Deserialize)]
struct AttendanceRow {
    meeting_id: u32,
    associate_id: u32,
    attended: String,
}

#[derive(Debug, Deserialize)]
struct ProjectRow {
    id: u32,
    name: String,
    status: String,
    #[serde(default)]
    weight: String,
}

#[derive(Debug, Deserialize)]
struct AssignmentRow {
    project_id: u32,
    associate_id: u32,
    contribution: String,
}

/// Load every collection from a snapshot directory
pub fn load_ledger(dir: &Path) -> LedgerResult<MemoryLedger> {
    let ledger = load_ledger_from_readers(
        open_required(dir, "associates.csv")?,
        open_required(dir, "revenues.csv")?,
        open_optional(dir, "expenses.csv")?,
        open_optional(dir, "meetings.csv")?,
        open_optional(dir, "attendances.csv")?,
        open_optional(dir, "projects.csv")?,
        open_optional(dir, "assignments.csv")?,
    )?;
    debug!("Snapshot directory {} loaded", dir.display());
    Ok(ledger)
}

/// Load every collection from already opened CSV sources
///
/// Associates and revenues are required. A `None` source leaves its
/// collection empty.
pub fn load_ledger_from_readers<R: Read>(
    associates: R,
    revenues: R,
    expenses: Option<R>,
    meetings: Option<R>,
    attendances: Option<R>,
    projects: Option<R>,
    assignments: Option<R>,
) -> LedgerResult<MemoryLedger> {
    let ledger = MemoryLedger {
        associates: read_associates(associates)?,
        revenues: read_revenues(revenues)?,
        expenses: read_optional(expenses, read_expenses)?,
        meetings: read_optional(meetings, read_meetings)?,
        attendances: read_optional(attendances, read_attendances)?,
        projects: read_optional(projects, read_projects)?,
        assignments: read_optional(assignments, read_assignments)?,
    };

    debug!(
        "Loaded ledger: {} associates, {} revenues, {} expenses, {} meetings, {} projects",
        ledger.associates.len(),
        ledger.revenues.len(),
        ledger.expenses.len(),
        ledger.meetings.len(),
        ledger.projects.len(),
    );

    Ok(ledger)
}

fn read_optional<R, T>(
    source: Option<R>,
    read: fn(R) -> LedgerResult<Vec<T>>,
) -> LedgerResult<Vec<T>> {
    match source {
        Some(reader) => read(reader),
        None => Ok(Vec::new()),
    }
}

fn open_required(dir: &Path, name: &str) -> LedgerResult<File> {
    Ok(File::open(dir.join(name))?)
}

fn open_optional(dir: &Path, name: &str) -> LedgerResult<Option<File>> {
    let path = dir.join(name);
    if !path.exists() {
        debug!("{} not found, treating as empty", path.display());
        return Ok(None);
    }
    Ok(Some(File::open(path)?))
}

/// Deserialize raw rows, returning them with their 1-based data row number
fn read_rows<T: DeserializeOwned, R: Read>(reader: R) -> LedgerResult<Vec<(usize, T)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();
    for (idx, record) in rdr.deserialize().enumerate() {
        rows.push((idx + 1, record?));
    }
    Ok(rows)
}

pub fn read_associates<R: Read>(reader: R) -> LedgerResult<Vec<Associate>> {
    read_rows::<AssociateRow, _>(reader)?
        .into_iter()
        .map(|(row, r)| -> LedgerResult<Associate> {
            Ok(Associate {
                id: r.id,
                is_manager: parse_flag(&r.is_manager, "associates", row)?.unwrap_or(false),
                participation_weight: parse_number(
                    &r.participation_weight,
                    "associates",
                    "participation_weight",
                    row,
                )
                .unwrap_or(0.0),
                name: r.name,
                profession: r.profession,
            })
        })
        .collect()
}

pub fn read_revenues<R: Read>(reader: R) -> LedgerResult<Vec<Revenue>> {
    read_rows::<RevenueRow, _>(reader)?
        .into_iter()
        .map(|(row, r)| -> LedgerResult<Revenue> {
            Ok(Revenue {
                amount: parse_number(&r.amount, "revenues", "amount", row).unwrap_or(0.0),
                date: parse_date(&r.date, "revenues", row)?,
                category: r.category,
            })
        })
        .collect()
}

pub fn read_expenses<R: Read>(reader: R) -> LedgerResult<Vec<Expense>> {
    read_rows::<ExpenseRow, _>(reader)?
        .into_iter()
        .map(|(row, r)| -> LedgerResult<Expense> {
            Ok(Expense {
                amount: parse_number(&r.amount, "expenses", "amount", row).unwrap_or(0.0),
                date: parse_date(&r.date, "expenses", row)?,
                category: r.category,
            })
        })
        .collect()
}

pub fn read_meetings<R: Read>(reader: R) -> LedgerResult<Vec<Meeting>> {
    read_rows::<MeetingRow, _>(reader)?
        .into_iter()
        .map(|(row, r)| -> LedgerResult<Meeting> {
            Ok(Meeting {
                id: r.id,
                date: parse_date(&r.date, "meetings", row)?,
                title: r.title,
                duration_minutes: parse_number(&r.duration, "meetings", "duration", row),
            })
        })
        .collect()
}

pub fn read_attendances<R: Read>(reader: R) -> LedgerResult<Vec<Attendance>> {
    read_rows::<AttendanceRow, _>(reader)?
        .into_iter()
        .map(|(row, r)| -> LedgerResult<Attendance> {
            Ok(Attendance {
                meeting_id: r.meeting_id,
                associate_id: r.associate_id,
                attended: parse_flag(&r.attended, "attendances", row)?.unwrap_or(false),
            })
        })
        .collect()
}

pub fn read_projects<R: Read>(reader: R) -> LedgerResult<Vec<Project>> {
    read_rows::<ProjectRow, _>(reader)?
        .into_iter()
        .map(|(row, r)| -> LedgerResult<Project> {
            let status = ProjectStatus::parse(&r.status).ok_or_else(|| LedgerError::InvalidRow {
                collection: "projects",
                row,
                reason: format!("unknown status '{}'", r.status),
            })?;
            Ok(Project {
                id: r.id,
                name: r.name,
                status,
                weight: parse_number(&r.weight, "projects", "weight", row)
                    .unwrap_or(DEFAULT_PROJECT_WEIGHT),
            })
        })
        .collect()
}

pub fn read_assignments<R: Read>(reader: R) -> LedgerResult<Vec<Assignment>> {
    read_rows::<AssignmentRow, _>(reader)?
        .into_iter()
        .map(|(row, r)| -> LedgerResult<Assignment> {
            Ok(Assignment {
                project_id: r.project_id,
                associate_id: r.associate_id,
                contribution: parse_number(&r.contribution, "assignments", "contribution", row)
                    .unwrap_or(0.0),
            })
        })
        .collect()
}

/// Parse a text number. Empty yields `None` quietly, garbage yields `None` with a warning.
fn parse_number(raw: &str, collection: &str, field: &str, row: usize) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            warn!("{} row {}: {} '{}' is not a number", collection, row, field, raw);
            None
        }
    }
}

fn parse_flag(raw: &str, collection: &'static str, row: usize) -> LedgerResult<Option<bool>> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" | "1" | "yes" => Ok(Some(true)),
        "false" | "0" | "no" => Ok(Some(false)),
        other => Err(LedgerError::InvalidRow {
            collection,
            row,
            reason: format!("'{}' is not a boolean", other),
        }),
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp
fn parse_date(raw: &str, collection: &'static str, row: usize) -> LedgerResult<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| LedgerError::InvalidRow {
            collection,
            row,
            reason: format!("'{}' is not a date", raw),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_associates() {
        let csv = "\
id,name,profession,is_manager,participation_weight
1,Dr Martin,GP,true,1.0
2,Claire,Nurse,no,0.8
3,Paul,Physio,,abc
";
        let associates = read_associates(csv.as_bytes()).unwrap();
        assert_eq!(associates.len(), 3);
        assert!(associates[0].is_manager);
        assert_eq!(associates[0].participation_weight, 1.0);
        assert!(!associates[1].is_manager);
        assert_eq!(associates[1].participation_weight, 0.8);
        // Unparsable weight becomes 0, missing flag becomes false
        assert!(!associates[2].is_manager);
        assert_eq!(associates[2].participation_weight, 0.0);
    }

    #[test]
    fn test_read_revenues_with_bad_amount() {
        let csv = "\
amount,date,category
1500.50,2024-02-01,ACI
n/a,2024-03-01,ACI
200,2024-04-01T09:30:00+02:00,CONSULT
";
        let revenues = read_revenues(csv.as_bytes()).unwrap();
        assert_eq!(revenues.len(), 3);
        assert_eq!(revenues[0].amount, 1500.50);
        assert_eq!(revenues[1].amount, 0.0);
        assert_eq!(revenues[2].date, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(revenues[2].category, "CONSULT");
    }

    #[test]
    fn test_bad_date_rejects_row() {
        let csv = "amount,date,category\n100,01/02/2024,ACI\n";
        let err = read_revenues(csv.as_bytes()).unwrap_err();
        match err {
            LedgerError::InvalidRow { collection, row, .. } => {
                assert_eq!(collection, "revenues");
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_meeting_duration_parsing() {
        let csv = "\
id,date,title,duration
1,2024-01-10,Weekly RCP,90
2,2024-01-17,Weekly RCP,
3,2024-01-24,Weekly RCP,one hour
";
        let meetings = read_meetings(csv.as_bytes()).unwrap();
        assert_eq!(meetings[0].duration_minutes, Some(90.0));
        assert_eq!(meetings[1].duration_minutes, None);
        assert_eq!(meetings[2].duration_minutes, None);
        assert_eq!(meetings[2].effective_minutes(), 60.0);
    }

    #[test]
    fn test_projects_and_assignments() {
        let projects_csv = "\
id,name,status,weight
1,Diabetes pathway,active,1.5
2,Old survey,completed,
3,Vaccination drive,Active,heavy
";
        let projects = read_projects(projects_csv.as_bytes()).unwrap();
        assert_eq!(projects[0].weight, 1.5);
        assert_eq!(projects[1].status, ProjectStatus::Completed);
        assert_eq!(projects[1].weight, 1.0);
        assert!(projects[2].is_active());
        assert_eq!(projects[2].weight, 1.0);

        let assignments_csv = "project_id,associate_id,contribution\n1,1,60\n1,2,\n";
        let assignments = read_assignments(assignments_csv.as_bytes()).unwrap();
        assert_eq!(assignments[0].contribution, 60.0);
        assert_eq!(assignments[1].contribution, 0.0);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let csv = "id,name,status,weight\n1,X,archived,1\n";
        assert!(matches!(
            read_projects(csv.as_bytes()),
            Err(LedgerError::InvalidRow { collection: "projects", .. })
        ));
    }

    #[test]
    fn test_attendance_flags() {
        let csv = "meeting_id,associate_id,attended\n1,1,TRUE\n1,2,0\n";
        let attendances = read_attendances(csv.as_bytes()).unwrap();
        assert!(attendances[0].attended);
        assert!(!attendances[1].attended);

        let bad = "meeting_id,associate_id,attended\n1,1,maybe\n";
        assert!(read_attendances(bad.as_bytes()).is_err());
    }

    #[test]
    fn test_load_ledger_from_readers() {
        let associates = "\
id,name,profession,is_manager,participation_weight
1,Dr Martin,GP,true,1
2,Claire,Nurse,false,1
";
        let revenues = "amount,date,category\n12000,2024-03-01,ACI\n800,2024-03-02,CONSULT\n";
        let expenses = "amount,date,category\n2000,2024-05-01,rent\n";
        let meetings = "id,date,title,duration\n1,2024-02-01,RCP,45\n";
        let attendances = "meeting_id,associate_id,attended\n1,1,true\n1,2,false\n";
        let projects = "id,name,status,weight\n10,Diabetes pathway,active,2\n";
        let assignments = "project_id,associate_id,contribution\n10,1,30\n10,2,70\n";

        let ledger = load_ledger_from_readers(
            associates.as_bytes(),
            revenues.as_bytes(),
            Some(expenses.as_bytes()),
            Some(meetings.as_bytes()),
            Some(attendances.as_bytes()),
            Some(projects.as_bytes()),
            Some(assignments.as_bytes()),
        )
        .unwrap();

        assert_eq!(ledger.associates.len(), 2);
        assert!(ledger.associates[0].is_manager);
        assert_eq!(ledger.revenues.len(), 2);
        assert!(ledger.revenues[0].is_aci());
        assert_eq!(ledger.expenses[0].amount, 2000.0);
        assert_eq!(ledger.meetings[0].duration_minutes, Some(45.0));
        assert!(ledger.attendances[0].attended);
        assert!(!ledger.attendances[1].attended);
        assert_eq!(ledger.projects[0].weight, 2.0);
        assert_eq!(ledger.assignments[1].contribution, 70.0);
    }

    #[test]
    fn test_load_ledger_from_readers_without_optional_sources() {
        let associates = "id,name,profession,is_manager,participation_weight\n1,A,GP,false,1\n";
        let revenues = "amount,date,category\n100,2024-01-01,ACI\n";

        let ledger = load_ledger_from_readers(
            associates.as_bytes(),
            revenues.as_bytes(),
            None,
            None,
            None,
            None,
            None,
        )
        .unwrap();

        assert_eq!(ledger.associates.len(), 1);
        assert!(ledger.expenses.is_empty());
        assert!(ledger.attendances.is_empty());
        assert!(ledger.assignments.is_empty());

        let bad_revenues = "amount,date,category\n100,yesterday,ACI\n";
        assert!(matches!(
            load_ledger_from_readers(
                associates.as_bytes(),
                bad_revenues.as_bytes(),
                None,
                None,
                None,
                None,
                None,
            ),
            Err(LedgerError::InvalidRow { collection: "revenues", .. })
        ));
    }

    #[test]
    fn test_load_ledger_missing_required_file() {
        let dir = std::env::temp_dir().join("aci_distribution_missing_snapshot");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        assert!(matches!(load_ledger(&dir), Err(LedgerError::Io(_))));
    }

    #[test]
    fn test_load_ledger_optional_files() {
        let dir = std::env::temp_dir().join("aci_distribution_minimal_snapshot");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("associates.csv"),
            "id,name,profession,is_manager,participation_weight\n1,A,GP,false,1\n",
        )
        .unwrap();
        std::fs::write(dir.join("revenues.csv"), "amount,date,category\n100,2024-01-01,ACI\n")
            .unwrap();

        let ledger = load_ledger(&dir).unwrap();
        assert_eq!(ledger.associates.len(), 1);
        assert_eq!(ledger.revenues.len(), 1);
        assert!(ledger.expenses.is_empty());
        assert!(ledger.meetings.is_empty());
        assert!(ledger.projects.is_empty());
    }
}
