//! Ledger entities consumed by the distribution engine
//!
//! All numeric fields are already parsed into `f64` by the time they reach
//! these structs. Text-to-number coercion lives in [`super::loader`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub type AssociateId = u32;
pub type MeetingId = u32;
pub type ProjectId = u32;

/// Revenue category that feeds the distributable pool
pub const ACI_CATEGORY: &str = "ACI";

/// Meeting length applied when the recorded duration is missing or invalid
pub const DEFAULT_MEETING_MINUTES: f64 = 60.0;

/// Multiplier applied when a project has no usable weight
pub const DEFAULT_PROJECT_WEIGHT: f64 = 1.0;

/// A practice associate (physician, nurse, physiotherapist, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Associate {
    pub id: AssociateId,
    pub name: String,
    pub profession: String,
    pub is_manager: bool,
    /// Base coefficient for the fixed-share partition
    pub participation_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revenue {
    pub amount: f64,
    pub date: NaiveDate,
    pub category: String,
}

impl Revenue {
    /// Whether this revenue belongs to the distributable ACI pool
    pub fn is_aci(&self) -> bool {
        self.category == ACI_CATEGORY
    }

    pub fn in_year(&self, year: i32) -> bool {
        self.date.year() == year
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub amount: f64,
    pub date: NaiveDate,
    /// Display only; every category reduces the pool
    #[serde(default)]
    pub category: String,
}

impl Expense {
    pub fn in_year(&self, year: i32) -> bool {
        self.date.year() == year
    }
}

/// A coordination meeting (RCP)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    pub date: NaiveDate,
    #[serde(default)]
    pub title: String,
    /// Recorded duration in minutes, `None` when unset
    pub duration_minutes: Option<f64>,
}

impl Meeting {
    /// Duration used for attendance weighting
    ///
    /// Falls back to 60 minutes when the duration is unset, zero,
    /// negative or not a finite number.
    pub fn effective_minutes(&self) -> f64 {
        match self.duration_minutes {
            Some(m) if m.is_finite() && m > 0.0 => m,
            _ => DEFAULT_MEETING_MINUTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub meeting_id: MeetingId,
    pub associate_id: AssociateId,
    pub attended: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Completed,
    Pending,
}

impl ProjectStatus {
    /// Parse a status label, case-insensitive
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "active" => Some(ProjectStatus::Active),
            "completed" => Some(ProjectStatus::Completed),
            "pending" => Some(ProjectStatus::Pending),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub status: ProjectStatus,
    /// Multiplier applied to every normalized contribution in this project
    pub weight: f64,
}

impl Project {
    pub fn is_active(&self) -> bool {
        self.status == ProjectStatus::Active
    }

    /// Weight used by the project partition (non-finite or negative weights count as 0)
    pub fn effective_weight(&self) -> f64 {
        finite_non_negative(self.weight)
    }
}

/// Links an associate to a project with a contribution on a per-project scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub project_id: ProjectId,
    pub associate_id: AssociateId,
    pub contribution: f64,
}

/// Clamp a value to a usable non-negative number, mapping NaN/inf to 0
pub(crate) fn finite_non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting(duration: Option<f64>) -> Meeting {
        Meeting {
            id: 1,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            title: String::new(),
            duration_minutes: duration,
        }
    }

    #[test]
    fn test_meeting_duration_default() {
        assert_eq!(meeting(None).effective_minutes(), 60.0);
        assert_eq!(meeting(Some(0.0)).effective_minutes(), 60.0);
        assert_eq!(meeting(Some(-15.0)).effective_minutes(), 60.0);
        assert_eq!(meeting(Some(f64::NAN)).effective_minutes(), 60.0);
        assert_eq!(meeting(Some(90.0)).effective_minutes(), 90.0);
    }

    #[test]
    fn test_project_status_parse() {
        assert_eq!(ProjectStatus::parse("active"), Some(ProjectStatus::Active));
        assert_eq!(ProjectStatus::parse(" Completed "), Some(ProjectStatus::Completed));
        assert_eq!(ProjectStatus::parse("PENDING"), Some(ProjectStatus::Pending));
        assert_eq!(ProjectStatus::parse("archived"), None);
    }

    #[test]
    fn test_revenue_year_and_category() {
        let revenue = Revenue {
            amount: 100.0,
            date: NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
            category: "ACI".to_string(),
        };
        assert!(revenue.is_aci());
        assert!(revenue.in_year(2023));
        assert!(!revenue.in_year(2024));

        let other = Revenue { category: "aci".to_string(), ..revenue };
        // Category match is exact
        assert!(!other.is_aci());
    }
}
