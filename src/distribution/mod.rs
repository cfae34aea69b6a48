//! Revenue distribution allocation
//!
//! The net ACI pool for a year is split into three partitions:
//! - fixed share, by participation weight with a manager multiplier
//! - attendance (RCP) share, by minutes of attended meetings
//! - project share, by weighted and normalized project contribution
//!
//! Each partition is computed independently and the per-associate results
//! are merged into one ranked list.

mod attendance;
mod engine;
mod error;
mod fixed;
mod pool;
mod project;
mod result;
mod split;

pub use attendance::{attendance_shares, AttendanceBreakdown, AttendancePartition};
pub use engine::{allocate, DistributionEngine};
pub use error::DistributionError;
pub use fixed::{effective_weight, fixed_shares};
pub use pool::PoolTotals;
pub use project::{normalize_contributions, project_shares, ContributionBreakdown, ProjectPartition};
pub use result::{assemble_shares, AssociateShare, ComponentShares, DistributionResult};
pub use split::{equal_split, percentage_of, proportional_split};
