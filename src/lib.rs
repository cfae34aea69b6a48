//! ACI Distribution - revenue allocation engine for multi-professional health practices
//!
//! This library provides:
//! - Ledger entities and a read-only repository interface
//! - CSV snapshot loading with text-to-number coercion at the boundary
//! - Settings resolution with documented defaults
//! - The allocation engine splitting the net ACI pool by participation,
//!   meeting attendance and project contribution

pub mod distribution;
pub mod ledger;
pub mod settings;

// Re-export commonly used types
pub use distribution::{allocate, AssociateShare, DistributionEngine, DistributionError, DistributionResult};
pub use ledger::{LedgerReader, LedgerSnapshot, MemoryLedger};
pub use settings::{DistributionSettings, SettingsProvider};
