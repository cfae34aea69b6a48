//! Resolved distribution configuration
//!
//! Every setting the engine needs is read and defaulted here, once per
//! computation. Partitions only ever see a `DistributionSettings` value.

use super::provider::{SettingsError, SettingsProvider};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Setting key for the fixed-share percentage
pub const KEY_FIXED_SHARE: &str = "fixed_revenue_share";
/// Setting keys for the attendance-share percentage, in lookup order
pub const KEYS_RCP_SHARE: [&str; 2] = ["rcp_share", "rcp_attendance_weight"];
/// Setting keys for the project-share percentage, in lookup order
pub const KEYS_PROJECT_SHARE: [&str; 2] = ["project_share", "project_contribution_weight"];
/// Setting key for the manager multiplier
pub const KEY_MANAGER_WEIGHT: &str = "aci_manager_weight";

pub const DEFAULT_FIXED_SHARE: f64 = 0.5;
pub const DEFAULT_RCP_SHARE: f64 = 0.25;
pub const DEFAULT_PROJECT_SHARE: f64 = 0.25;
pub const DEFAULT_MANAGER_WEIGHT: f64 = 1.5;

/// Weights applied to one distribution run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionSettings {
    /// Fraction of the pool split by participation weight (0.0 to 1.0)
    #[serde(default = "default_fixed_share")]
    pub fixed_share_percentage: f64,

    /// Fraction of the pool split by meeting minutes (0.0 to 1.0)
    #[serde(default = "default_rcp_share")]
    pub rcp_share_percentage: f64,

    /// Fraction of the pool split by project contribution (0.0 to 1.0)
    #[serde(default = "default_project_share")]
    pub project_share_percentage: f64,

    /// Multiplier on a manager's participation weight
    #[serde(default = "default_manager_weight")]
    pub manager_weight: f64,
}

fn default_fixed_share() -> f64 { DEFAULT_FIXED_SHARE }
fn default_rcp_share() -> f64 { DEFAULT_RCP_SHARE }
fn default_project_share() -> f64 { DEFAULT_PROJECT_SHARE }
fn default_manager_weight() -> f64 { DEFAULT_MANAGER_WEIGHT }

impl Default for DistributionSettings {
    fn default() -> Self {
        Self {
            fixed_share_percentage: DEFAULT_FIXED_SHARE,
            rcp_share_percentage: DEFAULT_RCP_SHARE,
            project_share_percentage: DEFAULT_PROJECT_SHARE,
            manager_weight: DEFAULT_MANAGER_WEIGHT,
        }
    }
}

impl DistributionSettings {
    /// Read every key from the provider, defaulting missing or invalid values
    ///
    /// Only a provider failure is an error. Absent keys default silently;
    /// unparsable, negative or non-finite values default with a warning.
    pub fn resolve<S: SettingsProvider + ?Sized>(provider: &S) -> Result<Self, SettingsError> {
        let settings = Self {
            fixed_share_percentage: read_value(provider, &[KEY_FIXED_SHARE], DEFAULT_FIXED_SHARE)?,
            rcp_share_percentage: read_value(provider, &KEYS_RCP_SHARE, DEFAULT_RCP_SHARE)?,
            project_share_percentage: read_value(
                provider,
                &KEYS_PROJECT_SHARE,
                DEFAULT_PROJECT_SHARE,
            )?,
            manager_weight: read_value(provider, &[KEY_MANAGER_WEIGHT], DEFAULT_MANAGER_WEIGHT)?,
        };

        if !settings.is_balanced() {
            warn!(
                "Distribution shares sum to {:.4}, not 1.0; pool will not be fully allocated as-is",
                settings.shares_sum()
            );
        }
        debug!("Resolved distribution settings: {:?}", settings);

        Ok(settings)
    }

    pub fn shares_sum(&self) -> f64 {
        self.fixed_share_percentage + self.rcp_share_percentage + self.project_share_percentage
    }

    /// Whether the three shares allocate exactly the whole pool
    pub fn is_balanced(&self) -> bool {
        (self.shares_sum() - 1.0).abs() < 1e-9
    }
}

/// First present key wins; an invalid value at that key falls back to the default
fn read_value<S: SettingsProvider + ?Sized>(
    provider: &S,
    keys: &[&str],
    default: f64,
) -> Result<f64, SettingsError> {
    for key in keys {
        let Some(raw) = provider.get_setting(key)? else {
            continue;
        };
        return Ok(match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => v,
            _ => {
                warn!("Setting {} = '{}' is invalid, using default {}", key, raw, default);
                default
            }
        });
    }
    Ok(default)
}
