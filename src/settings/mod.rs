//! Distribution settings: provider access and resolved configuration

mod provider;
mod resolved;

pub use provider::{load_settings, read_settings, SettingsError, SettingsProvider};
pub use resolved::{
    DistributionSettings, DEFAULT_FIXED_SHARE, DEFAULT_MANAGER_WEIGHT, DEFAULT_PROJECT_SHARE,
    DEFAULT_RCP_SHARE, KEYS_PROJECT_SHARE, KEYS_RCP_SHARE, KEY_FIXED_SHARE, KEY_MANAGER_WEIGHT,
};
