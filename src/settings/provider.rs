//! Settings provider trait and the stores that implement it

use log::debug;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("settings backend failure: {0}")]
    Backend(String),
}

/// Source of named configuration values
///
/// Returns `Ok(None)` when a key is absent. An `Err` means the store itself
/// could not be read.
pub trait SettingsProvider {
    fn get_setting(&self, key: &str) -> Result<Option<String>, SettingsError>;
}

impl SettingsProvider for HashMap<String, String> {
    fn get_setting(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.get(key).cloned())
    }
}

impl SettingsProvider for BTreeMap<String, String> {
    fn get_setting(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.get(key).cloned())
    }
}

impl<T: SettingsProvider + ?Sized> SettingsProvider for &T {
    fn get_setting(&self, key: &str) -> Result<Option<String>, SettingsError> {
        (**self).get_setting(key)
    }
}

#[derive(Debug, Deserialize)]
struct SettingRow {
    key: String,
    #[serde(default)]
    value: String,
}

/// Load a `key,value` CSV file into a settings map
pub fn load_settings(path: &Path) -> Result<BTreeMap<String, String>, SettingsError> {
    let settings = read_settings(File::open(path)?)?;
    debug!("Loaded {} settings from {}", settings.len(), path.display());
    Ok(settings)
}

/// Read `key,value` rows; later rows override earlier ones
pub fn read_settings<R: Read>(reader: R) -> Result<BTreeMap<String, String>, SettingsError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut settings = BTreeMap::new();
    for record in rdr.deserialize() {
        let row: SettingRow = record?;
        settings.insert(row.key, row.value);
    }
    Ok(settings)
}
