use crate::ledger::LedgerError;
use crate::settings::SettingsError;
use thiserror::Error;

/// A distribution could not be computed
///
/// Raised only when an upstream read fails. Degenerate data never produces
/// an error; it produces an empty result or an equal split.
#[derive(Error, Debug)]
pub enum DistributionError {
    #[error("distribution calculation failed reading settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("distribution calculation failed reading {collection}: {source}")]
    Ledger {
        collection: &'static str,
        #[source]
        source: LedgerError,
    },
}
