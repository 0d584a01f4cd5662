//! Error types for decoding reports and fetching them from the provider.

use thiserror::Error;

/// A report that cannot be decoded at all.
///
/// Optional groups that are missing or malformed never produce one of these;
/// they are simply left out of the [`ParsedReport`](crate::models::ParsedReport).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetarDecodeError {
    #[error("METAR string is empty")]
    EmptyReport,

    #[error("required field missing: {0}")]
    MissingRequiredField(&'static str),
}

/// Failures of the upstream fetch, before any decoding happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Invalid ICAO code format: {0}. Must be 4 letters.")]
    InvalidCode(String),

    #[error("Request timed out while fetching METAR for {0}")]
    Timeout(String),

    #[error("Unable to connect to aviation weather service")]
    Connection,

    #[error("HTTP error occurred: status {0}")]
    Http(u16),

    #[error("No METAR data found for airport: {0}")]
    NoData(String),

    #[error("Unexpected error fetching METAR: {0}")]
    Request(String),
}

