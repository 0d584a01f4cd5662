//! Decodes METAR aviation weather reports and describes them in plain English.
//!
//! ```
//! use metar_reader::{decode, summarize};
//!
//! let report = decode("KJFK 081751Z 31021KT 10SM CLR 13/M11 A3012 RMK AO2").unwrap();
//! assert_eq!(report.station, "KJFK");
//! assert!(summarize(&report).starts_with("Clear skies."));
//! ```

pub mod compass;
pub mod config;
pub mod error;
pub mod formatters;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod phenomena;
pub mod routes;
pub mod services;
pub mod units;

pub use error::{FetchError, MetarDecodeError};
pub use formatters::summarize;
pub use models::ParsedReport;
pub use parser::decode;
