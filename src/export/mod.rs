//! Export of analytics snapshots
//!
//! - CSV: flat `Section,Label,Amount` rows for spreadsheets
//! - JSON: machine-readable export document
//! - YAML: the same document for humans

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_csv;
pub use json::{export_json, read_json_export, AnalyticsExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_yaml, read_yaml_export};
