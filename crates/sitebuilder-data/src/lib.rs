//! Site data loading.
//!
//! Reads a single structured data file (YAML, JSON or TOML) into a dynamically
//! typed mapping that templates can traverse at any depth.

pub mod loader;
pub mod value;

pub use loader::{load_data, parse_data, DataError, DataFormat};
pub use value::{SiteData, Value};
