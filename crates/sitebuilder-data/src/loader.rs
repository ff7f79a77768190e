//! Data file loading.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::value::{SiteData, Value};

/// Serialization format of a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Yaml,
    Json,
    Toml,
}

impl DataFormat {
    /// Pick a format from the file extension. Anything unrecognized is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => DataFormat::Json,
            Some("toml") => DataFormat::Toml,
            _ => DataFormat::Yaml,
        }
    }

    fn parse(self, source: &str) -> Result<Value, String> {
        match self {
            DataFormat::Yaml => {
                let mut yaml: serde_yaml::Value =
                    serde_yaml::from_str(source).map_err(|e| e.to_string())?;
                // `<<` merge keys are only resolved on request.
                yaml.apply_merge().map_err(|e| e.to_string())?;
                serde_yaml::from_value(yaml).map_err(|e| e.to_string())
            }
            DataFormat::Json => serde_json::from_str(source).map_err(|e| e.to_string()),
            DataFormat::Toml => toml::from_str(source).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataFormat::Yaml => "YAML",
            DataFormat::Json => "JSON",
            DataFormat::Toml => "TOML",
        })
    }
}

/// Errors that can occur when loading site data.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("Failed to read data file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid {format} in {}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        format: DataFormat,
        message: String,
    },

    #[error("Data file {} must hold a mapping at the top level, found a {found}", .path.display())]
    NotAMapping { path: PathBuf, found: &'static str },
}

/// Load site data from `path`.
///
/// A missing file is not an error and yields an empty mapping.
pub fn load_data(path: &Path) -> Result<SiteData, DataError> {
    if !path.exists() {
        tracing::debug!("No data file at {}, using empty data", path.display());
        return Ok(SiteData::new());
    }

    let source = fs::read_to_string(path).map_err(|source| DataError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let data = parse_data(&source, DataFormat::from_path(path), path)?;
    tracing::info!("Loaded {} data keys from {}", data.len(), path.display());

    Ok(data)
}

/// Parse `source` as site data. `path` is only used for error reporting.
pub fn parse_data(source: &str, format: DataFormat, path: &Path) -> Result<SiteData, DataError> {
    if format == DataFormat::Yaml && source.trim().is_empty() {
        return Ok(SiteData::new());
    }

    let value = format.parse(source).map_err(|message| DataError::Parse {
        path: path.to_path_buf(),
        format,
        message,
    })?;

    match value {
        Value::Mapping(map) => Ok(map),
        // A YAML document holding only comments or `~`.
        Value::Null => Ok(SiteData::new()),
        other => Err(DataError::NotAMapping {
            path: path.to_path_buf(),
            found: other.kind(),
        }),
    }
}
