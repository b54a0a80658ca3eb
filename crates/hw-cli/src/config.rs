//! Dashboard configuration file.
//!
//! ```json
//! {
//!   "builtin": "heatwave",
//!   "policy": { "empty_selection": "match_nothing", "unknown_column": "reject" },
//!   "defaults": { "City": "all", "Year": { "values": ["2024", "2025"] } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use hw_ingest::BuiltinDataset;
use hw_query::{DefaultSelection, FilterPolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings a dashboard session starts from. Command-line flags override them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// CSV file to load. Takes precedence over `builtin`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Embedded dataset to load when no `source` is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub builtin: Option<BuiltinDataset>,

    /// Filter edge-case policies.
    pub policy: FilterPolicy,

    /// Initial selection per dimension; unlisted dimensions select everything.
    pub defaults: BTreeMap<String, DefaultSelection>,
}

impl DashboardConfig {
    /// Reads a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Relative `source` paths resolve against the config file's directory.
    #[must_use]
    pub fn resolve_source(&self, config_path: &Path) -> Option<PathBuf> {
        let source = self.source.as_ref()?;
        if source.is_absolute() {
            return Some(source.clone());
        }
        match config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => Some(dir.join(source)),
            _ => Some(source.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use hw_query::{EmptySelectionPolicy, UnknownColumnPolicy};

    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: DashboardConfig = serde_json::from_str(
            r#"{
                "builtin": "climate-overview",
                "policy": { "unknown_column": "reject" },
                "defaults": { "City": "first", "Year": { "values": ["2024"] } }
            }"#,
        )
        .unwrap();
        assert_eq!(config.builtin, Some(BuiltinDataset::ClimateOverview));
        assert_eq!(config.policy.unknown_column, UnknownColumnPolicy::Reject);
        assert_eq!(
            config.policy.empty_selection,
            EmptySelectionPolicy::MatchNothing
        );
        assert_eq!(config.defaults["City"], DefaultSelection::First);
        assert_eq!(
            config.defaults["Year"],
            DefaultSelection::Values(vec!["2024".to_string()])
        );
    }

    #[test]
    fn test_empty_object_is_default() {
        let config: DashboardConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(serde_json::from_str::<DashboardConfig>(r#"{"sauce": "x.csv"}"#).is_err());
    }

    #[test]
    fn test_resolve_source_relative_to_config() {
        let config = DashboardConfig {
            source: Some(PathBuf::from("data/heat.csv")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_source(Path::new("/etc/heatwatch/config.json")),
            Some(PathBuf::from("/etc/heatwatch/data/heat.csv"))
        );
        assert_eq!(
            config.resolve_source(Path::new("config.json")),
            Some(PathBuf::from("data/heat.csv"))
        );
    }
}
