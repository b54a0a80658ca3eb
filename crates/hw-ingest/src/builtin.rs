//! Datasets compiled into the binary.
//!
//! All data is embedded for offline operation; each table is parsed with its
//! catalog schema exactly like an uploaded CSV would be.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use hw_model::catalog::{climate_overview_schema, heatwave_schema, rainfall_schema};
use hw_model::{Dataset, Schema};
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};
use crate::loader::load_csv_bytes;

const HEATWAVE_CSV: &str = include_str!("../data/heatwave.csv");
const CLIMATE_OVERVIEW_CSV: &str = include_str!("../data/climate_overview.csv");
const RAINFALL_CSV: &str = include_str!("../data/rainfall.csv");

/// An embedded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinDataset {
    /// Per-city heatwave records, 2020-2025.
    #[default]
    Heatwave,
    /// National climate indicators per year.
    ClimateOverview,
    /// National rainfall and drought indicators per year.
    Rainfall,
}

impl BuiltinDataset {
    pub const ALL: [Self; 3] = [Self::Heatwave, Self::ClimateOverview, Self::Rainfall];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Heatwave => "heatwave",
            Self::ClimateOverview => "climate-overview",
            Self::Rainfall => "rainfall",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Heatwave => "Heatwave deaths, heatstroke cases and losses per city",
            Self::ClimateOverview => "Temperature, deaths, food and water indicators per year",
            Self::Rainfall => "Annual and monsoon rainfall, droughts and floods per year",
        }
    }

    /// Raw embedded CSV text.
    #[must_use]
    pub const fn csv(self) -> &'static str {
        match self {
            Self::Heatwave => HEATWAVE_CSV,
            Self::ClimateOverview => CLIMATE_OVERVIEW_CSV,
            Self::Rainfall => RAINFALL_CSV,
        }
    }

    pub fn schema(self) -> Result<Schema> {
        let schema = match self {
            Self::Heatwave => heatwave_schema(),
            Self::ClimateOverview => climate_overview_schema(),
            Self::Rainfall => rainfall_schema(),
        }?;
        Ok(schema)
    }

    /// Parses the embedded table.
    pub fn load(self) -> Result<Dataset> {
        let schema = Arc::new(self.schema()?);
        load_csv_bytes(self.csv().as_bytes(), Some(schema), self.name())
    }
}

impl fmt::Display for BuiltinDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinDataset {
    type Err = IngestError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|builtin| builtin.name() == wanted)
            .ok_or_else(|| IngestError::UnknownBuiltin {
                name: s.to_string(),
            })
    }
}
