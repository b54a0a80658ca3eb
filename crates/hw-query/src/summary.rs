//! Metric cards shown above the heatwave charts.

use hw_model::Dataset;
use hw_model::catalog::heatwave::{
    AGRICULTURE_LOSS_PCT, CITY, DEATHS, HEATSTROKE_CASES, PEAK_TEMP_C, YEAR,
};
use serde::{Deserialize, Serialize};

use crate::aggregate::{ReduceKind, total_by_reducer};
use crate::error::Result;
use crate::extreme::{ExtremeKind, arg_extreme};

/// Headline numbers for a filtered heatwave view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub records: usize,
    pub cities: usize,
    pub total_deaths: i64,
    pub total_heatstroke_cases: i64,
    pub peak_temp_c: f64,
    pub peak_city: String,
    pub peak_year: String,
    pub mean_agriculture_loss_pct: f64,
}

impl DashboardSummary {
    /// Computes the cards, or `None` when the view has no rows.
    pub fn compute(rows: &Dataset) -> Result<Option<Self>> {
        if rows.is_empty() {
            return Ok(None);
        }
        let schema = rows.schema();
        let peak = arg_extreme(rows, PEAK_TEMP_C, ExtremeKind::Max)?;
        let text_of = |column: &str| -> Result<String> {
            Ok(peak.get(rows.column_index(column)?).render())
        };

        Ok(Some(Self {
            records: rows.len(),
            cities: rows.distinct_values(CITY)?.len(),
            total_deaths: total_by_reducer(rows, DEATHS, ReduceKind::Sum)?
                .as_i64()
                .unwrap_or_default(),
            total_heatstroke_cases: total_by_reducer(rows, HEATSTROKE_CASES, ReduceKind::Sum)?
                .as_i64()
                .unwrap_or_default(),
            peak_temp_c: peak
                .get(schema.require(PEAK_TEMP_C)?)
                .as_f64()
                .unwrap_or_default(),
            peak_city: text_of(CITY)?,
            peak_year: text_of(YEAR)?,
            mean_agriculture_loss_pct: total_by_reducer(rows, AGRICULTURE_LOSS_PCT, ReduceKind::Mean)?
                .as_f64()
                .unwrap_or_default(),
        }))
    }
}
