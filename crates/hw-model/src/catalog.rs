//! Schemas of the built-in tables.
//!
//! `Year` is declared as a category in every table so it is filtered and
//! grouped as a label rather than plotted on a numeric axis.

use crate::error::Result;
use crate::schema::{ColumnDef, Schema};

/// Column names of the heatwave table.
pub mod heatwave {
    pub const CITY: &str = "City";
    pub const YEAR: &str = "Year";
    pub const PEAK_TEMP_C: &str = "Peak_Temp_C";
    pub const DEATHS: &str = "Deaths";
    pub const HEATSTROKE_CASES: &str = "Heatstroke_Cases";
    pub const AGRICULTURE_LOSS_PCT: &str = "Agriculture_Loss_pct";
    pub const LIVESTOCK_LOSS: &str = "Livestock_Loss";
    pub const WATER_SHORTAGE_IMPACT: &str = "Water_Shortage_Impact";
    pub const DURATION_DAYS: &str = "Duration_Days";

    /// Sentinel for a missing livestock loss description.
    pub const NO_LIVESTOCK_DATA: &str = "No data available";
    /// Sentinel for a missing water shortage description.
    pub const NO_WATER_IMPACT: &str = "No significant impact";
}

/// Per-city heatwave records.
pub fn heatwave_schema() -> Result<Schema> {
    use heatwave::{
        AGRICULTURE_LOSS_PCT, CITY, DEATHS, DURATION_DAYS, HEATSTROKE_CASES, LIVESTOCK_LOSS,
        NO_LIVESTOCK_DATA, NO_WATER_IMPACT, PEAK_TEMP_C, WATER_SHORTAGE_IMPACT, YEAR,
    };
    Schema::new(vec![
        ColumnDef::category(CITY),
        ColumnDef::category(YEAR),
        ColumnDef::float(PEAK_TEMP_C),
        ColumnDef::integer(DEATHS).fill(0i64),
        ColumnDef::integer(HEATSTROKE_CASES).fill(0i64),
        ColumnDef::float(AGRICULTURE_LOSS_PCT).fill(0.0_f64),
        ColumnDef::text(LIVESTOCK_LOSS).fill(NO_LIVESTOCK_DATA),
        ColumnDef::text(WATER_SHORTAGE_IMPACT).fill(NO_WATER_IMPACT),
        ColumnDef::integer(DURATION_DAYS),
    ])
}

/// National yearly climate indicators.
pub fn climate_overview_schema() -> Result<Schema> {
    Schema::new(vec![
        ColumnDef::category("Year"),
        ColumnDef::float("Peak_Temp_C"),
        ColumnDef::integer("Heat_Deaths"),
        ColumnDef::integer("Rainfall_Deficit_Percent"),
        ColumnDef::float("Crop_Losses_MT"),
        ColumnDef::float("Food_Insecure_Million"),
        ColumnDef::integer("Water_Availability_m3_capita"),
        ColumnDef::float("Economic_Loss_Billion_USD"),
    ])
}

/// National yearly rainfall and drought indicators.
pub fn rainfall_schema() -> Result<Schema> {
    Schema::new(vec![
        ColumnDef::category("Year"),
        ColumnDef::integer("Annual_Rainfall_mm"),
        ColumnDef::integer("Monsoon_Rainfall_mm"),
        ColumnDef::integer("Deficit_from_Normal_Percent"),
        ColumnDef::integer("Drought_Affected_Areas_Percent"),
        ColumnDef::integer("Flood_Events"),
        ColumnDef::category("Climate_Pattern"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Value, ValueKind};

    #[test]
    fn test_heatwave_schema_sentinels() {
        let schema = heatwave_schema().unwrap();
        assert_eq!(schema.len(), 9);
        let water = schema.column(heatwave::WATER_SHORTAGE_IMPACT).unwrap();
        assert_eq!(
            water.resolve(None).unwrap(),
            Value::from(heatwave::NO_WATER_IMPACT)
        );
        assert_eq!(
            schema.column(heatwave::YEAR).unwrap().kind,
            ValueKind::Category
        );
    }

    #[test]
    fn test_catalog_schemas_build() {
        assert_eq!(climate_overview_schema().unwrap().len(), 8);
        let rainfall = rainfall_schema().unwrap();
        let dims: Vec<_> = rainfall.dimensions().map(|c| c.name.clone()).collect();
        assert_eq!(dims, vec!["Year", "Climate_Pattern"]);
    }
}
