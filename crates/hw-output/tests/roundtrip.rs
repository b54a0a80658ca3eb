//! Exported views load back to the same dataset.

use std::sync::Arc;

use hw_ingest::{BuiltinDataset, load_csv, load_csv_bytes};
use hw_model::{ColumnDef, Dataset, Record, Schema, Value};
use hw_output::{write_csv, write_csv_file};
use hw_query::{FilterSpec, filter};
use proptest::prelude::*;

const CITIES: &[&str] = &["Jacobabad", "Karachi", "Lahore", "Mohenjo-daro"];
const YEARS: &[&str] = &["2022", "2023", "2024"];
const IMPACTS: &[&str] = &[
    "No significant impact",
    "Tanker supply, disrupted",
    "Wells \"depleted\"",
];

fn schema() -> Arc<Schema> {
    Arc::new(
        Schema::new(vec![
            ColumnDef::category("City"),
            ColumnDef::category("Year"),
            ColumnDef::integer("Deaths").fill(0i64),
            ColumnDef::float("Peak_Temp_C"),
            ColumnDef::text("Water_Shortage_Impact").fill("No significant impact"),
        ])
        .unwrap(),
    )
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(
        (
            prop::sample::select(CITIES),
            prop::sample::select(YEARS),
            -5i64..5000,
            -10.0f64..60.0,
            prop::sample::select(IMPACTS),
        ),
        0..30,
    )
    .prop_map(|rows| {
        let rows = rows
            .into_iter()
            .map(|(city, year, deaths, temp, impact)| {
                Record::new(vec![
                    city.into(),
                    year.into(),
                    Value::Integer(deaths),
                    Value::Float(temp),
                    impact.into(),
                ])
            })
            .collect();
        Dataset::from_rows(schema(), rows).unwrap()
    })
}

proptest! {
    #[test]
    fn filtered_view_round_trips(
        ds in dataset_strategy(),
        cities in prop::sample::subsequence(CITIES, 0..=CITIES.len()),
    ) {
        let view = filter(&ds, &FilterSpec::new().with("City", cities)).unwrap();

        let bytes = write_csv(&view).unwrap();
        let reloaded = load_csv_bytes(&bytes, Some(view.schema_arc()), "export.csv").unwrap();
        prop_assert_eq!(reloaded, view);
    }
}

#[test]
fn empty_view_round_trips() {
    let ds = BuiltinDataset::Heatwave.load().unwrap();
    let view = filter(&ds, &FilterSpec::new().with("City", Vec::<String>::new())).unwrap();
    assert!(view.is_empty());

    let bytes = write_csv(&view).unwrap();
    let text = String::from_utf8(bytes.clone()).unwrap();
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("City,Year,"));

    let reloaded = load_csv_bytes(&bytes, Some(view.schema_arc()), "export.csv").unwrap();
    assert!(reloaded.is_empty());
    assert_eq!(reloaded, view);
}

#[test]
fn builtin_heatwave_round_trips_through_file() {
    let ds = BuiltinDataset::Heatwave.load().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heatwave.csv");

    write_csv_file(&ds, &path).unwrap();
    let reloaded = load_csv(&path, Some(ds.schema_arc())).unwrap();
    assert_eq!(reloaded, ds);
}

#[test]
fn export_of_filtered_builtin() {
    let ds = BuiltinDataset::Heatwave.load().unwrap();
    let spec = FilterSpec::new()
        .with("City", ["Karachi"])
        .with("Year", ["2024", "2025"]);
    let view = filter(&ds, &spec).unwrap();
    let text = String::from_utf8(write_csv(&view).unwrap()).unwrap();
    insta::assert_snapshot!(text.trim_end(), @r"
    City,Year,Peak_Temp_C,Deaths,Heatstroke_Cases,Agriculture_Loss_pct,Livestock_Loss,Water_Shortage_Impact,Duration_Days
    Karachi,2024,42,568,3200,0,No data available,Tanker supply disrupted,7
    Karachi,2025,44.5,120,1800,0,No data available,Tanker supply disrupted,6
    ");
}
