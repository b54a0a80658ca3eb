//! Rendered views of the built-in heatwave table.

use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

use hw_cli::args::FilterArg;
use hw_cli::config::DashboardConfig;
use hw_cli::render::{dataset_data, datasets_data, dimensions_data, record_data, summary_data};
use hw_cli::session::{DataSource, Session};
use hw_ingest::{BuiltinDataset, DatasetCache};
use hw_model::{Dataset, SortOrder};
use hw_query::{
    DashboardSummary, DefaultSelection, ExtremeKind, FilterPolicy, ReduceKind, Reducer,
    arg_extreme, group_aggregate,
};
use tempfile::NamedTempFile;

fn heatwave() -> Arc<Dataset> {
    DataSource::default()
        .load(&mut DatasetCache::new())
        .unwrap()
}

fn filter_arg(column: &str, values: &[&str]) -> FilterArg {
    FilterArg {
        column: column.to_string(),
        values: values.iter().map(ToString::to_string).collect(),
    }
}

#[test]
fn summary_cards_for_two_cities() {
    let mut session = Session::open(heatwave(), FilterPolicy::default(), &BTreeMap::new()).unwrap();
    session.apply_filters(&[
        filter_arg("City", &["Karachi", "Jacobabad"]),
        filter_arg("Year", &["2024"]),
    ]);
    let summary = DashboardSummary::compute(&session.view().unwrap())
        .unwrap()
        .unwrap();

    insta::assert_json_snapshot!(summary_data(&summary), @r#"
    {
      "header": [
        "Metric",
        "Value"
      ],
      "rows": [
        [
          "Records",
          "2"
        ],
        [
          "Cities",
          "2"
        ],
        [
          "Total deaths",
          "598"
        ],
        [
          "Total heatstroke cases",
          "4000"
        ],
        [
          "Peak temperature",
          "52"
        ],
        [
          "Peak city",
          "Jacobabad"
        ],
        [
          "Peak year",
          "2024"
        ],
        [
          "Mean agriculture loss %",
          "10.00"
        ]
      ],
      "numeric": []
    }
    "#);
}

#[test]
fn deaths_by_city_sorted() {
    let mut session = Session::open(heatwave(), FilterPolicy::default(), &BTreeMap::new()).unwrap();
    session.apply_filters(&[filter_arg("Year", &["2024"])]);
    let grouped = group_aggregate(
        &session.view().unwrap(),
        &["City"],
        &[Reducer::new("Total_Deaths", "Deaths", ReduceKind::Sum)],
    )
    .unwrap()
    .sorted_by("Total_Deaths", SortOrder::Descending)
    .unwrap();

    insta::assert_json_snapshot!(dataset_data(&grouped), @r#"
    {
      "header": [
        "City",
        "Total_Deaths"
      ],
      "rows": [
        [
          "Karachi",
          "568"
        ],
        [
          "Jacobabad",
          "30"
        ],
        [
          "Larkana",
          "21"
        ],
        [
          "Lahore",
          "18"
        ],
        [
          "Multan",
          "16"
        ],
        [
          "Mohenjo-daro",
          "14"
        ]
      ],
      "numeric": [
        1
      ]
    }
    "#);
}

#[test]
fn coolest_record_table() {
    let ds = heatwave();
    let record = arg_extreme(&ds, "Peak_Temp_C", ExtremeKind::Min).unwrap();
    let data = record_data(ds.schema(), record);
    assert_eq!(data.rows[0], vec!["City", "Karachi"]);
    assert_eq!(data.rows[1], vec!["Year", "2024"]);

    let rendered = data.to_table().to_string();
    assert!(rendered.contains("Peak_Temp_C"));
    assert!(rendered.contains("No data available"));
}

#[test]
fn dimensions_follow_first_appearance() {
    let session = Session::open(heatwave(), FilterPolicy::default(), &BTreeMap::new()).unwrap();
    let data = dimensions_data(&session.engine().dimensions());
    assert_eq!(data.header, vec!["Dimension", "Count", "Values"]);
    assert_eq!(
        data.rows[0],
        vec![
            "City",
            "10",
            "Jacobabad, Karachi, Lahore, Dadu, Turbat, Nawabshah, Multan, Sibi, Mohenjo-daro, Larkana"
        ]
    );
    assert_eq!(
        data.rows[1],
        vec!["Year", "6", "2020, 2021, 2022, 2023, 2024, 2025"]
    );
}

#[test]
fn datasets_table_lists_builtins() {
    let mut cache = DatasetCache::new();
    let entries: Vec<_> = BuiltinDataset::ALL
        .into_iter()
        .map(|builtin| (builtin, cache.load_builtin(builtin).unwrap().len()))
        .collect();
    let data = datasets_data(&entries);
    let names: Vec<&str> = data.rows.iter().map(|row| row[0].as_str()).collect();
    assert_eq!(names, vec!["heatwave", "climate-overview", "rainfall"]);
    assert_eq!(data.rows[0][1], "25");

    let rendered = data.to_table().to_string();
    assert!(rendered.contains("climate-overview"));
}

#[test]
fn config_file_defaults_drive_initial_view() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "builtin": "heatwave", "defaults": {{ "Year": {{ "values": ["2025"] }} }} }}"#
    )
    .unwrap();
    let config = DashboardConfig::load(file.path()).unwrap();
    assert_eq!(
        config.defaults.get("Year"),
        Some(&DefaultSelection::Values(vec!["2025".to_string()]))
    );

    let session = Session::open(heatwave(), config.policy, &config.defaults).unwrap();
    assert_eq!(session.view().unwrap().len(), 4);
}

#[test]
fn empty_city_selection_has_no_summary() {
    let mut session = Session::open(heatwave(), FilterPolicy::default(), &BTreeMap::new()).unwrap();
    session.apply_filters(&[filter_arg("City", &[])]);
    let view = session.view().unwrap();
    assert!(view.is_empty());
    assert_eq!(DashboardSummary::compute(&view).unwrap(), None);
}
