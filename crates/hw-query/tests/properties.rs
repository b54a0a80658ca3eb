//! Behavioural properties of filtering and aggregation.

use std::sync::Arc;

use hw_model::{ColumnDef, Dataset, Record, Schema, Value};
use hw_query::{
    ExtremeKind, FilterSpec, ReduceKind, Reducer, arg_extreme, filter, group_aggregate,
    total_by_reducer,
};
use proptest::prelude::*;

const CITIES: &[&str] = &["Jacobabad", "Karachi", "Lahore", "Nawabshah", "Dadu"];
const YEARS: &[&str] = &["2020", "2021", "2022", "2023", "2024"];

fn schema() -> Arc<Schema> {
    Arc::new(
        Schema::new(vec![
            ColumnDef::category("City"),
            ColumnDef::category("Year"),
            ColumnDef::integer("Deaths").fill(0i64),
            ColumnDef::float("Temp"),
        ])
        .unwrap(),
    )
}

fn record(city: &str, year: &str, deaths: i64, temp: f64) -> Record {
    Record::new(vec![city.into(), year.into(), deaths.into(), temp.into()])
}

fn dataset_strategy() -> impl Strategy<Value = Dataset> {
    prop::collection::vec(
        (
            prop::sample::select(CITIES),
            prop::sample::select(YEARS),
            0i64..600,
            30.0f64..55.0,
        ),
        0..40,
    )
    .prop_map(|rows| {
        let rows = rows
            .into_iter()
            .map(|(city, year, deaths, temp)| record(city, year, deaths, temp))
            .collect();
        Dataset::from_rows(schema(), rows).unwrap()
    })
}

fn spec_strategy() -> impl Strategy<Value = FilterSpec> {
    (
        prop::option::of(prop::sample::subsequence(CITIES, 0..=CITIES.len())),
        prop::option::of(prop::sample::subsequence(YEARS, 0..=YEARS.len())),
    )
        .prop_map(|(cities, years)| {
            let mut spec = FilterSpec::new();
            if let Some(cities) = cities {
                spec.insert("City", cities);
            }
            if let Some(years) = years {
                spec.insert("Year", years);
            }
            spec
        })
}

/// True if `sub` appears in `full` in the same relative order.
fn is_subsequence(sub: &Dataset, full: &Dataset) -> bool {
    let mut remaining = full.iter();
    sub.iter()
        .all(|wanted| remaining.by_ref().any(|candidate| candidate == wanted))
}

proptest! {
    #[test]
    fn filter_is_idempotent(ds in dataset_strategy(), spec in spec_strategy()) {
        let once = filter(&ds, &spec).unwrap();
        let twice = filter(&once, &spec).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filter_preserves_order(ds in dataset_strategy(), spec in spec_strategy()) {
        let out = filter(&ds, &spec).unwrap();
        prop_assert!(is_subsequence(&out, &ds));
    }

    #[test]
    fn filter_keeps_exactly_matching_rows(ds in dataset_strategy(), spec in spec_strategy()) {
        let out = filter(&ds, &spec).unwrap();
        let expected = ds
            .iter()
            .filter(|r| {
                spec.constraints().all(|(column, accepted)| {
                    let index = ds.column_index(column).unwrap();
                    accepted.contains(&r.get(index).render())
                })
            })
            .count();
        prop_assert_eq!(out.len(), expected);
    }

    #[test]
    fn empty_city_selection_matches_nothing(ds in dataset_strategy()) {
        let spec = FilterSpec::new().with("City", Vec::<String>::new());
        prop_assert!(filter(&ds, &spec).unwrap().is_empty());
    }

    #[test]
    fn group_sums_add_up_to_total(ds in dataset_strategy()) {
        let grouped = group_aggregate(
            &ds,
            &["City", "Year"],
            &[Reducer::new("TotalDeaths", "Deaths", ReduceKind::Sum)],
        )
        .unwrap();
        let total = total_by_reducer(&ds, "Deaths", ReduceKind::Sum).unwrap();
        let regrouped = total_by_reducer(&grouped, "TotalDeaths", ReduceKind::Sum).unwrap();
        prop_assert_eq!(total, regrouped);
    }
}

#[test]
fn group_sum_follows_first_appearance() {
    let ds = Dataset::from_rows(
        schema(),
        vec![
            record("Jacobabad", "2022", 2, 50.0),
            record("Jacobabad", "2022", 3, 50.0),
            record("Nawabshah", "2022", 5, 49.0),
        ],
    )
    .unwrap();

    let out = group_aggregate(
        &ds,
        &["City"],
        &[Reducer::new("TotalDeaths", "Deaths", ReduceKind::Sum)],
    )
    .unwrap();

    let rows: Vec<Vec<Value>> = out.iter().map(|r| r.values().to_vec()).collect();
    assert_eq!(
        rows,
        vec![
            vec![Value::from("Jacobabad"), Value::Integer(5)],
            vec![Value::from("Nawabshah"), Value::Integer(5)],
        ]
    );
}

#[test]
fn arg_extreme_prefers_first_of_tied_rows() {
    let ds = Dataset::from_rows(
        schema(),
        vec![record("A", "2024", 0, 47.0), record("B", "2024", 0, 47.0)],
    )
    .unwrap();
    let row = arg_extreme(&ds, "Temp", ExtremeKind::Max).unwrap();
    assert_eq!(row.get(0), &Value::from("A"));
}

#[test]
fn empty_input_policies_differ_by_reducer() {
    let ds = Dataset::empty(schema());
    assert!(arg_extreme(&ds, "Temp", ExtremeKind::Max).unwrap_err().is_empty_input());
    assert_eq!(
        total_by_reducer(&ds, "Deaths", ReduceKind::Sum).unwrap(),
        Value::Integer(0)
    );
    assert!(total_by_reducer(&ds, "Temp", ReduceKind::Max).unwrap_err().is_empty_input());
}
