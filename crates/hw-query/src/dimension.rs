//! Filter dimensions and their initial selections.

use std::collections::BTreeMap;

use hw_model::Dataset;
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};
use crate::filter::FilterSpec;

/// A filterable column and the values it takes in the loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub column: String,
    /// Distinct values in first-appearance order.
    pub values: Vec<String>,
}

/// Category columns of `dataset` with their value domains.
pub fn dimensions(dataset: &Dataset) -> Vec<Dimension> {
    dataset
        .schema()
        .dimensions()
        .map(|column| Dimension {
            column: column.name.clone(),
            values: dataset.distinct_values(&column.name).unwrap_or_default(),
        })
        .collect()
}

/// Initial state of a selection widget.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultSelection {
    /// Every value in the domain.
    #[default]
    All,
    /// Only the first value of the domain.
    First,
    /// A fixed list; entries missing from the domain are dropped.
    Values(Vec<String>),
}

impl DefaultSelection {
    /// Resolves the selection against a value domain.
    pub fn resolve(&self, domain: &[String]) -> Vec<String> {
        match self {
            Self::All => domain.to_vec(),
            Self::First => domain.iter().take(1).cloned().collect(),
            Self::Values(values) => values
                .iter()
                .filter(|v| domain.contains(v))
                .cloned()
                .collect(),
        }
    }
}

/// Builds the filter spec a dashboard opens with.
///
/// Every dimension gets an entry. Dimensions without a configured default
/// select all of their values. Defaults naming a column the dataset does not
/// have are rejected.
pub fn initial_filter_spec(
    dataset: &Dataset,
    defaults: &BTreeMap<String, DefaultSelection>,
) -> Result<FilterSpec> {
    if let Some(column) = defaults
        .keys()
        .find(|column| dataset.schema().index_of(column).is_none())
    {
        return Err(QueryError::UnknownColumn {
            column: column.clone(),
        });
    }

    let mut spec = FilterSpec::new();
    for dimension in dimensions(dataset) {
        let selection = defaults
            .get(&dimension.column)
            .cloned()
            .unwrap_or_default();
        spec.insert(dimension.column.clone(), selection.resolve(&dimension.values));
    }
    for (column, selection) in defaults {
        if spec.get(column).is_none() {
            let domain = dataset.distinct_values(column)?;
            spec.insert(column.clone(), selection.resolve(&domain));
        }
    }
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use hw_model::{ColumnDef, Record, Schema};

    use super::*;

    fn sample() -> Dataset {
        let schema = Arc::new(
            Schema::new(vec![
                ColumnDef::category("City"),
                ColumnDef::category("Year"),
                ColumnDef::integer("Deaths"),
            ])
            .unwrap(),
        );
        let row = |city: &str, year: &str, deaths: i64| {
            Record::new(vec![city.into(), year.into(), deaths.into()])
        };
        Dataset::from_rows(
            schema,
            vec![
                row("Karachi", "2024", 568),
                row("Lahore", "2023", 12),
                row("Karachi", "2023", 65),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_dimensions_follow_data() {
        let dims = dimensions(&sample());
        assert_eq!(
            dims,
            vec![
                Dimension {
                    column: "City".to_string(),
                    values: vec!["Karachi".to_string(), "Lahore".to_string()],
                },
                Dimension {
                    column: "Year".to_string(),
                    values: vec!["2024".to_string(), "2023".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_default_selection_resolve() {
        let domain = vec!["2024".to_string(), "2023".to_string()];
        assert_eq!(DefaultSelection::All.resolve(&domain), domain);
        assert_eq!(DefaultSelection::First.resolve(&domain), vec!["2024"]);
        assert_eq!(
            DefaultSelection::Values(vec!["2023".into(), "2019".into()]).resolve(&domain),
            vec!["2023"]
        );
        assert!(DefaultSelection::First.resolve(&[]).is_empty());
    }

    #[test]
    fn test_initial_filter_spec() {
        let ds = sample();
        let mut defaults = BTreeMap::new();
        defaults.insert("Year".to_string(), DefaultSelection::First);
        let spec = initial_filter_spec(&ds, &defaults).unwrap();
        assert_eq!(spec.get("City").unwrap().len(), 2);
        assert_eq!(
            spec.get("Year").unwrap().iter().collect::<Vec<_>>(),
            vec!["2024"]
        );
    }

    #[test]
    fn test_initial_filter_spec_on_numeric_column() {
        let ds = sample();
        let mut defaults = BTreeMap::new();
        defaults.insert(
            "Deaths".to_string(),
            DefaultSelection::Values(vec!["568".into()]),
        );
        let spec = initial_filter_spec(&ds, &defaults).unwrap();
        assert!(spec.get("Deaths").unwrap().contains("568"));
    }

    #[test]
    fn test_initial_filter_spec_rejects_unknown_column() {
        let mut defaults = BTreeMap::new();
        defaults.insert("Province".to_string(), DefaultSelection::All);
        assert!(matches!(
            initial_filter_spec(&sample(), &defaults),
            Err(QueryError::UnknownColumn { .. })
        ));
    }
}
