use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use hw_cli::args::FilterArg;
use hw_cli::config::DashboardConfig;
use hw_cli::render::{
    NO_DATA_MESSAGE, TableData, dataset_data, datasets_data, dimensions_data, record_data,
    summary_data,
};
use hw_cli::session::{DataSource, Session};
use hw_ingest::{BuiltinDataset, DatasetCache};
use hw_model::SortOrder;
use hw_model::catalog::heatwave::{CITY, DEATHS, YEAR};
use hw_output::{write_csv, write_csv_file};
use hw_query::{
    DashboardSummary, ExtremeKind, FilterPolicy, QueryError, ReduceKind, Reducer, arg_extreme,
    group_aggregate, total_by_reducer,
};
use tracing::info;

use crate::cli::{Cli, Command, DataArgs, ExportArgs, GroupArgs, TopArgs, TotalArgs};

pub fn run(cli: &Cli) -> Result<()> {
    let mut cache = DatasetCache::new();
    if matches!(cli.command, Command::Datasets) {
        return run_datasets(&mut cache);
    }

    let config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    let source = data_source(&cli.data, &config, cli.config.as_deref());
    let policy = filter_policy(&cli.data, config.policy);
    let dataset = source.load(&mut cache)?;
    info!(rows = dataset.len(), ?source, "dataset ready");

    let mut session = Session::open(dataset, policy, &config.defaults)?;
    session.apply_filters(&filter_overrides(&cli.data));

    match &cli.command {
        Command::Datasets => Ok(()),
        Command::Dimensions => run_dimensions(&session),
        Command::Summary => run_summary(&session),
        Command::Group(args) => run_group(&session, args),
        Command::Top(args) => run_top(&session, args),
        Command::Total(args) => run_total(&session, args),
        Command::Export(args) => run_export(&session, args),
    }
}

/// Flags win over the config file; the heatwave table is the fallback.
fn data_source(
    args: &DataArgs,
    config: &DashboardConfig,
    config_path: Option<&Path>,
) -> DataSource {
    if let Some(path) = &args.source {
        return DataSource::File {
            path: path.clone(),
            schema: args.schema,
        };
    }
    if let Some(builtin) = args.builtin {
        return DataSource::Builtin(builtin);
    }
    let config_source = config_path.and_then(|path| config.resolve_source(path));
    if let Some(path) = config_source {
        return DataSource::File { path, schema: None };
    }
    DataSource::Builtin(config.builtin.unwrap_or_default())
}

fn filter_policy(args: &DataArgs, mut policy: FilterPolicy) -> FilterPolicy {
    if let Some(empty) = args.empty_selection {
        policy.empty_selection = empty.into();
    }
    if let Some(unknown) = args.unknown_column {
        policy.unknown_column = unknown.into();
    }
    policy
}

fn filter_overrides(args: &DataArgs) -> Vec<FilterArg> {
    let mut filters = args.filters.clone();
    for (column, values) in [(CITY, &args.cities), (YEAR, &args.years)] {
        if !values.is_empty() {
            filters.push(FilterArg {
                column: column.to_string(),
                values: values
                    .iter()
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect(),
            });
        }
    }
    filters
}

fn run_datasets(cache: &mut DatasetCache) -> Result<()> {
    let mut entries = Vec::with_capacity(BuiltinDataset::ALL.len());
    for builtin in BuiltinDataset::ALL {
        let dataset = DataSource::Builtin(builtin).load(cache)?;
        entries.push((builtin, dataset.len()));
    }
    print_table(&datasets_data(&entries));
    Ok(())
}

fn run_dimensions(session: &Session) -> Result<()> {
    print_table(&dimensions_data(&session.engine().dimensions()));
    Ok(())
}

fn run_summary(session: &Session) -> Result<()> {
    let view = session.view()?;
    let Some(summary) = DashboardSummary::compute(&view)
        .context("summary cards need the heatwave columns")?
    else {
        println!("{NO_DATA_MESSAGE}");
        return Ok(());
    };
    print_table(&summary_data(&summary));

    let deaths = group_aggregate(
        &view,
        &[CITY],
        &[Reducer::new("Total_Deaths", DEATHS, ReduceKind::Sum)],
    )?
    .sorted_by("Total_Deaths", SortOrder::Descending)?;
    println!();
    println!("Deaths by city:");
    print_table(&dataset_data(&deaths));
    Ok(())
}

fn run_group(session: &Session, args: &GroupArgs) -> Result<()> {
    let view = session.view()?;
    let by: Vec<&str> = args.by.iter().map(String::as_str).collect();
    let mut grouped = group_aggregate(&view, &by, &args.reducers)?;
    if let Some(sort) = &args.sort {
        grouped = grouped.sorted_by(&sort.column, sort.order)?;
    }
    if grouped.is_empty() {
        println!("{NO_DATA_MESSAGE}");
    } else {
        print_table(&dataset_data(&grouped));
    }
    Ok(())
}

fn run_top(session: &Session, args: &TopArgs) -> Result<()> {
    let view = session.view()?;
    let kind = if args.min {
        ExtremeKind::Min
    } else {
        ExtremeKind::Max
    };
    match allow_empty(arg_extreme(&view, &args.column, kind))? {
        Some(record) => print_table(&record_data(view.schema(), record)),
        None => println!("{NO_DATA_MESSAGE}"),
    }
    Ok(())
}

fn run_total(session: &Session, args: &TotalArgs) -> Result<()> {
    let view = session.view()?;
    match allow_empty(total_by_reducer(&view, &args.column, args.kind))? {
        Some(value) => println!("{}({}) = {}", args.kind, args.column, value.render()),
        None => println!("{NO_DATA_MESSAGE}"),
    }
    Ok(())
}

fn run_export(session: &Session, args: &ExportArgs) -> Result<()> {
    let view = session.view()?;
    match &args.output {
        Some(path) => {
            write_csv_file(&view, path).with_context(|| format!("export {}", path.display()))?;
            println!("Wrote {} rows to {}", view.len(), path.display());
        }
        None => {
            let bytes = write_csv(&view)?;
            io::stdout()
                .lock()
                .write_all(&bytes)
                .context("write CSV to stdout")?;
        }
    }
    Ok(())
}

/// Turns an empty-input failure into `None` so it renders as "no data".
fn allow_empty<T>(result: hw_query::Result<T>) -> Result<Option<T>, QueryError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_empty_input() => Ok(None),
        Err(err) => Err(err),
    }
}

fn print_table(data: &TableData) {
    println!("{}", data.to_table());
}
