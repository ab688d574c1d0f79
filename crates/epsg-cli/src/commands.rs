use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span, warn};

use epsg_cli::script::replay;
use epsg_core::{ApplicationError, EpsgCatalog, EpsgPanel, derive_parameters};
use epsg_model::{CoordinateSystemKind, DerivedParameters, EpsgRegistry};
use epsg_search::AutocompleteSession;
use epsg_standards::{LoadReport, default_epsg_csv_path, load};

use crate::cli::{SearchArgs, SessionArgs, ShowArgs};
use crate::summary::{
    CoordSysCount, apply_table_style, candidate_row, header_cell, print_check_summary,
    print_session_report,
};

/// Loads the table from `data_file`, or from `MSPCCS_DATA` when not given.
fn load_registry(data_file: Option<&Path>) -> Result<LoadReport> {
    let path = match data_file {
        Some(path) => path.to_path_buf(),
        None => default_epsg_csv_path().context("locate EPSG table")?,
    };
    let report = load(&path).with_context(|| format!("load EPSG table {}", path.display()))?;
    for warning in &report.warnings {
        warn!(line = warning.line, "{warning}");
    }
    Ok(report)
}

pub fn run_check(data_file: Option<&Path>) -> Result<()> {
    let span = info_span!("check");
    let _guard = span.enter();
    let report = load_registry(data_file)?;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for (_, entry) in report.registry.iter() {
        let name = entry.coordinate_system().unwrap_or_default().to_string();
        *counts.entry(name).or_default() += 1;
    }
    let mut unsupported = 0usize;
    for (code, entry) in report.registry.iter() {
        if let Err(err) = derive_parameters(code, entry) {
            unsupported += 1;
            info!(code, error = %err, "code cannot be applied");
        }
    }
    let rows: Vec<CoordSysCount> = counts
        .into_iter()
        .map(|(name, count)| CoordSysCount {
            supported: name.parse::<CoordinateSystemKind>().is_ok(),
            name,
            count,
        })
        .collect();

    print_check_summary(&report, &rows, unsupported);
    Ok(())
}

pub fn run_search(data_file: Option<&Path>, args: &SearchArgs) -> Result<()> {
    let report = load_registry(data_file)?;
    let catalog = EpsgCatalog::new(report.registry);
    let mut session = AutocompleteSession::new(Arc::clone(catalog.index()));
    if let Some(query) = args.query.as_deref().filter(|query| !query.is_empty()) {
        session.set_text(query);
        session.process_pending();
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Datum"),
        header_cell("Coordinate System"),
    ]);
    apply_table_style(&mut table);
    let registry = catalog.registry();
    let shown = session.candidates().iter().take(args.limit);
    for candidate in shown {
        table.add_row(candidate_row(candidate, registry.get(candidate)));
    }
    println!("{table}");
    let total = session.candidates().len();
    if total > args.limit {
        println!("{} of {total} candidates shown", args.limit);
    }
    if let Some(code) = session.resolved_value() {
        println!("Resolved: {code}");
    }
    Ok(())
}

pub fn run_show(data_file: Option<&Path>, args: &ShowArgs) -> Result<()> {
    let report = load_registry(data_file)?;
    let parameters = show_parameters(&report.registry, &args.code)?;
    if args.json {
        let json = serde_json::to_string_pretty(&parameters).context("serialize parameters")?;
        println!("{json}");
        return Ok(());
    }

    println!("EPSG: {}", args.code);
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    for (label, value) in parameters.fields() {
        table.add_row(vec![label.to_string(), value]);
    }
    println!("{table}");
    Ok(())
}

fn show_parameters(
    registry: &EpsgRegistry,
    code: &str,
) -> Result<DerivedParameters, ApplicationError> {
    let entry = registry
        .get(code)
        .ok_or_else(|| ApplicationError::UnsupportedCode(code.to_string()))?;
    derive_parameters(code, entry)
}

pub fn run_session(data_file: Option<&Path>, args: &SessionArgs) -> Result<()> {
    let report = load_registry(data_file)?;
    let catalog = EpsgCatalog::new(report.registry);
    if catalog.registry().is_empty() {
        warn!("EPSG table is empty; every code will be rejected");
    }
    let mut panel = EpsgPanel::new(args.side.into(), &catalog);
    let session_report = replay(&mut panel, &args.steps);

    if args.json {
        let json =
            serde_json::to_string_pretty(&session_report).context("serialize session report")?;
        println!("{json}");
    } else {
        print_session_report(&session_report, catalog.registry());
    }
    Ok(())
}
