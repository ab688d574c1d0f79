use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use epsg_cli::script::SessionReport;
use epsg_model::{EpsgEntry, EpsgRegistry};
use epsg_standards::LoadReport;

/// Number of registry entries using one coordinate system.
pub struct CoordSysCount {
    pub name: String,
    pub count: usize,
    pub supported: bool,
}

pub fn print_check_summary(report: &LoadReport, rows: &[CoordSysCount], unsupported: usize) {
    println!("Entries: {}", report.registry.len());
    println!("Lines read: {}", report.lines_read);
    println!("Skipped rows: {}", report.warnings.len());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Coordinate System"),
        header_cell("Codes"),
        header_cell("Supported"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for row in rows {
        let supported = if row.supported {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::Red)
        };
        table.add_row(vec![Cell::new(&row.name), Cell::new(row.count), supported]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.registry.len()).add_attribute(Attribute::Bold),
        count_cell(unsupported, Color::Red),
    ]);
    println!("{table}");
}

/// Table row for one autocomplete candidate. The echoed literal text has no entry.
pub fn candidate_row(candidate: &str, entry: Option<&EpsgEntry>) -> Vec<Cell> {
    match entry {
        Some(entry) => vec![
            Cell::new(candidate).add_attribute(Attribute::Bold),
            Cell::new(entry.datum().unwrap_or_default()),
            Cell::new(entry.coordinate_system().unwrap_or_default()),
        ],
        None => vec![Cell::new(candidate), dim_cell("-"), dim_cell("-")],
    }
}

pub fn print_session_report(report: &SessionReport, registry: &EpsgRegistry) {
    let mut steps = Table::new();
    steps.set_header(vec![
        header_cell("#"),
        header_cell("Step"),
        header_cell("Outcome"),
        header_cell("Text"),
    ]);
    apply_table_style(&mut steps);
    align_column(&mut steps, 0, CellAlignment::Right);
    for (idx, record) in report.steps.iter().enumerate() {
        let outcome = if record.outcome.starts_with("error:") || record.outcome == "rejected" {
            Cell::new(&record.outcome).fg(Color::Red)
        } else {
            Cell::new(&record.outcome)
        };
        steps.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&record.step),
            outcome,
            Cell::new(&record.text),
        ]);
    }
    println!("{steps}");

    println!("Side: {}", report.side);
    println!("Text: {}", report.text);
    println!("State: {}", report.state);
    println!("Popup: {}", if report.popup_open { "open" } else { "closed" });
    println!("Resolved: {}", report.resolved.as_deref().unwrap_or("-"));
    println!("Active code: {}", report.active_code.as_deref().unwrap_or("-"));

    if let Some(parameters) = &report.parameters {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Field"), header_cell("Value")]);
        apply_table_style(&mut table);
        for (label, value) in parameters.fields() {
            table.add_row(vec![label.to_string(), value]);
        }
        println!("{table}");
    }

    let mut candidates = Table::new();
    candidates.set_header(vec![
        header_cell("Candidate"),
        header_cell("Datum"),
        header_cell("Coordinate System"),
    ]);
    apply_table_style(&mut candidates);
    for candidate in &report.candidates {
        candidates.add_row(candidate_row(candidate, registry.get(candidate)));
    }
    println!("{candidates}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count).fg(color)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
