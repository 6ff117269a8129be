use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::{InstrumentSummary, ScoreResult};

pub fn print_summary(result: &ScoreResult) {
    println!("Input: {}", result.input.display());
    println!(
        "Output: {} ({} rows, {} columns)",
        result.output.display(),
        result.rows,
        result.columns
    );
    if let Some(path) = &result.report_json {
        println!("Report: {}", path.display());
    }
    for (set, report) in &result.relabels {
        println!(
            "Relabel {set}: {} columns renamed, {} sentinel cells cleared",
            report.renamed_columns, report.cleared_cells
        );
    }
    if result.stripped_columns > 0 {
        println!("Stripped source prefixes from {} columns", result.stripped_columns);
    }
    if !result.skipped.is_empty() {
        println!("Not in table: {}", result.skipped.join(", "));
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Instrument"),
        header_cell("Name"),
        header_cell("Status"),
        header_cell("Items"),
        header_cell("Subscales"),
        header_cell("Missing scores"),
        header_cell("Unmapped"),
        header_cell("Dropped"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 3..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 2, CellAlignment::Center);

    let mut total_unmapped = 0usize;
    let mut failed = 0usize;
    for summary in &result.instruments {
        match &summary.report {
            Some(report) => {
                let missing: usize = report.scales.iter().map(|s| s.missing_scores).sum();
                total_unmapped += report.total_unmapped();
                table.add_row(vec![
                    instrument_cell(summary),
                    Cell::new(&summary.name),
                    Cell::new("OK").fg(Color::Green).add_attribute(Attribute::Bold),
                    Cell::new(report.items),
                    Cell::new(report.scales.len()),
                    count_cell(missing, Color::Yellow),
                    count_cell(report.total_unmapped(), Color::Yellow),
                    dim_cell(report.dropped_columns.len()),
                ]);
            }
            None => {
                failed += 1;
                let rule = summary.failure.as_ref().map_or("-", |f| f.rule);
                table.add_row(vec![
                    instrument_cell(summary),
                    Cell::new(&summary.name),
                    Cell::new(rule.to_uppercase())
                        .fg(Color::Red)
                        .add_attribute(Attribute::Bold),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                ]);
            }
        }
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} instruments", result.instruments.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(failed, Color::Red).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
        count_cell(total_unmapped, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
    print_scale_table(result);
    print_unmapped_table(result);

    let failures: Vec<_> = result
        .instruments
        .iter()
        .filter_map(|s| s.failure.as_ref().map(|f| (&s.id, f)))
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for (id, failure) in failures {
            eprintln!("- {id}: {}", failure.message);
            if failure.validation {
                eprintln!("  no columns were written; check the definition against the data");
            }
        }
    }
}

fn print_scale_table(result: &ScoreResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Rule"),
        header_cell("Items"),
        header_cell("Observed"),
        header_cell("Possible"),
        header_cell("Missing"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    let mut rows = 0;
    for report in result.instruments.iter().filter_map(|s| s.report.as_ref()) {
        for scale in &report.scales {
            rows += 1;
            table.add_row(vec![
                Cell::new(&scale.column),
                Cell::new(&scale.rule),
                Cell::new(scale.n_items),
                range_cell(scale.observed_min, scale.observed_max),
                range_cell(scale.theoretical_min, scale.theoretical_max),
                count_cell(scale.missing_scores, Color::Yellow),
            ]);
        }
    }
    if rows == 0 {
        return;
    }
    println!();
    println!("Subscales:");
    println!("{table}");
}

fn print_unmapped_table(result: &ScoreResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Instrument"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Examples"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    let mut rows = 0;
    for report in result.instruments.iter().filter_map(|s| s.report.as_ref()) {
        for unmapped in &report.unmapped {
            rows += 1;
            table.add_row(vec![
                Cell::new(&report.instrument)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                Cell::new(&unmapped.column),
                Cell::new(unmapped.count).fg(Color::Yellow),
                Cell::new(unmapped.examples.join(", ")),
            ]);
        }
    }
    if rows == 0 {
        return;
    }
    println!();
    println!("Unmapped responses (scored as missing):");
    println!("{table}");
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn instrument_cell(summary: &InstrumentSummary) -> Cell {
    let color = if summary.failure.is_some() {
        Color::Red
    } else {
        Color::Blue
    };
    Cell::new(&summary.id)
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn range_cell(min: Option<f64>, max: Option<f64>) -> Cell {
    match (min, max) {
        (Some(min), Some(max)) => Cell::new(format!("{min}–{max}")),
        _ => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
