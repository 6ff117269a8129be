use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use qscore_instruments::{Catalog, load_definitions};
use qscore_model::{ItemSource, ScoringOptions, UnmappedPolicy};
use tracing::{info, info_span, warn};

use qscore_cli::pipeline::{RunReport, ScoreRequest, read_table, run, write_report_json, write_table};

use crate::cli::{InstrumentsArgs, ScoreArgs};
use crate::summary::apply_table_style;
use crate::types::{Failure, InstrumentSummary, ScoreResult};

fn load_catalog(definitions: Option<&Path>, replace: bool) -> Result<Catalog> {
    let mut catalog = Catalog::builtin();
    if let Some(path) = definitions {
        let loaded = load_definitions(path)
            .with_context(|| format!("load definitions {}", path.display()))?;
        if loaded.is_empty() {
            warn!(path = %path.display(), "definitions file declares nothing");
        }
        catalog.extend(loaded, replace).context("merge definitions")?;
    }
    Ok(catalog)
}

pub fn run_instruments(args: &InstrumentsArgs) -> Result<()> {
    let catalog = load_catalog(args.definitions.as_deref(), args.replace_definitions)?;
    let mut table = Table::new();
    table.set_header(vec!["Id", "Name", "Source prefix", "Items", "Subscales"]);
    apply_table_style(&mut table);
    for instrument in catalog.instruments() {
        let items = match &instrument.items {
            ItemSource::Listed(items) => items.len().to_string(),
            ItemSource::Prefixed { prefix, expected } => format!("{prefix}* ({expected})"),
        };
        let subscales = instrument
            .subscales
            .iter()
            .map(|s| format!("{} ({})", s.name, s.rule.kind()))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            instrument.id.clone(),
            instrument.name.clone(),
            instrument.source_prefix.clone().unwrap_or_else(|| "-".to_string()),
            items,
            if subscales.is_empty() { "-".to_string() } else { subscales },
        ]);
    }
    println!("{table}");
    if !catalog.relabel_sets().is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Relabel set", "Name", "Renames"]);
        apply_table_style(&mut table);
        for set in catalog.relabel_sets() {
            table.add_row(vec![
                set.id.clone(),
                set.name.clone(),
                set.renames.len().to_string(),
            ]);
        }
        println!("{table}");
    }
    Ok(())
}

pub fn run_score(args: &ScoreArgs) -> Result<ScoreResult> {
    let span = info_span!("score_file", input = %args.input.display());
    let _guard = span.enter();
    let started = Instant::now();

    let catalog = load_catalog(args.definitions.as_deref(), args.replace_definitions)?;
    let instruments = if args.all {
        catalog.instruments().to_vec()
    } else {
        catalog.select(&args.instruments)?
    };
    let relabel_sets = args
        .relabel
        .iter()
        .map(|id| catalog.relabel_set(id).cloned())
        .collect::<Result<Vec<_>, _>>()?;
    let options = ScoringOptions::new()
        .with_item_level(args.item_level)
        .with_item_count(args.item_count)
        .with_unmapped(if args.strict {
            UnmappedPolicy::Strict
        } else {
            UnmappedPolicy::Lenient
        })
        .with_respondent_column(args.respondent_column.clone());

    let df = read_table(&args.input)?;
    info!(rows = df.height(), columns = df.width(), "read input");

    let request = ScoreRequest {
        instruments,
        relabel_sets,
        options,
        strip_prefixes: !args.keep_prefix,
        only_present: args.all,
    };
    let mut output = run(df, &request)?;
    write_table(&mut output.outcome.data, &args.output)?;

    let report_json = match &args.report_json {
        Some(path) => Some(write_report_json(
            path,
            &RunReport::new(&args.input, &args.output, &request.options, &output),
        )?),
        None => None,
    };

    let instruments: Vec<InstrumentSummary> = output
        .outcome
        .outcomes
        .iter()
        .map(|outcome| InstrumentSummary {
            id: outcome.instrument.clone(),
            name: catalog
                .instrument(&outcome.instrument)
                .map(|i| i.name.clone())
                .unwrap_or_default(),
            report: outcome.result.as_ref().ok().cloned(),
            failure: outcome.result.as_ref().err().map(|err| Failure {
                rule: err.rule_id(),
                message: err.to_string(),
                validation: err.is_validation_failure(),
            }),
        })
        .collect();

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        output = %args.output.display(),
        "wrote scored table"
    );
    Ok(ScoreResult {
        input: args.input.clone(),
        output: args.output.clone(),
        report_json,
        rows: output.outcome.data.height(),
        columns: output.outcome.data.width(),
        has_errors: !output.outcome.is_success(),
        instruments,
        relabels: output.relabels,
        stripped_columns: output.stripped_columns,
        skipped: output.skipped,
    })
}
