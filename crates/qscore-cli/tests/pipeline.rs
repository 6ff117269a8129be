//! Integration tests for the pipeline module.

use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};
use qscore_cli::pipeline::{
    RunReport, ScoreRequest, instruments_present, read_table, run, strip_source_prefixes,
    write_table,
};
use qscore_instruments::{get_instrument, get_relabel_set};
use qscore_model::{Instrument, ScoringOptions};

fn builtin(id: &str) -> Instrument {
    get_instrument(id).expect("builtin").clone()
}

/// Two respondents answering every BIS/BAS item with 2, columns qualified
/// with the export file name.
fn bisbas_export() -> DataFrame {
    let mut columns: Vec<Column> =
        vec![Series::new("subject".into(), &["s1", "s2"]).into_column()];
    for n in 1..=24 {
        columns.push(Series::new(format!("bisbas01_bisbas{n}").into(), &[2i64, 2]).into_column());
    }
    DataFrame::new(columns).unwrap()
}

fn temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("qscore_cli_pipeline_{stamp}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn f64_at(df: &DataFrame, column: &str, row: usize) -> Option<f64> {
    match df.column(column).unwrap().get(row).unwrap() {
        AnyValue::Null => None,
        value => value.extract::<f64>(),
    }
}

#[test]
fn strips_source_prefix_before_scoring() {
    let request = ScoreRequest {
        instruments: vec![builtin("bisbas")],
        strip_prefixes: true,
        ..ScoreRequest::default()
    };
    let output = run(bisbas_export(), &request).unwrap();

    assert!(output.outcome.is_success());
    assert_eq!(output.stripped_columns, 24);
    let data = &output.outcome.data;
    assert_eq!(f64_at(data, "bisbas_bis", 0), Some(14.0));
    assert_eq!(f64_at(data, "bisbas_bas_drive", 1), Some(8.0));
    assert!(data.column("subject").is_ok());
    assert!(data.column("bisbas3").is_err());
}

#[test]
fn keep_prefix_leaves_items_unresolved() {
    let request = ScoreRequest {
        instruments: vec![builtin("bisbas")],
        strip_prefixes: false,
        ..ScoreRequest::default()
    };
    let output = run(bisbas_export(), &request).unwrap();

    let failures: Vec<_> = output.outcome.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].1.rule_id(), "missing_columns");
    assert_eq!(output.outcome.data.width(), 25);
}

#[test]
fn only_present_skips_instruments_without_items() {
    let mut df = bisbas_export();
    let instruments = vec![builtin("bisbas"), builtin("shaps"), builtin("mfq")];
    strip_source_prefixes(&mut df, &instruments).unwrap();
    let present = instruments_present(&df, &instruments);
    assert_eq!(present.len(), 1);

    let request = ScoreRequest {
        instruments,
        strip_prefixes: true,
        only_present: true,
        ..ScoreRequest::default()
    };
    let output = run(bisbas_export(), &request).unwrap();
    assert_eq!(output.skipped, ["shaps", "mfq"]);
    assert!(output.outcome.is_success());
}

#[test]
fn relabel_runs_before_scoring() {
    let mut df = bisbas_export();
    df.with_column(Series::new("wasi201_fsiq".into(), &[101.0, 999.0]))
        .unwrap();
    let request = ScoreRequest {
        instruments: vec![builtin("bisbas")],
        relabel_sets: vec![get_relabel_set("wasi").unwrap().clone()],
        strip_prefixes: true,
        ..ScoreRequest::default()
    };
    let output = run(df, &request).unwrap();

    assert_eq!(output.relabels[0].0, "wasi");
    assert_eq!(output.relabels[0].1.cleared_cells, 1);
    let data = &output.outcome.data;
    assert_eq!(f64_at(data, "fsiq", 0), Some(101.0));
    assert_eq!(f64_at(data, "fsiq", 1), None);
}

#[test]
fn csv_round_trip_through_scoring() {
    let dir = temp_dir();
    let input = dir.join("export.csv");
    let scored = dir.join("scored.csv");

    let mut header = vec!["subject".to_string()];
    header.extend((1..=14).map(|n| format!("shaps01_shaps{n}")));
    let rows = [
        // strongly disagree on every item
        format!("s1,{}", vec!["1"; 14].join(",")),
        // one 999 sentinel, one skipped answer, the rest agree
        format!("s2,999,,{}", vec!["3"; 12].join(",")),
    ];
    fs::write(&input, format!("{}\n{}\n", header.join(","), rows.join("\n"))).unwrap();

    let request = ScoreRequest {
        instruments: vec![builtin("shaps")],
        strip_prefixes: true,
        options: ScoringOptions::default(),
        ..ScoreRequest::default()
    };
    let mut output = run(read_table(&input).unwrap(), &request).unwrap();
    write_table(&mut output.outcome.data, &scored).unwrap();

    let back = read_table(&scored).unwrap();
    let names: Vec<&str> = back.get_column_names().iter().map(|n| n.as_str()).collect();
    assert_eq!(names, ["subject", "shaps_tot_nan_count", "shaps_tot"]);
    assert_eq!(f64_at(&back, "shaps_tot", 0), Some(14.0));
    assert_eq!(f64_at(&back, "shaps_tot", 1), Some(0.0));
    assert_eq!(f64_at(&back, "shaps_tot_nan_count", 1), Some(2.0));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn run_report_serializes_outcomes() {
    let request = ScoreRequest {
        instruments: vec![builtin("bisbas"), builtin("rbqa")],
        strip_prefixes: true,
        ..ScoreRequest::default()
    };
    let output = run(bisbas_export(), &request).unwrap();
    let report = RunReport::new(
        Path::new("export.csv"),
        Path::new("scored.csv"),
        &request.options,
        &output,
    );
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["rows"], 2);
    assert_eq!(value["instruments"][0]["status"], "scored");
    assert_eq!(value["instruments"][0]["report"]["scales"][0]["column"], "bisbas_bis");
    assert_eq!(value["instruments"][1]["status"], "failed");
    assert_eq!(value["instruments"][1]["rule"], "missing_columns");
    assert_eq!(value["options"]["item_level"], "drop");
}
