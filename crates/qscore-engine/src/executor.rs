//! Per-instrument scoring: recode, reverse, aggregate, validate, assemble.

use polars::prelude::DataFrame;
use qscore_common::prefixed_columns;
use qscore_model::{
    Instrument, InstrumentReport, ItemRange, ItemSource, ScaleReport, ScoringOptions,
    ScoringRule, Subscale, UnmappedPolicy,
};
use tracing::{debug, info, info_span};

use crate::aggregate::{Additive, aggregate};
use crate::derive::{GroupLabel, any_endorsed, classify_groups, pass_through, severity_index};
use crate::error::{Result, ScoringError};
use crate::frame::{
    drop_existing, has_column, set_count_column, set_f64_column, set_label_column, string_column,
};
use crate::recode::{ItemMatrix, Recoding, recode_items};
use crate::reverse;
use crate::validate::{
    Observed, check_bounds, check_coverage, check_exhaustive, check_item_references, check_range,
    theoretical_range,
};

/// A scored table and what happened while scoring it.
#[derive(Debug, Clone)]
pub struct Scored {
    pub data: DataFrame,
    pub report: InstrumentReport,
}

/// Derived values of one subscale, held until every subscale has validated.
enum ScaleOutput {
    Additive(Additive),
    Values(Vec<Option<f64>>),
    Labels(Vec<Option<String>>),
}

/// Scores one instrument over `df`.
///
/// Returns `df` augmented with the instrument's subscale columns. Nothing is
/// written unless every subscale passes validation, and columns the instrument
/// does not own pass through unchanged.
pub fn score(df: &DataFrame, instrument: &Instrument, options: &ScoringOptions) -> Result<Scored> {
    let span = info_span!("score", instrument = %instrument.id);
    let _guard = span.enter();

    instrument.check()?;
    let items = resolve_items(df, instrument)?;
    check_item_references(instrument, &items)?;
    check_coverage(instrument, &items)?;

    let strict = options.unmapped == UnmappedPolicy::Strict || instrument.strict_recode;
    let Recoding {
        mut matrix,
        unmapped,
    } = recode_items(df, instrument, &items, strict)?;
    reverse::apply(&mut matrix, &instrument.reverse_items, instrument.item_range);

    let roles = respondent_roles(df, instrument, options)?;

    let mut report = InstrumentReport::new(&instrument.id, df.height());
    report.items = items.len();
    report.unmapped = unmapped;

    let mut outputs = Vec::with_capacity(instrument.subscales.len());
    for scale in &instrument.subscales {
        let scale_items = scale.items.resolve(&items, &instrument.filler_items);
        let (output, scale_report) =
            score_subscale(instrument, scale, &scale_items, &matrix, roles.as_deref())?;
        debug!(
            subscale = %scale.name,
            rule = scale.rule.kind(),
            missing = scale_report.missing_scores,
            "scored subscale"
        );
        outputs.push((scale, output));
        report.scales.push(scale_report);
    }

    let data = assemble(df, instrument, options, &items, &matrix, outputs, &mut report)?;
    info!(
        rows = report.rows,
        scales = report.scales.len(),
        unmapped = report.total_unmapped(),
        "scored instrument"
    );
    Ok(Scored { data, report })
}

/// Resolves the instrument's item columns against the table.
fn resolve_items(df: &DataFrame, instrument: &Instrument) -> Result<Vec<String>> {
    match &instrument.items {
        ItemSource::Listed(items) => {
            let missing: Vec<String> = items
                .iter()
                .filter(|item| !has_column(df, item))
                .cloned()
                .collect();
            if !missing.is_empty() {
                return Err(ScoringError::MissingColumns {
                    instrument: instrument.id.clone(),
                    columns: missing,
                });
            }
            Ok(items.clone())
        }
        ItemSource::Prefixed { prefix, .. } => {
            let owned = instrument.output_columns();
            let items: Vec<String> = prefixed_columns(df, prefix)
                .into_iter()
                .filter(|c| !owned.contains(c) && !instrument.superseded_columns.contains(c))
                .collect();
            if items.is_empty() {
                return Err(ScoringError::MissingColumns {
                    instrument: instrument.id.clone(),
                    columns: vec![format!("{prefix}*")],
                });
            }
            Ok(items)
        }
    }
}

fn respondent_roles(
    df: &DataFrame,
    instrument: &Instrument,
    options: &ScoringOptions,
) -> Result<Option<Vec<Option<String>>>> {
    if !instrument
        .subscales
        .iter()
        .any(Subscale::is_respondent_conditioned)
    {
        return Ok(None);
    }
    if !has_column(df, &options.respondent_column) {
        return Err(ScoringError::MissingColumns {
            instrument: instrument.id.clone(),
            columns: vec![options.respondent_column.clone()],
        });
    }
    string_column(df, &options.respondent_column).map(Some)
}

fn score_subscale(
    instrument: &Instrument,
    scale: &Subscale,
    items: &[String],
    matrix: &ItemMatrix,
    roles: Option<&[Option<String>]>,
) -> Result<(ScaleOutput, ScaleReport)> {
    let mut report = ScaleReport {
        name: scale.name.clone(),
        column: instrument.score_column(scale),
        rule: scale.rule.kind().to_string(),
        n_items: scale.n_items,
        missing_scores: 0,
        observed_min: None,
        observed_max: None,
        theoretical_min: None,
        theoretical_max: None,
    };

    let (output, observed, range) = match &scale.rule {
        ScoringRule::Sum | ScoringRule::Mean => {
            let result = aggregate(matrix, scale, items, roles);
            check_range(instrument, scale, &result, roles)?;
            let observed = Observed::of(&result.score);
            let range = theoretical_range(scale, instrument.item_range_for(scale), scale.n_items);
            (ScaleOutput::Additive(result), observed, Some(range))
        }
        ScoringRule::SeverityIndex => {
            let range = ItemRange::new(0.0, items.len() as f64);
            let values = severity_index(matrix, items);
            let observed = check_bounds(instrument, scale, &values, range)?;
            (ScaleOutput::Values(values), observed, Some(range))
        }
        ScoringRule::AnyEndorsed => {
            let range = ItemRange::new(0.0, 1.0);
            let values = any_endorsed(matrix, items);
            let observed = check_bounds(instrument, scale, &values, range)?;
            (ScaleOutput::Values(values), observed, Some(range))
        }
        ScoringRule::PassThrough { range } => {
            let item = items.first().map_or("", String::as_str);
            let values = pass_through(matrix, item);
            let observed = check_bounds(instrument, scale, &values, *range)?;
            (ScaleOutput::Values(values), observed, Some(*range))
        }
        ScoringRule::Grouping {
            first,
            second,
            both,
            neither,
        } => {
            let matches = classify_groups(matrix, &first.items, &second.items);
            check_exhaustive(instrument, scale, &matches)?;
            let labels: Vec<Option<String>> = matches
                .iter()
                .map(|m| match m.label {
                    GroupLabel::FirstOnly => Some(first.label.clone()),
                    GroupLabel::SecondOnly => Some(second.label.clone()),
                    GroupLabel::Both => Some(both.clone()),
                    GroupLabel::Neither => Some(neither.clone()),
                    GroupLabel::Missing => None,
                })
                .collect();
            let observed = Observed {
                missing: labels.iter().filter(|l| l.is_none()).count(),
                ..Observed::default()
            };
            (ScaleOutput::Labels(labels), observed, None)
        }
    };

    report.missing_scores = observed.missing;
    report.observed_min = observed.min;
    report.observed_max = observed.max;
    report.theoretical_min = range.map(|r| r.min);
    report.theoretical_max = range.map(|r| r.max);
    Ok((output, report))
}

/// Writes validated outputs and applies the item-level policy.
fn assemble(
    df: &DataFrame,
    instrument: &Instrument,
    options: &ScoringOptions,
    items: &[String],
    matrix: &ItemMatrix,
    outputs: Vec<(&Subscale, ScaleOutput)>,
    report: &mut InstrumentReport,
) -> Result<DataFrame> {
    let mut data = df.clone();
    report.dropped_columns = drop_existing(&mut data, &instrument.superseded_columns)?;

    let kept: Vec<String> = if options.keeps_items() {
        items.to_vec()
    } else {
        instrument.retain_on_drop.clone()
    };
    for item in &kept {
        if let Some(values) = matrix.get(item) {
            set_f64_column(&mut data, item, values.to_vec())?;
        }
    }

    for (scale, output) in outputs {
        match output {
            ScaleOutput::Additive(result) => {
                set_count_column(&mut data, &instrument.nan_count_column(scale), &result.nan_count)?;
                if options.emits_item_count() {
                    set_count_column(
                        &mut data,
                        &instrument.items_count_column(scale),
                        &result.items_count,
                    )?;
                }
                set_f64_column(&mut data, &instrument.score_column(scale), result.score)?;
            }
            ScaleOutput::Values(values) => {
                set_f64_column(&mut data, &instrument.score_column(scale), values)?;
            }
            ScaleOutput::Labels(labels) => {
                set_label_column(&mut data, &instrument.score_column(scale), labels)?;
            }
        }
    }

    if !options.keeps_items() {
        let to_drop: Vec<String> = items
            .iter()
            .filter(|item| !kept.contains(*item))
            .chain(&instrument.extra_drop_columns)
            .cloned()
            .collect();
        let dropped = drop_existing(&mut data, &to_drop)?;
        report.dropped_columns.extend(dropped);
    }

    if let Some(prefix) = &instrument.label_prefix {
        for item in &kept {
            let labelled = format!("{prefix}_{item}");
            if has_column(&data, item) && !has_column(&data, &labelled) {
                data.rename(item, labelled.into())?;
                report.renamed_columns += 1;
            }
        }
    }
    Ok(data)
}
