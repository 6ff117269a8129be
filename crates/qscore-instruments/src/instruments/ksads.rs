//! K-SADS diagnoses with a study grouping.
//!
//! Clinicians score the interview, so there is nothing to sum. Diagnoses are
//! collapsed to present/absent and rows are grouped into depressed, anxious,
//! comorbid or healthy control.

use qscore_model::{Instrument, ItemRange, ItemSource, LabeledSet, ScaleItems, Subscale};

use super::{names, numeric_codes};

const DEPRESSIVE: &[&str] = &["mddcurrent", "dysthymiacurrent", "depnoscurrent"];
const ANXIOUS: &[&str] = &[
    "gadcurrent",
    "panicdisordercurrent",
    "agoraphobiacurrent",
    "separationcurrent",
    "socialphobiacurrent",
    "simplephobiacurrent",
];

const DIAGNOSES: &[&str] = &[
    "depressive_disorder_nos", "mania", "hypomania", "bipolar_nos", "bipolar_i", "bipolar_ii",
    "schizoaffective_disorder_mania", "schizophrenia", "schizophreniform_disorder",
    "brief_reactive_psychosis", "avoidant_disorder_childhood", "overanxious_disorder",
    "post_traumatic_stress_disorder", "acute_stress_disorder", "adj_disorder_wanxious_mood",
    "enuresis", "encopresis", "attention_deficit_disorder", "adj_disorder_dist_conduct",
    "adj_dis_mixed_mood_conduct", "tourettes", "chronic_motor_voc_tic_disorder",
    "transient_tic_disorder", "alcohol_abuse", "mental_retardation",
    "other_psychiatric_disorder", "no_psychiatric_disorder", "relationship", "kssp_q2_p",
    "kssp_q8_p", "kssp_q10_p", "kssp_q11_p", "mddpast", "mddcurrent", "dysthymiapast",
    "dysthymiacurrent", "depnospast", "depnoscurrent", "cyclothymiapast", "cyclothymiacurrent",
    "bipolarnospast", "bipolarnoscurrent", "bipolaripast", "bipolaricurrent", "bipolariipast",
    "bipolariicurrent", "panicdisorderpast", "panicdisordercurrent", "separationpast",
    "separationcurrent", "simplephobiapast", "simplephobiacurrent", "socialphobiapast",
    "socialphobiacurrent", "agoraphobiapast", "agoraphobiacurrent", "gadpast", "gadcurrent",
    "ocdpast", "ocdcurrent", "ptsdpast", "ptsdcurrent", "adhdpast", "adhdcurrent", "oddpast",
    "oddcurrent", "conductpast", "conductcurrent", "anorexiapast", "anorexiacurrent",
    "bulimiapast", "bulimiacurrent", "alcoholabusepast", "alcoholdependencepast",
    "alcoholdependencecurrent", "substanceabusepast", "substanceabusecurrent",
    "substancedependencepast", "substancedependencecurrent",
];

pub fn definition() -> Instrument {
    // 3 (threshold) and 4 (severe) count as present.
    let presence = numeric_codes(&[(4, 1.0), (3, 1.0), (2, 0.0), (1, 0.0), (0, 0.0)])
        .missing(999)
        .also_as_text();
    let grouping_items: Vec<String> = names(DEPRESSIVE).into_iter().chain(names(ANXIOUS)).collect();

    Instrument::new(
        "ksads",
        "K-SADS Diagnoses",
        ItemSource::listed(DIAGNOSES.iter().copied()),
        ItemRange::new(0.0, 1.0),
    )
    .with_source_prefix("ksads_diagnoses01")
    .with_recode(ScaleItems::All, presence)
    .with_subscale(Subscale::grouping(
        "group",
        LabeledSet::new("depressed", DEPRESSIVE.iter().copied()),
        LabeledSet::new("anxious", ANXIOUS.iter().copied()),
        "comorbid",
        "hc",
    ))
    .with_label_prefix("ksads")
    .with_retain_on_drop(grouping_items)
}
