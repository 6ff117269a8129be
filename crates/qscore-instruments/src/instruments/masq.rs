//! MASQ: Mood and Anxiety Symptom Questionnaire, 62-item short form.
//!
//! Exports mix three encodings. A few items keep the questionnaire's 1-5
//! values, most were shifted to 0-4, and `scl14` was exported as text labels.
//! Item 43 is exported already reversed and is not in the reverse list.

use qscore_model::{Instrument, ItemRange, ItemSource, RecodeTable, ScaleItems, Subscale};

use super::{numeric_codes, text_codes};

/// Item columns in questionnaire order.
const ITEMS: &[&str] = &[
    "wn12", "masq_02", "poms038", "afraid", "idas_40", "shakyhnd", "masq_09", "masq_diar",
    "masq_04", "masq_06", "masq_nerv", "idas_8", "masq_21", "masq_un", "idas_10", "lumpthrt",
    "masq_faint", "masq90_q86", "masq_20", "bsil23", "stai25", "masq_11", "masq_12", "sweaty",
    "impac_q9", "masq_onedge", "masq_d30_26", "masq_15", "masq_23", "masq_30", "masq90_q23",
    "relax", "scl14", "atq_b_10d", "masq_05", "masq_10", "masq_08", "fatexp45", "masq_22",
    "masq_18", "masq90_q10", "masq_chok", "idas_27", "twitch", "masq_17", "masq_dm", "idas_59",
    "masq_afr2die", "masq_14", "masq90_q71", "masq90_q35", "masq_27", "masq_16", "bsil33",
    "bsil38", "idas_50", "pclc_9", "masq90_q32", "masq_24", "masq_29", "baseline_h_017",
    "frequri",
];

/// Items exported on the original 1-5 scale.
const ORIGINAL_SCALE: &[&str] = &[
    "wn12", "idas_40", "idas_8", "idas_10", "stai25", "impac_q9", "atq_b_10d", "fatexp45",
    "idas_27", "idas_59", "idas_50", "pclc_9",
];

/// Items exported on a 0-4 scale.
const SHIFTED_SCALE: &[&str] = &[
    "masq_02", "poms038", "afraid", "shakyhnd", "masq_09", "masq_diar", "masq_04", "masq_06",
    "masq_nerv", "masq_21", "masq_un", "lumpthrt", "masq_faint", "masq90_q86", "masq_20",
    "bsil23", "masq_11", "masq_12", "sweaty", "masq_onedge", "masq_d30_26", "masq_15",
    "masq_23", "masq_30", "masq90_q23", "relax", "masq_05", "masq_10", "masq_08", "masq_22",
    "masq_18", "masq90_q10", "masq_chok", "twitch", "masq_17", "masq_dm", "masq_afr2die",
    "masq_14", "masq90_q71", "masq90_q35", "masq_27", "masq_16", "bsil33", "bsil38",
    "masq90_q32", "masq_24", "masq_29", "baseline_h_017", "frequri",
];
const TEXT_LABELED: &str = "scl14";

pub fn definition() -> Instrument {
    let base = Instrument::new(
        "masq",
        "Mood and Anxiety Symptom Questionnaire",
        ItemSource::listed(ITEMS.iter().copied()),
        ItemRange::new(1.0, 5.0),
    );
    let reverse = base.items_by_number(&[3, 7, 10, 15, 22, 27, 39, 47, 49, 53, 56, 58, 60]);
    let anxious_symptoms = base.items_by_number(&[4, 8, 11, 14, 16, 20, 26, 32, 35, 55, 59]);
    let arousal = base.items_by_number(&[
        2, 6, 13, 17, 19, 24, 28, 30, 37, 40, 42, 44, 46, 48, 52, 54, 62,
    ]);
    let depressive_symptoms =
        base.items_by_number(&[1, 5, 9, 12, 21, 23, 29, 31, 34, 36, 38, 45]);
    let anhedonia = base.items_by_number(&[
        3, 7, 10, 15, 18, 22, 25, 27, 33, 39, 41, 43, 47, 49, 50, 51, 53, 56, 57, 58, 60, 61,
    ]);

    base.with_source_prefix("masq01")
        .with_recode(
            ScaleItems::listed(ORIGINAL_SCALE.iter().copied()),
            RecodeTable::identity(1..=5).also_as_text(),
        )
        .with_recode(
            ScaleItems::listed(SHIFTED_SCALE.iter().copied()),
            numeric_codes(&[(0, 1.0), (1, 2.0), (2, 3.0), (3, 4.0), (4, 5.0)]),
        )
        .with_recode(
            ScaleItems::listed([TEXT_LABELED]),
            text_codes(&[
                ("not at all", 1.0),
                ("a little bit", 2.0),
                ("moderately", 3.0),
                ("quite a bit", 4.0),
                ("extremely", 5.0),
            ]),
        )
        .with_reverse_items(reverse)
        .with_subscale(Subscale::sum("gd_anxious_symptoms", anxious_symptoms))
        .with_subscale(Subscale::sum("anxious_arousal", arousal))
        .with_subscale(Subscale::sum("gd_depressive_symptoms", depressive_symptoms))
        .with_subscale(Subscale::sum("anhedonic_depression", anhedonia))
        .with_subscale(Subscale::total(62))
}
