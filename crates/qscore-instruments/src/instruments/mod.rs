//! One module per built-in questionnaire.
//!
//! Each module exposes a `definition()` returning the immutable [`Instrument`].
//! Item groups are written by questionnaire number and resolved against the
//! item list, so a subscale can never point at a column the instrument lacks.

use qscore_model::{Instrument, RecodeTable};

pub mod bisbas;
pub mod chaphand;
pub mod cssrs;
pub mod ksads;
pub mod ksadsp201;
pub mod masq;
pub mod mfq;
pub mod nffi;
pub mod rbqa;
pub mod rcads;
pub mod rmbi;
pub mod shaps;
pub mod tanner;

/// Every built-in in catalogue order.
pub(crate) fn builtin() -> Vec<Instrument> {
    vec![
        bisbas::definition(),
        chaphand::definition(),
        cssrs::definition(),
        ksads::definition(),
        ksadsp201::definition(),
        masq::definition(),
        mfq::definition(),
        nffi::definition(),
        rbqa::definition(),
        rcads::definition(),
        rmbi::definition(),
        shaps::definition(),
        tanner::definition(),
    ]
}

/// Numeric codes, accepted in both numeric and text spellings.
pub(crate) fn numeric_codes(pairs: &[(i32, f64)]) -> RecodeTable {
    pairs
        .iter()
        .fold(RecodeTable::new(), |table, &(raw, value)| table.code(raw, value))
        .also_as_text()
}

/// Text labels mapped onto canonical values.
pub(crate) fn text_codes(pairs: &[(&str, f64)]) -> RecodeTable {
    pairs
        .iter()
        .fold(RecodeTable::new(), |table, &(raw, value)| table.code(raw, value))
}

pub(crate) fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
