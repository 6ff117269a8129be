//! SHAPS: Snaith-Hamilton Pleasure Scale.
//!
//! Disagreeing scores 1 and agreeing scores 0, so higher totals mean more
//! anhedonia. Reverse-worded items arrive already reversed.

use qscore_model::{Instrument, ItemRange, ItemSource, ScaleItems, Subscale};

use super::numeric_codes;

pub fn definition() -> Instrument {
    Instrument::new(
        "shaps",
        "Snaith-Hamilton Pleasure Scale",
        ItemSource::numbered("shaps", 14),
        ItemRange::new(0.0, 1.0),
    )
    .with_source_prefix("shaps01")
    .with_recode(
        ScaleItems::All,
        numeric_codes(&[(1, 1.0), (2, 1.0), (3, 0.0), (4, 0.0)])
            .missing(999)
            .missing(-9)
            .also_as_text(),
    )
    .with_subscale(Subscale::total(14))
}
