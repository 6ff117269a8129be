//! Tanner staging, self-rated sexual maturity.
//!
//! The score is the mean stage across answered items rather than a sum.

use qscore_model::{
    Instrument, ItemRange, ItemSource, RecodeTable, ScaleItems, ScoringRule, Subscale,
};

pub fn definition() -> Instrument {
    Instrument::new(
        "tanner",
        "Tanner Sexual Maturity Scale",
        ItemSource::listed(["tsf1", "tsf2", "tsf3", "tsftsg", "tsftphg"]),
        ItemRange::new(1.0, 5.0),
    )
    .with_source_prefix("tanner_sms01")
    .with_recode(
        ScaleItems::All,
        RecodeTable::identity(1..=5).missing(9999).also_as_text(),
    )
    .with_subscale(Subscale::total(5).with_rule(ScoringRule::Mean))
}
