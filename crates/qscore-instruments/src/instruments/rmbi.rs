//! RMBI: Retrospective Measure of Behavioral Inhibition.
//!
//! Two item groups were exported on different codings. Items 4, 5, 7, 11, 13
//! and 15 arrive already reversed and shifted up by one. In the first group 3
//! means "do not remember"; in the second group 0 does.

use qscore_model::{Instrument, ItemRange, ItemSource, ScaleItems, Subscale};

use super::numeric_codes;

pub fn definition() -> Instrument {
    let base = Instrument::new(
        "rmbi",
        "Retrospective Measure of Behavioral Inhibition",
        ItemSource::numbered("rmbi", 18),
        ItemRange::new(0.0, 2.0),
    );
    let direct = base.items_by_number(&[1, 2, 3, 6, 8, 9, 10, 12, 14, 16, 17, 18]);
    let shifted = base.items_by_number(&[4, 5, 7, 11, 13, 15]);

    base.with_source_prefix("rmbi01")
        .with_recode(
            ScaleItems::Listed(direct),
            numeric_codes(&[(0, 0.0), (1, 1.0), (2, 2.0)])
                .missing(3)
                .also_as_text(),
        )
        .with_recode(
            ScaleItems::Listed(shifted),
            numeric_codes(&[(1, 0.0), (2, 1.0), (3, 2.0)])
                .missing(0)
                .also_as_text(),
        )
        .with_subscale(Subscale::total(18))
}
