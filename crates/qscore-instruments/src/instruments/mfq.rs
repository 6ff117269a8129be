//! MFQ: Mood and Feelings Questionnaire.
//!
//! Parents answer all 34 items about their child. The child version omits one
//! item, so a child row has 33 items to answer and its nan count starts from 33.

use qscore_model::{Instrument, ItemRange, ItemSource, ScaleItems, Subscale};

use super::numeric_codes;

pub fn definition() -> Instrument {
    Instrument::new(
        "mfq",
        "Mood and Feelings Questionnaire",
        ItemSource::Prefixed {
            prefix: "mfq".to_string(),
            expected: 34,
        },
        ItemRange::new(0.0, 2.0),
    )
    .with_source_prefix("mfq01")
    .with_recode(
        ScaleItems::All,
        numeric_codes(&[(1, 0.0), (2, 1.0), (3, 2.0)]),
    )
    .with_subscale(
        Subscale::total(34)
            .with_respondent_count("Parent", 34)
            .with_respondent_count("Child", 33),
    )
}
