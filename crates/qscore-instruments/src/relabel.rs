//! Built-in relabel sets for score-only sources.

use std::sync::LazyLock;

use qscore_model::RelabelSet;

static BUILTIN: LazyLock<Vec<RelabelSet>> = LazyLock::new(|| vec![wasi(), penn_nih()]);

/// WASI-II: drops the file qualifier and clears the 999 sentinel.
pub fn wasi() -> RelabelSet {
    RelabelSet::new("wasi", "Wechsler Abbreviated Scale of Intelligence II")
        .with_rename("wasi201_", "")
        .with_sentinel(999)
        .with_sentinel("999.0")
        .with_sentinel("NaN")
}

/// Penn computerized battery and NIH Toolbox task files.
///
/// Sentinels are cleared only in renamed columns whose maximum is the
/// sentinel, e.g. the delay discounting `sv_*` columns.
pub fn penn_nih() -> RelabelSet {
    let renames = [
        ("pwmt01", "penntask_wordmem"),
        ("pmat01", "penntask_matreason"),
        ("er4001", "penntask_emorecog"),
        ("deldisk01", "penntask_delaydisc"),
        ("dccs01_nih_dccs", "nihtoolbox_dimenscardsort"),
        ("dccs01", "nihtoolbox_dimenscardsort"),
        ("lswmt01", "nihtoolbox_listsort"),
        ("flanker01", "nihtoolbox_flanker"),
        ("orrt01", "nihtoolbox_oralreadrec"),
        ("pcps01", "nihtoolbox_patterncompar"),
    ];
    renames
        .into_iter()
        .fold(
            RelabelSet::new("penn_nih", "Penn CNB and NIH Toolbox tasks"),
            |set, (from, to)| set.with_rename(from, to),
        )
        .with_sentinel(999)
        .with_sentinel("999.0")
        .with_sentinel("NaN")
        .with_only_when_max_is_sentinel(true)
}

/// All built-in relabel sets.
pub fn relabel_sets() -> &'static [RelabelSet] {
    &BUILTIN
}

pub fn get_relabel_set(id: &str) -> Option<&'static RelabelSet> {
    BUILTIN.iter().find(|set| set.id == id)
}
