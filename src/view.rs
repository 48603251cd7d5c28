use tracing::{debug, warn};

use crate::{
    aggregate::{View, aggregate},
    errors::HistoryError,
    filters::{Filters, InclusionRules},
    parsers::prelude::RawTransaction,
    types::Transaction,
};

/// Resolves dates, rejecting rows whose date cannot be read so they never
/// reach sorting or range checks.
pub fn resolve(raw: &[RawTransaction]) -> Vec<Transaction> {
    raw.iter()
        .filter_map(|row| match Transaction::try_from(row) {
            Ok(txn) => Some(txn),
            Err(err) => {
                warn!(name = %row.name, date = %row.date.as_str(), error = %err, "rejecting malformed row");
                None
            }
        })
        .collect()
}

/// Derives the ordered, filtered view for the given filter parameters.
///
/// Pure: the same inputs always give the same view, so reverting a filter
/// change reproduces the earlier sequence exactly.
pub fn compute_view(
    raw: &[RawTransaction],
    filters: &Filters,
    rules: &InclusionRules,
) -> Result<View, HistoryError> {
    let selected: Vec<Transaction> = resolve(raw)
        .into_iter()
        .filter(|txn| rules.includes(txn) && filters.selects(txn))
        .collect();

    let view = aggregate(selected)?;
    debug!(
        rows = raw.len(),
        shown = view.len(),
        net = %view.summary.net_amount,
        "view recomputed"
    );
    Ok(view)
}
