use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    aggregate::View,
    builder::UploadBatch,
    errors::HistoryError,
    filters::{DateRange, Filters, InclusionRules, MerchantSelection, merchant_universe},
    parsers::prelude::RawTransaction,
    view::compute_view,
};

/// Per-session working state: the uploaded rows and the active filters.
///
/// Uploads replace everything wholesale; views are derived on demand and
/// never stored.
#[derive(Debug, Clone, Default)]
pub struct Session {
    raw: Vec<RawTransaction>,
    merchants: BTreeSet<String>,
    filters: Filters,
    rules: InclusionRules,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: InclusionRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    /// Parses `batch` and, only if every file succeeds, swaps it in as the
    /// working set with filters reset. On error the session is untouched.
    pub fn load(&mut self, batch: UploadBatch) -> Result<(), HistoryError> {
        let files = batch.len();
        let raw = batch.parse()?;
        debug!(files, rows = raw.len(), "upload batch committed");
        self.replace(raw);
        Ok(())
    }

    pub fn replace(&mut self, raw: Vec<RawTransaction>) {
        self.merchants = merchant_universe(&raw);
        self.raw = raw;
        self.filters = Filters::default();
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn raw(&self) -> &[RawTransaction] {
        &self.raw
    }

    pub fn merchants(&self) -> &BTreeSet<String> {
        &self.merchants
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn rules(&self) -> &InclusionRules {
        &self.rules
    }

    pub fn set_filters(&mut self, filters: Filters) {
        self.filters = filters;
    }

    pub fn select_merchants<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.merchants = MerchantSelection::from_names(names, &self.merchants);
    }

    pub fn toggle_merchant(&mut self, name: &str) {
        self.filters.merchants.toggle(name, &self.merchants);
    }

    pub fn select_all_merchants(&mut self) {
        self.filters.merchants.select_all();
    }

    pub fn set_date_range(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.filters.dates = DateRange::new(start, end);
    }

    /// Current filtered view. Errors leave the session usable; changing the
    /// filters or uploading again recovers.
    pub fn view(&self) -> Result<View, HistoryError> {
        compute_view(&self.raw, &self.filters, &self.rules)
    }
}
