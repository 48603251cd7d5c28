use std::{collections::BTreeSet, fmt};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{errors::HistoryError, parsers::prelude::RawTransaction, types::Transaction};

pub const COMPLETED_STATUS: &str = "Completed";

/// Type phrases marking rows that are not genuine merchant activity:
/// FX bookkeeping, provisional authorizations and internal transfers.
pub const EXCLUDED_TYPE_PHRASES: [&str; 4] = [
    "Currency Conversion",
    "General Authorization",
    "General Card Deposit",
    "Bank Deposit to PP Account",
];

/// Rules deciding which transactions count as real economic activity.
///
/// Matching is case-sensitive, on exact substrings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InclusionRules {
    pub required_status: String,
    pub excluded_type_phrases: Vec<String>,
}

impl Default for InclusionRules {
    fn default() -> Self {
        Self {
            required_status: COMPLETED_STATUS.to_string(),
            excluded_type_phrases: EXCLUDED_TYPE_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl InclusionRules {
    pub fn from_json(json: &str) -> Result<Self, HistoryError> {
        serde_json::from_str(json)
            .map_err(|e| HistoryError::ParseFailed(format!("Invalid inclusion rules: {}", e)))
    }

    pub fn includes(&self, txn: &Transaction) -> bool {
        txn.status == self.required_status
            && !txn.amount.is_zero()
            && !txn.name.is_empty()
            && !self
                .excluded_type_phrases
                .iter()
                .any(|phrase| txn.transaction_type.contains(phrase.as_str()))
    }
}

/// Which merchants the view is narrowed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MerchantSelection {
    #[default]
    All,
    Specific(BTreeSet<String>),
}

impl MerchantSelection {
    /// Builds a selection, collapsing to `All` when nothing or everything in
    /// `universe` is picked.
    pub fn from_names<I, S>(names: I, universe: &BTreeSet<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        Self::collapse(names, universe)
    }

    fn collapse(names: BTreeSet<String>, universe: &BTreeSet<String>) -> Self {
        if names.is_empty() || universe.is_subset(&names) {
            MerchantSelection::All
        } else {
            MerchantSelection::Specific(names)
        }
    }

    pub fn select_all(&mut self) {
        *self = MerchantSelection::All;
    }

    /// Flips one merchant. From `All`, toggling picks just that merchant.
    pub fn toggle(&mut self, name: &str, universe: &BTreeSet<String>) {
        let mut names = match std::mem::take(self) {
            MerchantSelection::All => BTreeSet::new(),
            MerchantSelection::Specific(names) => names,
        };

        if !names.remove(name) {
            names.insert(name.to_string());
        }

        *self = Self::collapse(names, universe);
    }

    pub fn is_all(&self) -> bool {
        matches!(self, MerchantSelection::All)
    }

    /// Whether the option for `name` renders as checked; under `All` every
    /// option is.
    pub fn is_selected(&self, name: &str) -> bool {
        self.matches(name)
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            MerchantSelection::All => true,
            MerchantSelection::Specific(names) => names.contains(name),
        }
    }
}

impl fmt::Display for MerchantSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MerchantSelection::All => write!(f, "All merchants"),
            MerchantSelection::Specific(names) => {
                let joined: Vec<&str> = names.iter().map(String::as_str).collect();
                write!(f, "{}", joined.join(", "))
            }
        }
    }
}

/// Inclusive calendar-day range; a missing bound is open.
///
/// Dates carry no time of day, so "from the first instant of `start`" and
/// "until the last instant of `end`" reduce to inclusive day comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// User-chosen filter parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub merchants: MerchantSelection,
    pub dates: DateRange,
}

impl Filters {
    pub fn selects(&self, txn: &Transaction) -> bool {
        self.merchants.matches(&txn.name) && self.dates.contains(txn.date)
    }
}

/// Distinct non-empty names across every uploaded row, whatever its status.
pub fn merchant_universe(raw: &[RawTransaction]) -> BTreeSet<String> {
    raw.iter()
        .filter(|txn| !txn.name.is_empty())
        .map(|txn| txn.name.clone())
        .collect()
}
