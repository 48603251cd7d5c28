use csv::StringRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{CsvDate, parse_amount};

pub(super) const DATE_FIELD: usize = 0;
pub(super) const NAME_FIELD: usize = 3;
pub(super) const TYPE_FIELD: usize = 4;
pub(super) const STATUS_FIELD: usize = 5;
pub(super) const CURRENCY_FIELD: usize = 6;
pub(super) const AMOUNT_FIELD: usize = 7;

/// Every activity row must be at least this wide.
pub const MIN_FIELDS: usize = AMOUNT_FIELD + 1;

/// Candidate transaction as read from one activity row, before any filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub date: CsvDate,
    pub name: String,
    pub transaction_type: String,
    pub status: String,
    pub currency: String,
    pub amount: Decimal,
}

impl RawTransaction {
    pub(super) fn from_record(record: &StringRecord) -> Result<Self, String> {
        if record.len() < MIN_FIELDS {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(format!(
                "Row at line {} has {} fields, expected at least {}",
                line,
                record.len(),
                MIN_FIELDS
            ));
        }

        let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();

        Ok(RawTransaction {
            date: field(DATE_FIELD).into(),
            name: field(NAME_FIELD),
            transaction_type: field(TYPE_FIELD),
            status: field(STATUS_FIELD),
            currency: field(CURRENCY_FIELD),
            amount: parse_amount(record.get(AMOUNT_FIELD).unwrap_or_default()),
        })
    }
}
