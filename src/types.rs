use crate::{errors::HistoryError, parsers::prelude::*};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A candidate transaction with its date resolved to a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub name: String,
    pub transaction_type: String,
    pub status: String,
    pub currency: String,
    pub amount: Decimal,
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = HistoryError;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        Ok(Transaction {
            date: raw.date.parse()?,
            name: raw.name,
            transaction_type: raw.transaction_type,
            status: raw.status,
            currency: raw.currency,
            amount: raw.amount,
        })
    }
}

impl TryFrom<&RawTransaction> for Transaction {
    type Error = HistoryError;

    fn try_from(raw: &RawTransaction) -> Result<Self, Self::Error> {
        Ok(Transaction {
            date: raw.date.parse()?,
            name: raw.name.clone(),
            transaction_type: raw.transaction_type.clone(),
            status: raw.status.clone(),
            currency: raw.currency.clone(),
            amount: raw.amount,
        })
    }
}
