use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::HistoryError, types::Transaction};

/// A transaction placed in a filtered view, with the running total up to and
/// including itself. Only meaningful inside the view that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub cumulative_amount: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_incoming: Decimal,
    pub total_outgoing: Decimal,
    pub net_amount: Decimal,
}

/// Chronologically ordered, filtered transactions plus their summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub transactions: Vec<CumulativeTransaction>,
    pub summary: Summary,
}

/// Sorts by date (ties keep their incoming order) and walks once to attach
/// inclusive running totals.
///
/// Fails with `AmountOverflow` instead of panicking when a total leaves the
/// range `Decimal` can represent.
pub fn aggregate(mut transactions: Vec<Transaction>) -> Result<View, HistoryError> {
    transactions.sort_by_key(|txn| txn.date);

    let mut summary = Summary::default();
    let mut running = Decimal::ZERO;
    let mut entries = Vec::with_capacity(transactions.len());

    for transaction in transactions {
        let amount = transaction.amount;
        let overflow = || HistoryError::AmountOverflow {
            date: transaction.date,
            name: transaction.name.clone(),
        };

        if amount > Decimal::ZERO {
            summary.total_incoming = summary.total_incoming.checked_add(amount).ok_or_else(overflow)?;
        } else if amount < Decimal::ZERO {
            summary.total_outgoing = summary.total_outgoing.checked_add(amount.abs()).ok_or_else(overflow)?;
        }
        running = running.checked_add(amount).ok_or_else(overflow)?;

        entries.push(CumulativeTransaction {
            transaction,
            cumulative_amount: running,
        });
    }

    summary.net_amount = entries
        .last()
        .map(|last| last.cumulative_amount)
        .unwrap_or(Decimal::ZERO);

    Ok(View {
        transactions: entries,
        summary,
    })
}

/// One `{x, y}` point for a chart with a real time axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimePoint<'a> {
    pub x: NaiveDate,
    pub y: Decimal,
    pub detail: &'a CumulativeTransaction,
}

/// One evenly spaced point labelled with a human-readable date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPoint<'a> {
    pub label: String,
    pub detail: &'a CumulativeTransaction,
}

impl View {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn time_series(&self) -> Vec<TimePoint<'_>> {
        self.transactions
            .iter()
            .map(|entry| TimePoint {
                x: entry.transaction.date,
                y: entry.cumulative_amount,
                detail: entry,
            })
            .collect()
    }

    pub fn category_points(&self) -> Vec<CategoryPoint<'_>> {
        self.transactions
            .iter()
            .map(|entry| CategoryPoint {
                label: entry.transaction.date.format("%B %-d, %Y").to_string(),
                detail: entry,
            })
            .collect()
    }
}
