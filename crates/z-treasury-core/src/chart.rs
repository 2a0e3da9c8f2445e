//! Daily funds-in / funds-out series for the balance chart.
//!
//! Transactions arrive most-recent-first. They are bucketed by calendar date,
//! the buckets are put in chronological order, and the oldest bucket is
//! dropped when there is more than one: the provider's window usually starts
//! part-way through that day, so its totals would be artificially low.
//!
//! Dates are computed in the timezone of the running process by
//! [`daily_funds`]. [`daily_funds_in`] takes the zone explicitly.

use std::collections::HashMap;

use chrono::{Datelike, Local, TimeZone};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;

use crate::records::Transaction;

/// Placeholder value the chart renders when there is no data.
pub const NO_DATA_SENTINEL: &str = "0";

/// Bucket key for timestamps that do not map to a calendar date.
pub const INVALID_DATE_KEY: &str = "Invalid Date";

/// Funds moved on one calendar date, in major currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyBucket {
    /// Date formatted as `M/D/YYYY` without leading zeros.
    pub date: String,
    /// Sum of positive amounts. Never negative.
    pub funds_in: Decimal,
    /// Sum of the absolute values of non-positive amounts. Never negative.
    pub funds_out: Decimal,
}

impl DailyBucket {
    fn empty(date: String) -> Self {
        Self {
            date,
            funds_in: Decimal::ZERO,
            funds_out: Decimal::ZERO,
        }
    }

    fn apply(&mut self, amount: i64) {
        // Minor units, two-decimal currencies only.
        let value = Decimal::new(amount, 2);
        if amount > 0 {
            self.funds_in += value;
        } else {
            self.funds_out += value.abs();
        }
    }
}

/// Chart series, oldest date first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSeries {
    /// No transactions were supplied.
    NoData,
    /// One entry per date that survived trimming.
    Daily(Vec<DailyBucket>),
}

impl ChartSeries {
    /// Number of points the chart will draw (the no-data marker counts as one).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::NoData => 1,
            Self::Daily(buckets) => buckets.len(),
        }
    }

    /// Always `false`: even the no-data series carries its marker point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The daily buckets, or an empty slice for [`ChartSeries::NoData`].
    #[must_use]
    pub fn buckets(&self) -> &[DailyBucket] {
        match self {
            Self::NoData => &[],
            Self::Daily(buckets) => buckets,
        }
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum ChartValue<'a> {
    Text(&'a str),
    Number(f64),
}

fn amount_value(amount: Decimal) -> ChartValue<'static> {
    ChartValue::Number(amount.to_f64().unwrap_or_default())
}

impl Serialize for ChartSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (dates, funds_in, funds_out): (Vec<_>, Vec<_>, Vec<_>) = match self {
            Self::NoData => (
                vec![ChartValue::Text(NO_DATA_SENTINEL)],
                vec![ChartValue::Text(NO_DATA_SENTINEL)],
                vec![ChartValue::Text(NO_DATA_SENTINEL)],
            ),
            Self::Daily(buckets) => (
                buckets
                    .iter()
                    .map(|b| ChartValue::Text(b.date.as_str()))
                    .collect(),
                buckets.iter().map(|b| amount_value(b.funds_in)).collect(),
                buckets.iter().map(|b| amount_value(b.funds_out)).collect(),
            ),
        };

        let mut state = serializer.serialize_struct("ChartSeries", 3)?;
        state.serialize_field("faTransactionsDates", &dates)?;
        state.serialize_field("faTransactionsFundsIn", &funds_in)?;
        state.serialize_field("faTransactionsFundsOut", &funds_out)?;
        state.end()
    }
}

/// Format a timestamp as `M/D/YYYY` in `tz`.
#[must_use]
pub fn date_key<Tz: TimeZone>(created: i64, tz: &Tz) -> String {
    match tz.timestamp_opt(created, 0).single() {
        Some(dt) => format!("{}/{}/{}", dt.month(), dt.day(), dt.year()),
        None => INVALID_DATE_KEY.to_string(),
    }
}

/// Build the chart series using the process's local timezone.
#[must_use]
pub fn daily_funds(transactions: &[Transaction]) -> ChartSeries {
    daily_funds_in(transactions, &Local)
}

/// Build the chart series, computing calendar dates in `tz`.
#[must_use]
pub fn daily_funds_in<Tz: TimeZone>(transactions: &[Transaction], tz: &Tz) -> ChartSeries {
    if transactions.is_empty() {
        return ChartSeries::NoData;
    }

    let mut buckets: Vec<DailyBucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for tx in transactions {
        let key = date_key(tx.created, tz);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            buckets.push(DailyBucket::empty(key));
            buckets.len() - 1
        });
        buckets[slot].apply(tx.amount);
    }

    buckets.reverse();
    if buckets.len() > 1 {
        buckets.remove(0);
    }

    ChartSeries::Daily(buckets)
}
