//! Transaction aggregate models.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive calendar date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// January 1st of `today`'s year through `today`.
    pub fn year_to_date(today: NaiveDate) -> Self {
        let from = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
        Self { from, to: today }
    }
}

/// Request for the sum of a category's transactions over a date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSumQuery {
    pub category_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl TransactionSumQuery {
    pub fn for_category(category_id: impl Into<String>, range: DateRange) -> Self {
        Self {
            category_id: category_id.into(),
            from: range.from,
            to: range.to,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransactionSumData {
    pub total: f64,
}

/// Response of the transaction-sum endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSumResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub data: Option<TransactionSumData>,
    #[serde(default)]
    pub message: Option<String>,
}

impl TransactionSumResponse {
    pub fn success(total: f64) -> Self {
        Self {
            status: ResponseStatus::Success,
            data: Some(TransactionSumData { total }),
            message: None,
        }
    }

    /// The total, only when the lookup succeeded and carried data.
    pub fn total(&self) -> Option<f64> {
        match self.status {
            ResponseStatus::Success => self.data.map(|d| d.total),
            ResponseStatus::Error => None,
        }
    }
}
