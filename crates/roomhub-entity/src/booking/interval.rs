//! Half-open stay intervals: validation, overlap detection, and cost.
//!
//! A stay covers the nights from `start_date` (inclusive) to `end_date`
//! (exclusive), so two stays that share an endpoint do not overlap: the
//! guest checking out on the 10th and the guest checking in on the 10th
//! can hold the same room.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use roomhub_core::AppError;

/// A validated half-open date interval `[start_date, end_date)`.
///
/// Construction through [`StayInterval::new`] guarantees
/// `start_date < end_date`, so every interval covers at least one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayInterval {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl StayInterval {
    /// Build a validated interval.
    ///
    /// Zero-length and inverted intervals are rejected with a validation
    /// error before any conflict evaluation can happen.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, AppError> {
        if start_date >= end_date {
            return Err(AppError::validation(
                "Start date must be before end date",
            ));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// First night of the stay (inclusive).
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Check-out date (exclusive).
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Whether two intervals conflict under half-open semantics:
    /// `[s1, e1)` and `[s2, e2)` overlap iff `s1 < e2 && s2 < e1`.
    pub fn overlaps(&self, other: &StayInterval) -> bool {
        self.start_date < other.end_date && other.start_date < self.end_date
    }

    /// Whether the interval covers the given date (a guest occupies the
    /// room on `date` iff `start <= date < end`).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date < self.end_date
    }

    /// Number of nights, always >= 1 for a validated interval.
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Total cost of the stay at the given nightly rate:
    /// `nights * price_per_day`.
    ///
    /// Pure function of its inputs; never recomputed implicitly after a
    /// booking is stored.
    pub fn cost(&self, price_per_day: Decimal) -> Decimal {
        Decimal::from(self.nights()) * price_per_day
    }
}
