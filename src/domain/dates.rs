use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// Half-open stay interval `[check_in, check_out)` — the checkout day is
/// not an occupied night and is free for a new arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl DateRange {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self> {
        if check_out <= check_in {
            return Err(BookingError::Validation {
                reason: "check-out date must be after check-in date".into(),
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Number of occupied nights. Always positive for a constructed range.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Strict half-open overlap test: ranges that only touch at a boundary
    /// day do not overlap, so back-to-back stays are permitted.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.check_in < other.check_out && other.check_in < self.check_out
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.check_in <= date && date < self.check_out
    }

    /// Iterate the occupied nights: every day in `[check_in, check_out)`.
    pub fn days(self) -> impl Iterator<Item = NaiveDate> {
        self.check_in
            .iter_days()
            .take_while(move |d| *d < self.check_out)
    }
}
